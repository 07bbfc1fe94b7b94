//! `pbparam`: decode, encode and measure `pb` request parameters.
//!
//! Usage:
//!   pbparam decode `[WIRE]`   - print a wire string as pretty JSON
//!   pbparam encode `[JSON]`   - print the wire string for a JSON document
//!   pbparam count `[JSON]`    - print the element count of a JSON document
//!
//! Input is read from stdin when the positional argument is omitted.
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use std::io::{self, Read};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pb_param::{CodecOptions, Document, Error, ListDetection, DEFAULT_MAX_DEPTH};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pbparam", version, about = "Decode and encode Google Maps pb parameters")]
struct Cli {
    #[command(flatten)]
    codec: CodecArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct CodecArgs {
    /// How messages keyed 0..n-1 are encoded
    #[arg(long, value_enum, default_value_t = ListMode::Disabled, global = true)]
    list_detection: ListMode,

    /// Deepest message nesting accepted when decoding
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, global = true)]
    max_depth: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ListMode {
    Disabled,
    Contiguous,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a wire string and print it as JSON
    Decode {
        /// Wire string, e.g. '!1m2!1sabc!2e1' (stdin when omitted)
        wire: Option<String>,
        /// Print compact JSON on one line
        #[arg(long)]
        compact: bool,
    },
    /// Encode a JSON document into a wire string
    Encode {
        /// JSON object of type-prefixed strings (stdin when omitted)
        json: Option<String>,
    },
    /// Print how many tokens a JSON document occupies once encoded
    Count {
        /// JSON object of type-prefixed strings (stdin when omitted)
        json: Option<String>,
    },
}

impl CodecArgs {
    fn options(&self) -> CodecOptions {
        let list_detection = match self.list_detection {
            ListMode::Disabled => ListDetection::Disabled,
            ListMode::Contiguous => ListDetection::Contiguous,
        };
        CodecOptions::new()
            .with_list_detection(list_detection)
            .with_max_depth(self.max_depth)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> pb_param::Result<String> {
    let options = cli.codec.options();
    match &cli.command {
        Command::Decode { wire, compact } => {
            let wire = input_or_stdin(wire.as_deref())?;
            let doc = pb_param::decode_with_options(wire.trim(), &options)?;
            let json = if *compact {
                serde_json::to_string(&doc)
            } else {
                serde_json::to_string_pretty(&doc)
            };
            json.map_err(Error::custom)
        }
        Command::Encode { json } => {
            let doc = read_document(json.as_deref())?;
            Ok(pb_param::encode_with_options(&doc, &options))
        }
        Command::Count { json } => {
            let doc = read_document(json.as_deref())?;
            Ok(pb_param::count_elements_with_options(&doc, &options).to_string())
        }
    }
}

fn read_document(arg: Option<&str>) -> pb_param::Result<Document> {
    let json = input_or_stdin(arg)?;
    serde_json::from_str(&json).map_err(Error::custom)
}

fn input_or_stdin(arg: Option<&str>) -> pb_param::Result<String> {
    match arg {
        Some(value) => Ok(value.to_string()),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| Error::io(&e.to_string()))?;
            Ok(buffer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_global_flags() {
        let cli = Cli::try_parse_from([
            "pbparam",
            "encode",
            "--list-detection",
            "contiguous",
            "--max-depth",
            "8",
            "{}",
        ])
        .unwrap();
        let options = cli.codec.options();
        assert_eq!(options.list_detection, ListDetection::Contiguous);
        assert_eq!(options.max_depth, 8);
    }

    #[test]
    fn test_run_decode_compact() {
        let cli = Cli::try_parse_from(["pbparam", "decode", "--compact", "!1m1!2b1!3i4"]).unwrap();
        assert_eq!(run(&cli).unwrap(), r#"{"1":{"2":"b1"},"3":"i4"}"#);
    }

    #[test]
    fn test_run_encode_and_count() {
        let json = r#"{"2":{"1":"sabc","7":"e81"},"7":{"1":"i50"}}"#;
        let cli = Cli::try_parse_from(["pbparam", "encode", json]).unwrap();
        assert_eq!(run(&cli).unwrap(), "!2m2!1sabc!7e81!7m1!1i50");

        let cli = Cli::try_parse_from(["pbparam", "count", json]).unwrap();
        assert_eq!(run(&cli).unwrap(), "5");
    }

    #[test]
    fn test_run_reports_bad_token() {
        let cli = Cli::try_parse_from(["pbparam", "decode", "!1i1!oops"]).unwrap();
        let err = run(&cli).unwrap_err();
        assert_eq!(err, Error::unknown_token(1, "oops"));
    }
}
