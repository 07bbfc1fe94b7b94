//! Decode a captured pb parameter and inspect it.
//!
//! Run with: cargo run --example decode_request

use pb_param::{decode, encode, Field};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let wire = "!1m4!1sLIST!2e1!3m1!1e1!2e2!3e2!4i500!6m3!1sTOKEN!7e81!28e2!8i3!16b1";

    let doc = decode(wire)?;
    println!("JSON view:\n{}\n", serde_json::to_string_pretty(&doc)?);

    let page_size = doc.get_scalar("4").and_then(|s| s.as_i64());
    println!("page size: {:?}", page_size);

    let list_id = doc
        .get_path(&["1", "1"])
        .and_then(Field::as_scalar)
        .and_then(|s| s.as_str());
    println!("list id: {:?}", list_id);

    assert_eq!(encode(&doc), wire);
    println!("✓ Re-encoded byte for byte");

    Ok(())
}
