//! Build a request parameter from scratch.
//!
//! Run with: cargo run --example build_request

use pb_param::{count_elements, document, encode, Scalar};

fn main() {
    let session = "TOKEN";
    let (lat, lng) = (44.4268, 26.1025);

    let doc = document!({
        "1": { "4": { "3": Scalar::double(lat), "4": Scalar::double(lng) } },
        "12": { "2": { "1": Scalar::int(272), "2": Scalar::int(120), "4": Scalar::int(8) } },
        "14": { "1": Scalar::string(session), "7": Scalar::enumeration(81) },
        "21": {},
        "22": { "1": Scalar::enumeration(81) }
    });

    let wire = encode(&doc);
    println!("pb={}", wire);
    println!("{} tokens", count_elements(&doc));
}
