//! Repeated tags, duplicate keys and list detection.
//!
//! Run with: cargo run --example repeated_fields

use pb_param::{
    decode, encode, encode_with_options, CodecOptions, Document, ListDetection, Scalar,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Repeated tags decode into suffixed keys
    let doc = decode("!20m2!1e3!1e6")?;
    let filters = doc.get_message("20").ok_or("missing field 20")?;
    for (key, field) in filters {
        println!("{} = {}", key, field);
    }

    // Build the same thing with push
    let mut filters = Document::new();
    filters.push("1", Scalar::enumeration(3));
    filters.push("1", Scalar::enumeration(6));
    let mut rebuilt = Document::new();
    rebuilt.insert("20", filters);
    assert_eq!(encode(&rebuilt), "!20m2!1e3!1e6");

    // A 0..n-1 keyed group, with and without list detection
    let mut items = Document::new();
    items.insert("0", Scalar::enumeration(3));
    items.insert("1", Scalar::enumeration(6));
    let mut grouped = Document::new();
    grouped.insert("1", items);
    let mut doc = Document::new();
    doc.insert("20", grouped);

    println!("disabled:   {}", encode(&doc));
    let options = CodecOptions::new().with_list_detection(ListDetection::Contiguous);
    println!("contiguous: {}", encode_with_options(&doc, &options));

    Ok(())
}
