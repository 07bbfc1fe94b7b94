use pb_param::{
    count_elements, count_elements_with_options, decode, encode, encode_with_options, tokenize,
    CodecOptions, Document, Error, Field, ListDetection, Scalar,
};

fn keys(doc: &Document) -> Vec<&str> {
    doc.keys().map(String::as_str).collect()
}

#[test]
fn test_duplicate_numbering() {
    let doc = decode("1b1!1b0").unwrap();
    assert_eq!(keys(&doc), vec!["1", "1_1"]);
    assert_eq!(doc.get_scalar("1").map(Scalar::to_string), Some("b1".into()));
    assert_eq!(doc.get_scalar("1_1").map(Scalar::to_string), Some("b0".into()));
}

#[test]
fn test_duplicate_counter_shared_across_tags() {
    let doc = decode("!1i1!1i2!2i3!2i4!1i5").unwrap();
    assert_eq!(keys(&doc), vec!["1", "1_1", "2", "2_2", "1_3"]);
}

#[test]
fn test_duplicate_counter_restarts_per_message() {
    let doc = decode("!5i1!5i2!6m2!5i3!5i4").unwrap();
    assert_eq!(keys(&doc), vec!["5", "5_1", "6"]);
    assert_eq!(keys(doc.get_message("6").unwrap()), vec!["5", "5_1"]);
}

#[test]
fn test_repeated_messages() {
    let doc = decode("!4m1!1e1!4m1!1e3!4m1!1e4").unwrap();
    assert_eq!(keys(&doc), vec!["4", "4_1", "4_2"]);
    let values: Vec<_> = doc
        .occurrences("4")
        .filter_map(Field::as_message)
        .filter_map(|m| m.get_scalar("1"))
        .map(Scalar::to_string)
        .collect();
    assert_eq!(values, vec!["e1", "e3", "e4"]);
    assert_eq!(encode(&doc), "!4m1!1e1!4m1!1e3!4m1!1e4");
}

#[test]
fn test_nested_message_consumes_header_and_children() {
    let wire = "!1i0!6m2!1ifoo!2dbar!9b1";
    let doc = decode(wire).unwrap();
    assert_eq!(keys(&doc), vec!["1", "6", "9"]);

    let inner = doc.get_message("6").unwrap();
    assert_eq!(inner.get_scalar("1").map(Scalar::to_string), Some("ifoo".into()));
    assert_eq!(inner.get_scalar("2").map(Scalar::to_string), Some("dbar".into()));
    // header plus its two children
    assert_eq!(1 + count_elements(inner), 3);
}

#[test]
fn test_empty_message_round_trip() {
    let mut doc = Document::new();
    doc.insert("21", Document::new());
    assert_eq!(encode(&doc), "!21m0");

    let back = decode("!21m0").unwrap();
    assert_eq!(back.get_message("21"), Some(&Document::new()));
    assert_eq!(back, doc);
}

#[test]
fn test_empty_message_between_fields() {
    let doc = decode("!1m0!2i1").unwrap();
    assert_eq!(keys(&doc), vec!["1", "2"]);
    assert!(doc.get_message("1").unwrap().is_empty());
}

#[test]
fn test_malformed_token_rejection() {
    for (wire, index, token) in [
        ("xyz", 0, "xyz"),
        ("!1i1!xyz", 1, "xyz"),
        ("!1i1!2", 1, "2"),
        ("!1q7", 0, "1q7"),
        ("!1m1!m1", 1, "m1"),
    ] {
        assert_eq!(
            decode(wire).unwrap_err(),
            Error::unknown_token(index, token),
            "decoding {wire:?}"
        );
    }
}

#[test]
fn test_encode_prefixing() {
    let mut doc = Document::new();
    doc.insert("1", "itest".parse::<Scalar>().unwrap());
    assert_eq!(encode(&doc), "!1itest");
    assert_eq!(encode(&Document::new()), "!");
}

#[test]
fn test_encode_strips_duplicate_suffix_only() {
    let mut doc = Document::new();
    doc.insert("3", Scalar::int(1));
    doc.insert("3_7", Scalar::int(2));
    doc.insert("30", Scalar::int(3));
    assert_eq!(encode(&doc), "!3i1!3i2!30i3");
}

#[test]
fn test_count_parse_agreement() {
    for wire in [
        "!1m0",
        "!1m1!1i1",
        "!1m3!1m1!1b1!2b0",
        "!13m13!7m9!1m3!1e1!2b0!3e3!1m3!1e2!2b1!3e2!2b1!20m2!1e3!1e6!21m0",
    ] {
        let doc = decode(wire).unwrap();
        assert_eq!(count_elements(&doc), tokenize(wire).len(), "{wire}");
        for field in doc.values() {
            if let Some(message) = field.as_message() {
                let header = encode(&{
                    let mut d = Document::new();
                    d.insert("1", message.clone());
                    d
                });
                assert_eq!(tokenize(&header).len(), 1 + count_elements(message));
            }
        }
    }
}

#[test]
fn test_list_group_flattened_when_enabled() {
    let mut items = Document::new();
    items.insert("0", Scalar::enumeration(3));
    items.insert("1", Scalar::enumeration(6));
    let mut inner = Document::new();
    inner.insert("1", items);
    let mut doc = Document::new();
    doc.insert("20", inner);

    let options = CodecOptions::new().with_list_detection(ListDetection::Contiguous);
    let wire = encode_with_options(&doc, &options);
    assert_eq!(wire, "!20m2!1e3!1e6");
    assert_eq!(count_elements_with_options(&doc, &options), 3);

    // decoding yields the suffix form, not the 0..n-1 group
    let back = decode(&wire).unwrap();
    let group = back.get_message("20").unwrap();
    assert_eq!(keys(group), vec!["1", "1_1"]);
}

#[test]
fn test_list_group_not_flattened_by_default() {
    let mut items = Document::new();
    items.insert("0", Scalar::enumeration(3));
    items.insert("1", Scalar::enumeration(6));
    let mut doc = Document::new();
    doc.insert("1", items);

    assert_eq!(encode(&doc), "!1m2!0e3!1e6");
    assert_eq!(decode("!1m2!0e3!1e6").unwrap(), doc);
}
