use contentful_model::{
    DISCRIMINATOR_ORDER, Error, MinMax, PredefinedValue, SizeBounds, Validation, mime_type,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn decode(value: serde_json::Value) -> Validation {
    Validation::decode(value).unwrap()
}

// ── Decoding by discriminating key ───────────────────────────────

#[test]
fn decodes_unique() {
    assert_eq!(decode(json!({"unique": true})), Validation::unique(true));
    assert_eq!(decode(json!({"unique": false})), Validation::unique(false));
}

#[test]
fn decodes_size_with_message() {
    let v = decode(json!({"size": {"min": 1, "max": 50}, "message": "too long"}));
    assert_eq!(v, Validation::size(Some(1), Some(50)).with_message("too long"));
    assert_eq!(v.message(), Some("too long"));
}

#[test]
fn decodes_size_with_one_bound() {
    match decode(json!({"size": {"max": 10}})) {
        Validation::Size(size) => {
            assert_eq!(size.size, SizeBounds { min: None, max: Some(10) });
            assert!(size.message.is_none());
        }
        other => panic!("expected size, got {other:?}"),
    }
}

#[test]
fn decodes_regex() {
    let v = decode(json!({"regex": {"pattern": "^a+$", "flags": "i"}}));
    assert_eq!(v, Validation::regex("^a+$", Some("i".into())));
}

#[test]
fn decodes_legacy_regexp_key() {
    let v = decode(json!({"regexp": {"pattern": "^a+$"}, "message": "letters"}));
    assert_eq!(v, Validation::regex("^a+$", None).with_message("letters"));
    // Written back under the canonical key.
    assert_eq!(
        v.encode().unwrap(),
        json!({"regex": {"pattern": "^a+$"}, "message": "letters"})
    );
}

#[test]
fn decodes_predefined_values_keeping_types() {
    let v = decode(json!({"in": [20, 1.5, "twenty", true]}));
    match v {
        Validation::PredefinedValues(p) => assert_eq!(
            p.allowed,
            vec![
                PredefinedValue::Integer(20),
                PredefinedValue::Number(1.5),
                PredefinedValue::Text("twenty".into()),
                PredefinedValue::Boolean(true),
            ]
        ),
        other => panic!("expected in, got {other:?}"),
    }
}

#[test]
fn predefined_values_keep_large_unsigned_exact() {
    let raw = json!({"in": [18446744073709551615u64, -1, 7]});
    let v = decode(raw.clone());
    match &v {
        Validation::PredefinedValues(p) => assert_eq!(
            p.allowed,
            vec![
                PredefinedValue::Unsigned(u64::MAX),
                PredefinedValue::Integer(-1),
                PredefinedValue::Integer(7),
            ]
        ),
        other => panic!("expected in, got {other:?}"),
    }
    assert_eq!(v.encode().unwrap(), raw);
    assert_eq!(PredefinedValue::from(7u64), PredefinedValue::Integer(7));
}

#[test]
fn decodes_range() {
    let v = decode(json!({"range": {"min": 20, "max": 30}, "message": "msg"}));
    assert_eq!(v, Validation::range(MinMax::new(20.0, 30.0)).with_message("msg"));
}

#[test]
fn decodes_date_range() {
    let v = decode(json!({"dateRange": {"min": "2017-01-01"}}));
    assert_eq!(v, Validation::date_range(Some("2017-01-01".into()), None));
}

#[test]
fn decodes_link_content_type() {
    let v = decode(json!({"linkContentType": ["a", "b"]}));
    assert_eq!(v, Validation::link_content_types(["a", "b"]));
}

#[test]
fn decodes_mime_type_group() {
    let v = decode(json!({"linkMimetypeGroup": ["image", "pdfdocument"]}));
    assert_eq!(
        v,
        Validation::mime_type_groups([mime_type::IMAGE, mime_type::PDF])
    );
}

#[test]
fn decodes_dimensions() {
    let v = decode(json!({
        "assetImageDimensions": {"width": {"min": 100}, "height": {"max": 300}},
        "message": "msg"
    }));
    assert_eq!(
        v,
        Validation::dimensions(Some(MinMax::at_least(100.0)), Some(MinMax::at_most(300.0)))
            .with_message("msg")
    );
}

#[test]
fn decodes_file_size() {
    let v = decode(json!({"assetFileSize": {"min": 30, "max": 400}}));
    assert_eq!(v, Validation::file_size(MinMax::new(30.0, 400.0)));
}

// ── Resolution order ─────────────────────────────────────────────

#[test]
fn discriminator_order_is_fixed() {
    assert_eq!(
        DISCRIMINATOR_ORDER,
        [
            "unique",
            "size",
            "regex",
            "in",
            "range",
            "dateRange",
            "linkContentType",
            "linkMimetypeGroup",
            "assetImageDimensions",
            "assetFileSize",
        ]
    );
}

#[test]
fn earlier_key_wins_when_two_are_present() {
    // Not something the server sends; the earlier key in the order decides.
    let v = decode(json!({"range": {"min": 1}, "unique": true}));
    assert_eq!(v, Validation::unique(true));

    let v = decode(json!({"assetFileSize": {"max": 5}, "size": {"max": 3}}));
    assert_eq!(v, Validation::size(None, Some(3)));
}

// ── Unknown validations ──────────────────────────────────────────

#[test]
fn unknown_shape_decodes_to_sentinel() {
    let raw = json!({"nodes": {"entry-hyperlink": []}, "message": "custom"});
    let v = decode(raw.clone());
    assert!(v.is_unknown());
    assert_eq!(v.key(), None);
    assert_eq!(v.message(), Some("custom"));
    assert_eq!(v.encode().unwrap(), raw);
}

#[test]
fn empty_object_is_unknown() {
    let v = decode(json!({}));
    assert!(v.is_unknown());
    assert_eq!(v.encode().unwrap(), json!({}));
}

// ── Decode failures ──────────────────────────────────────────────

#[test]
fn non_object_is_rejected() {
    let err = Validation::decode(json!("unique")).unwrap_err();
    assert!(matches!(err, Error::ValidationNotObject(_)));
    assert!(err.to_string().contains("a string"));
}

#[test]
fn malformed_payload_under_known_key_is_rejected() {
    let err = Validation::decode(json!({"size": "big"})).unwrap_err();
    match err {
        Error::InvalidValidation { key, .. } => assert_eq!(key, "size"),
        other => panic!("expected InvalidValidation, got {other:?}"),
    }
}

#[test]
fn malformed_validation_fails_serde_deserialize() {
    let result: Result<Vec<Validation>, _> =
        serde_json::from_value(json!([{"unique": true}, {"linkContentType": "x"}]));
    let err = result.unwrap_err();
    assert!(err.to_string().contains("linkContentType"));
}

// ── Encoding ─────────────────────────────────────────────────────

#[test]
fn encode_omits_absent_message_and_bounds() {
    assert_eq!(
        Validation::size(None, Some(5)).encode().unwrap(),
        json!({"size": {"max": 5}})
    );
    assert_eq!(
        Validation::file_size(MinMax::at_least(1.0)).encode().unwrap(),
        json!({"assetFileSize": {"min": 1.0}})
    );
}

#[test]
fn encode_dimension_never_writes_missing_sides() {
    let v = Validation::dimensions(Some(MinMax::at_least(100.0)), Some(MinMax::at_most(300.0)));
    let encoded = v.encode().unwrap();
    let dims = &encoded["assetImageDimensions"];
    assert_eq!(dims["width"]["min"], json!(100.0));
    assert!(dims["width"].get("max").is_none());
    assert!(dims["height"].get("min").is_none());
    assert_eq!(dims["height"]["max"], json!(300.0));
    assert!(encoded.get("message").is_none());
}

#[test]
fn encode_predefined_values_preserves_order_and_types() {
    let v = Validation::predefined_values([
        PredefinedValue::from(22),
        PredefinedValue::from("x"),
        PredefinedValue::from(20),
    ])
    .with_message("msg2");
    assert_eq!(
        v.encode().unwrap(),
        json!({"in": [22, "x", 20], "message": "msg2"})
    );
}

#[test]
fn server_messages_survive_on_every_variant() {
    let cases = [
        json!({"unique": true, "message": "must be unique"}),
        json!({"linkContentType": ["post"], "message": "pick a post"}),
        json!({"linkMimetypeGroup": ["image"], "message": "images only"}),
        json!({"assetFileSize": {"max": 1024.0}, "message": "too big"}),
    ];
    for raw in cases {
        let v = decode(raw.clone());
        assert!(!v.is_unknown());
        assert!(v.message().is_some());
        assert_eq!(v.encode().unwrap(), raw);
    }
}

#[test]
fn with_message_sets_override_on_every_variant() {
    let v = Validation::unique(true).with_message("dup");
    assert_eq!(v.message(), Some("dup"));
    assert_eq!(v.encode().unwrap(), json!({"unique": true, "message": "dup"}));

    let v = Validation::link_content_types(["post"]).with_message("pick a post");
    assert_eq!(
        decode(json!({"linkContentType": ["post"], "message": "pick a post"})),
        v
    );

    let v = decode(json!({"nodes": {}})).with_message("custom");
    assert_eq!(v.message(), Some("custom"));
    assert_eq!(v.encode().unwrap(), json!({"nodes": {}, "message": "custom"}));
}

#[test]
fn text_round_trip_through_serde() {
    let list = vec![
        Validation::unique(false),
        Validation::range(MinMax::new(20.0, 30.0)).with_message("msg"),
        Validation::predefined_values([20, 21, 22]).with_message("msg2"),
        Validation::mime_type_groups(mime_type::ALL),
    ];
    let text = serde_json::to_string(&list).unwrap();
    let back: Vec<Validation> = serde_json::from_str(&text).unwrap();
    assert_eq!(back, list);
}

#[test]
fn key_matches_encoded_key() {
    let all = vec![
        Validation::unique(true),
        Validation::size(Some(1), None),
        Validation::regex("x", None),
        Validation::predefined_values(["a"]),
        Validation::range(MinMax::default()),
        Validation::date_range(None, None),
        Validation::link_content_types(["ct"]),
        Validation::mime_type_groups(["image"]),
        Validation::dimensions(None, None),
        Validation::file_size(MinMax::default()),
    ];
    for (v, expected) in all.iter().zip(DISCRIMINATOR_ORDER) {
        assert_eq!(v.key(), Some(expected));
        assert!(v.encode().unwrap().get(expected).is_some());
    }
}
