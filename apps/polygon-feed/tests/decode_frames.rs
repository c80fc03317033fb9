//! Frame Decoding Integration Tests
//!
//! Decodes whole frames through the public codec API.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use proptest::prelude::*;
use serde_json::{Value, json};
use test_case::test_case;

use polygon_feed::{
    AssetClass, CryptoEvent, DecodeError, Event, Frame, FrameMode, PolygonCodec, RecordKind,
    StocksEvent, encode_record,
};

fn decode_all(asset_class: AssetClass, text: &str) -> Vec<Result<Event, DecodeError>> {
    PolygonCodec::json(asset_class).decode_text(text).unwrap()
}

#[test]
fn equities_trade_frame() {
    let results = decode_all(
        AssetClass::Equities,
        r#"[{"ev":"T","sym":"AAPL","p":150.25,"s":100,"c":[12],"t":1690000000000}]"#,
    );
    assert_eq!(results.len(), 1);

    let Ok(Event::Stocks(StocksEvent::Trade(trade))) = &results[0] else {
        panic!("expected stock trade, got {:?}", results[0]);
    };
    assert_eq!(trade.ticker.as_deref(), Some("AAPL"));
    assert_eq!(trade.price, Some(150.25));
    assert_eq!(trade.size, Some(100.0));
    assert_eq!(trade.conditions, vec![12]);
    assert_eq!(trade.timestamp_millis, Some(1_690_000_000_000));
    assert_eq!(
        trade.timestamp().map(|t| t.timestamp_millis()),
        Some(1_690_000_000_000)
    );
}

#[test]
fn unrecognized_crypto_tag() {
    let results = decode_all(AssetClass::Crypto, r#"[{"ev":"XQ","pair":"BTC-USD"}]"#);
    assert_eq!(results.len(), 1);
    let err = results[0].as_ref().unwrap_err();
    assert_eq!(err.tag(), Some("XQ"));
    assert!(matches!(
        err,
        DecodeError::UnknownEventType {
            asset_class: AssetClass::Crypto,
            ..
        }
    ));
}

#[test]
fn non_array_frame() {
    let err = PolygonCodec::json(AssetClass::Equities)
        .decode_text(r#"{"not":"an array"}"#)
        .unwrap_err();
    assert_eq!(err.frame, Frame::from(r#"{"not":"an array"}"#));
}

#[test_case(AssetClass::Equities ; "equities")]
#[test_case(AssetClass::Forex ; "forex")]
#[test_case(AssetClass::Crypto ; "crypto")]
fn status_under_any_asset_class(asset_class: AssetClass) {
    let results = decode_all(asset_class, r#"[{"ev":"status","status":"auth_success"}]"#);
    let Ok(Event::Status(status)) = &results[0] else {
        panic!("expected status, got {:?}", results[0]);
    };
    assert!(status.is_auth_success());
    assert_eq!(results[0].as_ref().unwrap().kind(), RecordKind::Status);
}

#[test_case(AssetClass::Equities, "T", RecordKind::Trade)]
#[test_case(AssetClass::Equities, "Q", RecordKind::Quote)]
#[test_case(AssetClass::Equities, "A", RecordKind::Aggregate)]
#[test_case(AssetClass::Equities, "AM", RecordKind::Aggregate)]
#[test_case(AssetClass::Forex, "C", RecordKind::Quote)]
#[test_case(AssetClass::Forex, "CA", RecordKind::Aggregate)]
#[test_case(AssetClass::Forex, "CAS", RecordKind::Aggregate)]
#[test_case(AssetClass::Crypto, "XT", RecordKind::Trade)]
#[test_case(AssetClass::Crypto, "XQT", RecordKind::Quote)]
#[test_case(AssetClass::Crypto, "XA", RecordKind::Aggregate)]
#[test_case(AssetClass::Crypto, "XAS", RecordKind::Aggregate)]
#[test_case(AssetClass::Crypto, "XS", RecordKind::ConsolidatedQuote)]
#[test_case(AssetClass::Crypto, "XL2", RecordKind::Level2Tick)]
fn tag_selects_kind(asset_class: AssetClass, tag: &str, kind: RecordKind) {
    let event = PolygonCodec::json(asset_class)
        .decode_record(&json!({ "ev": tag }))
        .unwrap();
    assert_eq!(event.kind(), kind);
    assert_eq!(event.asset_class(), Some(asset_class));
    assert_eq!(event.event_type(), Some(tag));
}

#[test_case(AssetClass::Equities, "XT" ; "crypto tag under equities")]
#[test_case(AssetClass::Forex, "T" ; "equities tag under forex")]
#[test_case(AssetClass::Crypto, "CA" ; "forex tag under crypto")]
fn tag_from_other_asset_class_is_unknown(asset_class: AssetClass, tag: &str) {
    let err = PolygonCodec::json(asset_class)
        .decode_record(&json!({ "ev": tag }))
        .unwrap_err();
    assert_eq!(err.tag(), Some(tag));
}

#[test]
fn mixed_frame_keeps_order_and_errors() {
    let results = decode_all(
        AssetClass::Crypto,
        r#"[
            {"ev":"XT","pair":"BTC-USD","p":6495.9,"s":0.01},
            {"ev":"XL2","pair":"BTC-USD","b":"not a book"},
            "bare string",
            {"ev":"XS","pair":"ETH-USD","bp":200.1,"ap":200.2}
        ]"#,
    );

    assert_eq!(results.len(), 4);
    assert_eq!(results[0].as_ref().unwrap().symbol(), Some("BTC-USD"));
    assert!(matches!(
        results[1],
        Err(DecodeError::FieldTypeMismatch { field: "b", .. })
    ));
    assert!(matches!(
        results[2],
        Err(DecodeError::UnknownEventType { tag: None, .. })
    ));
    let Ok(Event::Crypto(CryptoEvent::ConsolidatedQuote(quote))) = &results[3] else {
        panic!("expected consolidated quote, got {:?}", results[3]);
    };
    assert_eq!(quote.bid_price, Some(200.1));
}

#[test]
fn unknown_fields_are_ignored() {
    let results = decode_all(
        AssetClass::Forex,
        r#"[{"ev":"C","p":"EUR/USD","a":1.1,"b":1.09,"z":"extra","nested":{"k":1}}]"#,
    );
    assert_eq!(results[0].as_ref().unwrap().symbol(), Some("EUR/USD"));
}

#[test]
fn raw_mode_frame_is_one_event() {
    let codec = PolygonCodec::new(AssetClass::Equities, FrameMode::Raw);
    let results = codec
        .decode(&Frame::from(r#"[{"ev":"T"},{"ev":"Q"}]"#))
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].as_ref().unwrap().kind(),
        RecordKind::RawUnclassified
    );
}

// =============================================================================
// Properties
// =============================================================================

fn trade_record() -> impl Strategy<Value = Value> {
    (
        "[A-Z]{1,5}",
        -1.0e6_f64..1.0e6,
        0_u32..1_000_000,
        proptest::collection::vec(0_i32..100, 0..4),
        0_i64..2_000_000_000_000,
    )
        .prop_map(|(sym, p, s, c, t)| {
            json!({"ev": "T", "sym": sym, "p": p, "s": s, "c": c, "t": t})
        })
}

fn price() -> impl Strategy<Value = f64> {
    0.0_f64..1.0e6
}

fn minute_aggregate_record() -> impl Strategy<Value = Value> {
    (
        "[A-Z]{1,5}",
        (0_u32..10_000_000, 0_u64..1_000_000_000),
        (price(), price(), price(), price(), price()),
        0_i64..2_000_000_000_000,
    )
        .prop_map(|(sym, (v, av), (o, c, h, l, vw), s)| {
            json!({
                "ev": "AM", "sym": sym, "v": v, "av": av, "vw": vw,
                "o": o, "c": c, "h": h, "l": l, "s": s, "e": s + 60_000,
            })
        })
}

fn level2_record() -> impl Strategy<Value = Value> {
    let levels = || proptest::collection::vec((price(), 0.0_f64..1.0e4), 0..6);
    (
        "[A-Z]{2,4}-USD",
        levels(),
        levels(),
        0_i64..2_000_000_000_000,
        0_i64..100,
    )
        .prop_map(|(pair, b, a, t, x)| {
            let pairs = |levels: Vec<(f64, f64)>| -> Vec<[f64; 2]> {
                levels.into_iter().map(|(p, s)| [p, s]).collect()
            };
            json!({
                "ev": "XL2", "pair": pair, "b": pairs(b), "a": pairs(a),
                "t": t, "x": x, "r": t + 5,
            })
        })
}

fn any_record() -> impl Strategy<Value = Value> {
    prop_oneof![
        trade_record(),
        "[A-Z]{1,3}".prop_map(|tag| json!({ "ev": tag })),
        Just(json!({"ev": "Q", "bp": "wrong"})),
        Just(json!(null)),
        Just(json!({"ev": "status", "status": "connected"})),
    ]
}

proptest! {
    #[test]
    fn decoding_is_deterministic(record in trade_record()) {
        let codec = PolygonCodec::json(AssetClass::Equities);
        prop_assert_eq!(codec.decode_record(&record), codec.decode_record(&record));
    }

    #[test]
    fn one_result_per_record(records in proptest::collection::vec(any_record(), 0..20)) {
        let text = serde_json::to_string(&records).unwrap();
        let results = PolygonCodec::json(AssetClass::Equities).decode_text(&text).unwrap();
        prop_assert_eq!(results.len(), records.len());
    }

    #[test]
    fn encoded_trade_decodes_to_same_event(record in trade_record()) {
        let codec = PolygonCodec::json(AssetClass::Equities);
        let event = codec.decode_record(&record).unwrap();
        let wire = encode_record(&event).unwrap();
        prop_assert_eq!(codec.decode_record(&wire).unwrap(), event);
    }

    #[test]
    fn encoded_minute_aggregate_decodes_to_same_event(record in minute_aggregate_record()) {
        let codec = PolygonCodec::json(AssetClass::Equities);
        let event = codec.decode_record(&record).unwrap();
        prop_assert_eq!(event.kind(), RecordKind::Aggregate);
        let wire = encode_record(&event).unwrap();
        prop_assert_eq!(codec.decode_record(&wire).unwrap(), event);
    }

    #[test]
    fn encoded_level2_tick_decodes_to_same_event(record in level2_record()) {
        let codec = PolygonCodec::json(AssetClass::Crypto);
        let event = codec.decode_record(&record).unwrap();
        prop_assert_eq!(event.kind(), RecordKind::Level2Tick);
        let wire = encode_record(&event).unwrap();
        prop_assert_eq!(codec.decode_record(&wire).unwrap(), event);
    }
}
