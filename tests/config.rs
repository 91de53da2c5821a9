#![allow(missing_docs)]

#[macro_use]
mod common;

use common::*;
use querytrace::{ConfigError, Error, TracerConfig};

#[test]
fn toml_document_deserializes() {
    init_test_logging();
    test_phase!("toml_document_deserializes");

    let config: TracerConfig = toml::from_str(
        r#"
        set_transaction_name = true
        trace_scalars = false
        "#,
    )
    .expect("valid toml");

    assert_with_log!(
        config.set_transaction_name,
        "set_transaction_name",
        true,
        config.set_transaction_name
    );
    assert!(!config.trace_scalars);
    test_complete!("toml_document_deserializes");
}

#[test]
fn toml_rejects_unknown_settings() {
    init_test_logging();
    let result = toml::from_str::<TracerConfig>("trace_everything = true\n");
    assert!(result.is_err());
}

#[test]
fn config_round_trips_through_json() {
    let config = TracerConfig::default().with_trace_scalars(true);
    let json = serde_json::to_value(&config).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({ "set_transaction_name": false, "trace_scalars": true })
    );
}

#[test]
fn pair_errors_convert_to_crate_error() {
    init_test_logging();
    let err: Error = TracerConfig::from_pairs(["set_transaction_name=perhaps"])
        .map_err(Error::from)
        .unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::InvalidBool { .. })));
    assert_eq!(
        err.to_string(),
        "invalid boolean for `set_transaction_name`: `perhaps`"
    );
}
