#![allow(clippy::expect_used)]

use std::time::Duration;

use super::*;
use crate::enums::NoteKind;

#[test]
fn error_keys_use_wire_spelling() {
    assert_eq!(ErrorKey::IncorrectTotal.code(), "incorrect_total");
    assert_eq!(
        ErrorKey::ValueNotEqualToPreviousPeriodOnBalanceSheet.code(),
        "value_not_equal_to_previous_period_on_balance_sheet"
    );
    assert_eq!(ErrorKey::ShareholdersMismatch.code(), "shareholders.mismatch");
    assert_eq!(ErrorKey::MembersFundsMismatch.code(), "membersFunds.mismatch");
    assert_eq!(ErrorKey::DateInvalid.to_string(), "date_invalid");
}

#[test]
fn json_path_builds_dotted_locations() {
    let path = JsonPath::root("stocks").field("current_period").field("total");
    assert_eq!(path.as_str(), "$.stocks.current_period.total");
    assert_eq!(JsonPath::document().to_string(), "$");
}

#[test]
fn errors_serialise_as_wire_document() {
    let mut errors = Errors::new();
    errors.push(
        ErrorKey::IncorrectTotal,
        JsonPath::root("stocks").field("current_period").field("total"),
    );
    let value = serde_json::to_value(&errors).expect("serialize");
    assert_eq!(
        value,
        serde_json::json!({
            "errors": [{
                "error": "incorrect_total",
                "location": "$.stocks.current_period.total",
                "location_type": "json-path",
                "type": "ch:validation"
            }]
        })
    );
}

#[test]
fn errors_preserve_insertion_order() {
    let mut first = Errors::new();
    first.push(ErrorKey::ValueRequired, JsonPath::root("b"));
    let mut second = Errors::new();
    second.push(ErrorKey::ValueRequired, JsonPath::root("a"));
    second.push(ErrorKey::DateInvalid, JsonPath::root("c"));
    first.extend(second);

    let locations: Vec<&str> = first.iter().map(|e| e.location.as_str()).collect();
    assert_eq!(locations, vec!["$.b", "$.a", "$.c"]);
    assert_eq!(first.by_key(ErrorKey::ValueRequired).count(), 2);
    assert!(first.has_errors());
    assert_eq!((&first).into_iter().count(), first.len());
}

#[test]
fn validation_error_displays_key_and_location() {
    let error = ValidationError::new(ErrorKey::UnexpectedData, JsonPath::root("x"));
    assert_eq!(error.to_string(), "unexpected_data at $.x");
}

#[test]
fn data_error_reports_service_error_against_request_body() {
    let err = DataError::Fetch {
        resource: "stocks",
        what: "filer classification",
        source: GatewayError::Timeout(Duration::from_millis(250)),
    };
    assert_eq!(
        err.to_string(),
        "validating stocks: could not fetch filer classification"
    );

    let errors = err.to_service_errors();
    let value = serde_json::to_value(&errors).expect("serialize");
    assert_eq!(
        value,
        serde_json::json!({
            "errors": [{
                "error": "service_unavailable",
                "location": "$",
                "location_type": "request-body",
                "type": "ch:service"
            }]
        })
    );
}

#[test]
fn body_mismatch_names_both_kinds() {
    let err = DataError::body_mismatch(NoteKind::Stocks, NoteKind::Debtors);
    assert_eq!(
        err.to_string(),
        "validator for stocks was handed a debtors body"
    );
}

#[test]
fn gross_profit_convention_round_trips_snake_case() {
    let value =
        serde_json::to_value(GrossProfitConvention::TurnoverPlusCostOfSales).expect("serialize");
    assert_eq!(value, serde_json::json!("turnover_plus_cost_of_sales"));
    assert_eq!(
        GrossProfitConvention::default(),
        GrossProfitConvention::TurnoverLessCostOfSales
    );
}
