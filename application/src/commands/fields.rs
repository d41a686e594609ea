//! Shared field specs and keyword-argument helpers for the wrappers.

use airline_domain::command::{CommandError, FieldConstraint, FieldSpec, field_value, require};
use serde_json::{Value, json};

pub const RESERVATION_ID_PATTERN: &str = r"^[A-Z0-9]{6}$";
pub const AIRPORT_PATTERN: &str = r"^[A-Z]{3}$";
pub const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";
pub const PAYMENT_ID_PATTERN: &str = r"^(credit_card|gift_card|certificate)_\d+$";
pub const USER_ID_PATTERN: &str = r"^[a-z_0-9]+$";

pub const FLIGHT_TYPES: &[&str] = &["one_way", "round_trip"];
pub const CABINS: &[&str] = &["basic_economy", "economy", "business"];
pub const INSURANCE: &[&str] = &["yes", "no"];

pub const MAX_BAGGAGES: f64 = 20.0;

pub fn reservation_id(description: &'static str, available_from: &[&'static str]) -> FieldSpec {
    FieldSpec::new("reservation_id", description)
        .with_constraint(FieldConstraint::pattern(RESERVATION_ID_PATTERN))
        .with_examples(&["ZFA04Y", "4WQ150", "VAAOXJ"])
        .available_from(available_from)
}

pub fn user_id(description: &'static str) -> FieldSpec {
    FieldSpec::new("user_id", description)
        .with_constraint(FieldConstraint::pattern(USER_ID_PATTERN))
        .with_examples(&["sara_doe_496", "mia_li_3668", "chen_jackson_3290"])
        .available_from(&["get_user_details"])
}

pub fn airport(
    name: &'static str,
    description: &'static str,
    examples: &[&'static str],
) -> FieldSpec {
    FieldSpec::new(name, description)
        .with_constraint(FieldConstraint::pattern(AIRPORT_PATTERN))
        .with_examples(examples)
        .available_from(&["list_all_airports"])
}

pub fn date(description: &'static str) -> FieldSpec {
    FieldSpec::new("date", description)
        .with_constraint(FieldConstraint::pattern(DATE_PATTERN))
        .with_examples(&["2024-05-16", "2024-05-20", "2024-05-25"])
}

pub fn payment_id(description: &'static str) -> FieldSpec {
    FieldSpec::new("payment_id", description)
        .with_constraint(FieldConstraint::pattern(PAYMENT_ID_PATTERN))
        .with_examples(&["credit_card_4421486", "gift_card_1234567", "certificate_7504069"])
        .available_from(&["get_user_details", "get_reservation_details"])
}

pub fn cabin(description: &'static str) -> FieldSpec {
    FieldSpec::new("cabin", description)
        .with_constraint(FieldConstraint::one_of(CABINS))
        .with_examples(CABINS)
}

pub fn baggage_count(name: &'static str, description: &'static str) -> FieldSpec {
    FieldSpec::new(name, description)
        .with_constraint(FieldConstraint::range(0.0, MAX_BAGGAGES))
        .with_examples(&["0", "1", "2"])
        .available_from(&["get_reservation_details"])
}

/// Copy a present field into `kwargs`, or fail with a missing parameter.
pub fn put_required(
    kwargs: &mut serde_json::Map<String, Value>,
    params: &Value,
    name: &str,
) -> Result<(), CommandError> {
    kwargs.insert(name.to_string(), require(params, name)?.clone());
    Ok(())
}

/// Copy a field into `kwargs`, falling back to `default` when absent.
pub fn put_or(
    kwargs: &mut serde_json::Map<String, Value>,
    params: &Value,
    name: &str,
    default: Value,
) {
    let value = field_value(params, name).cloned().unwrap_or(default);
    kwargs.insert(name.to_string(), value);
}

/// Build tool kwargs from required fields only.
pub fn required_kwargs(params: &Value, names: &[&str]) -> Result<Value, CommandError> {
    let mut kwargs = serde_json::Map::new();
    for name in names {
        put_required(&mut kwargs, params, name)?;
    }
    Ok(Value::Object(kwargs))
}

/// Empty list default for array fields.
pub fn empty_list() -> Value {
    json!([])
}
