use serde_json::Value;
use shared::models::Field;

// 2^63; every f64 strictly below it in magnitude fits an i64.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Loose numeric coercion for form fields and path segments.
///
/// A missing value is not a number. Blank text is zero. Surrounding whitespace
/// is ignored, and decimal or exponent notation is accepted when the value is
/// integral and fits an `i64`. Everything else yields `None`.
pub fn to_number(raw: Option<&str>) -> Option<i64> {
    let text = raw?.trim();
    if text.is_empty() {
        return Some(0);
    }
    if let Ok(n) = text.parse::<i64>() {
        return Some(n);
    }
    text.parse::<f64>().ok().and_then(integral)
}

/// [`to_number`] as a stored field: failures become not-a-number.
pub fn number_field(raw: Option<&str>) -> Field<i64> {
    to_number(raw).map_or(Field::NotANumber, Field::Value)
}

/// Numeric coercion of an arbitrary JSON value, as applied to a JSON body
/// posted to the form endpoint.
pub fn json_number(value: Option<&Value>) -> Field<i64> {
    let n = match value {
        None => None,
        Some(Value::Null) => Some(0),
        Some(Value::Bool(b)) => Some(i64::from(*b)),
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Some(Value::String(s)) => to_number(Some(s)),
        Some(Value::Array(_) | Value::Object(_)) => None,
    };
    n.map_or(Field::NotANumber, Field::Value)
}

fn integral(n: f64) -> Option<i64> {
    (n.is_finite() && n.fract() == 0.0 && n >= -I64_BOUND && n < I64_BOUND).then_some(n as i64)
}
