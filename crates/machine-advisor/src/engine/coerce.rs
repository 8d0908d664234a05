use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Total coercion from an arbitrary catalog value into a metric reading.
///
/// Numbers and numeric strings pass through; anything else (null, booleans,
/// text, negative or non-finite numbers) becomes `0.0`.
pub fn to_non_negative_real(raw: &Value) -> f64 {
    let parsed = match raw {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    sanitize(parsed)
}

/// String form of [`to_non_negative_real`], used for CSV cells.
pub fn parse_non_negative_real(raw: &str) -> f64 {
    sanitize(raw.trim().parse::<f64>().ok())
}

fn sanitize(value: Option<f64>) -> f64 {
    match value {
        Some(value) if value.is_finite() && value >= 0.0 => value,
        _ => 0.0,
    }
}

/// Serde adapter so metric and weight fields never reject a payload.
pub(crate) fn lenient_real<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().map(to_non_negative_real).unwrap_or(0.0))
}
