use serde_json::Value;

/// Loose numeric conversion used for backend payload fields.
///
/// Numbers pass through, strings are parsed after trimming (blank means `0`),
/// booleans map to `1`/`0` and a single-element array converts its element.
/// Everything else is not a number and yields `None`.
pub fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_str(s),
        Value::Array(items) => match items.as_slice() {
            [] => Some(0.0),
            [single @ (Value::Number(_) | Value::String(_))] => to_number(single),
            _ => None,
        },
        Value::Object(_) => None,
    }
}

pub fn number_or_zero(value: &Value) -> f64 {
    to_number(value).unwrap_or(0.0)
}

pub fn parse_numeric_str(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    let parsed = match trimmed {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        other if other.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') => {
            return None;
        }
        other => other.parse::<f64>().ok()?,
    };

    if parsed.is_nan() { None } else { Some(parsed) }
}

/// Integral identifiers; `0` is a valid id.
pub fn to_integer_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| f as i64)
        }),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<i64>().ok()
        }
        _ => None,
    }
}

pub fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n.as_f64().unwrap_or_default(), n),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn format_number(f: f64, n: &serde_json::Number) -> String {
    if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 {
        format!("{}", f as i64)
    } else {
        n.to_string()
    }
}
