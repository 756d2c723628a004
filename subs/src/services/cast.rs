use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use uuid::Uuid;

/// Strings pass through; numbers and booleans take their JSON spelling.
pub fn to_text(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(format!("{} is not a valid string", other)),
    }
}

/// Accepts JSON numbers and numeric strings.
pub fn to_number(value: &Value) -> Result<f64, String> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| format!("{} is not a valid number", value))
}

/// Parses an RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC).
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Accepts date strings and integer epoch milliseconds.
pub fn to_date(value: &Value) -> Result<DateTime<Utc>, String> {
    let parsed = match value {
        Value::String(s) => parse_date(s),
        Value::Number(n) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    };
    parsed.ok_or_else(|| format!("{} is not a valid date", value))
}

pub fn to_uuid(value: &Value) -> Result<Uuid, String> {
    value
        .as_str()
        .and_then(|s| Uuid::parse_str(s.trim()).ok())
        .ok_or_else(|| format!("{} is not a valid identifier", value))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn dates_accept_plain_and_full_forms() {
        let midnight = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(to_date(&json!("2024-01-01")), Ok(midnight));
        assert_eq!(to_date(&json!("2024-01-01T00:00:00Z")), Ok(midnight));
        assert_eq!(
            to_date(&json!("2024-01-01T02:00:00+02:00")),
            Ok(midnight)
        );
        assert_eq!(to_date(&json!(midnight.timestamp_millis())), Ok(midnight));
        assert!(to_date(&json!("01/01/2024")).is_err());
        assert!(to_date(&json!("2024-02-30")).is_err());
        assert!(to_date(&json!(true)).is_err());
    }

    #[test]
    fn numbers_accept_numeric_strings() {
        assert_eq!(to_number(&json!(12.5)), Ok(12.5));
        assert_eq!(to_number(&json!(" 7 ")), Ok(7.0));
        assert!(to_number(&json!("abc")).is_err());
        assert!(to_number(&json!([1])).is_err());
    }

    #[test]
    fn text_and_identifiers() {
        assert_eq!(to_text(&json!(42)), Ok("42".to_string()));
        assert!(to_text(&json!({ "a": 1 })).is_err());

        let id = Uuid::new_v4();
        assert_eq!(to_uuid(&json!(id.to_string())), Ok(id));
        assert!(to_uuid(&json!("65f1c2a9e4b0a1b2c3d4e5f6")).is_err());
        assert!(to_uuid(&json!(7)).is_err());
    }
}
