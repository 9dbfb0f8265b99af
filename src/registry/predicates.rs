//! Predicate capabilities.
//!
//! Each predicate takes the (already string-checked) input and its options
//! and answers whether the input passes. Semantics follow the `validator`
//! package's checks of the same name.

use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use serde_json::Value;
use uuid::Uuid;

use super::options::{
    as_number, as_text, bool_setting, number_setting, setting, BadOptions, OptionResult,
};

lazy_static! {
    static ref INT_PATTERN: Regex = Regex::new(r"^[-+]?(?:0|[1-9][0-9]*)$").unwrap();
    static ref INT_LEADING_ZEROES_PATTERN: Regex = Regex::new(r"^[-+]?[0-9]+$").unwrap();
    static ref FLOAT_PATTERN: Regex =
        Regex::new(r"^[-+]?(?:[0-9]+)?(?:\.[0-9]*)?(?:[eE][-+]?[0-9]+)?$").unwrap();
    static ref NUMERIC_PATTERN: Regex = Regex::new(r"^[-+]?(?:[0-9]*\.)?[0-9]+$").unwrap();
    static ref NUMERIC_NO_SYMBOLS_PATTERN: Regex = Regex::new(r"^[0-9]+$").unwrap();
    static ref DECIMAL_DIGITS_PATTERN: Regex = Regex::new(r"^[0-9]+(?:,[0-9]*)?$").unwrap();
    static ref ALPHA_PATTERN: Regex = Regex::new(r"^[A-Za-z]+$").unwrap();
    static ref ALPHANUMERIC_PATTERN: Regex = Regex::new(r"^[0-9A-Za-z]+$").unwrap();
    static ref HEX_PATTERN: Regex = Regex::new(r"^(?:0[xXhH])?[0-9a-fA-F]+$").unwrap();
    static ref EMAIL_PATTERN: Regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*\.[a-zA-Z]{2,}$"
    ).unwrap();
    static ref UUID_PATTERN: Regex = Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$"
    ).unwrap();
    static ref IPV4_PATTERN: Regex =
        Regex::new(r"^(?:(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])$").unwrap();
    static ref TLD_PATTERN: Regex = Regex::new(r"^[a-zA-Z]{2,}$").unwrap();
}

const MAX_EMAIL_LENGTH: usize = 254;
const MAX_URL_LENGTH: usize = 2083;
const VALID_PROTOCOLS: &[&str] = &["http", "https", "ftp"];

pub(crate) fn equals(input: &str, options: Option<&Value>) -> OptionResult<bool> {
    Ok(matches!(options, Some(Value::String(comparison)) if comparison == input))
}

pub(crate) fn contains(input: &str, options: Option<&Value>) -> OptionResult<bool> {
    Ok(input.contains(as_text(options).as_str()))
}

/// `matches` accepts a bare pattern or `{pattern, flags}` with flags from `ims`.
pub(crate) fn matches(input: &str, options: Option<&Value>) -> OptionResult<bool> {
    let (pattern, flags) = match options {
        Some(Value::String(p)) => (p.clone(), String::new()),
        Some(Value::Object(_)) => (
            setting(options, "pattern")
                .and_then(Value::as_str)
                .ok_or_else(|| BadOptions("pattern must be a string".to_string()))?
                .to_string(),
            setting(options, "flags")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        ),
        _ => return Err(BadOptions("a pattern is required".to_string())),
    };

    let mut builder = RegexBuilder::new(&pattern);
    for flag in flags.chars() {
        match flag {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            other => return Err(BadOptions(format!("unsupported regex flag '{}'", other))),
        };
    }
    let regex = builder
        .build()
        .map_err(|e| BadOptions(format!("invalid pattern: {}", e)))?;
    Ok(regex.is_match(input))
}

pub(crate) fn is_alpha(input: &str, _options: Option<&Value>) -> OptionResult<bool> {
    Ok(ALPHA_PATTERN.is_match(input))
}

pub(crate) fn is_alphanumeric(input: &str, _options: Option<&Value>) -> OptionResult<bool> {
    Ok(ALPHANUMERIC_PATTERN.is_match(input))
}

pub(crate) fn is_base64(input: &str, _options: Option<&Value>) -> OptionResult<bool> {
    Ok(input.len() % 4 == 0 && general_purpose::STANDARD.decode(input).is_ok())
}

/// Strict mode accepts `true`, `false`, `1`, `0`; `{loose: true}` also
/// accepts `yes`/`no` in any case.
pub(crate) fn is_boolean(input: &str, options: Option<&Value>) -> OptionResult<bool> {
    if matches!(input, "true" | "false" | "1" | "0") {
        return Ok(true);
    }
    if bool_setting(options, "loose")?.unwrap_or(false) {
        let lowered = input.to_lowercase();
        return Ok(matches!(lowered.as_str(), "true" | "false" | "yes" | "no"));
    }
    Ok(false)
}

/// `decimal_digits` is an exact count (`2`) or a range (`"1,"`, `"1,3"`).
pub(crate) fn is_decimal(input: &str, options: Option<&Value>) -> OptionResult<bool> {
    let digits = match setting(options, "decimal_digits") {
        None => "1,".to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(BadOptions("decimal_digits must be a number or string".to_string())),
    };
    if !DECIMAL_DIGITS_PATTERN.is_match(&digits) {
        return Err(BadOptions(format!("invalid decimal_digits '{}'", digits)));
    }
    let force_decimal = bool_setting(options, "force_decimal")?.unwrap_or(false);

    let fraction = format!(r"(\.[0-9]{{{}}})", digits);
    let pattern = if force_decimal {
        format!(r"^[-+]?([0-9]+)?{}$", fraction)
    } else {
        format!(r"^[-+]?([0-9]+)?{}?$", fraction)
    };
    let regex = Regex::new(&pattern).map_err(|e| BadOptions(e.to_string()))?;

    let compact: String = input.chars().filter(|c| *c != ' ').collect();
    if matches!(compact.as_str(), "" | "-" | "+") {
        return Ok(false);
    }
    Ok(regex.is_match(input))
}

pub(crate) fn is_email(input: &str, _options: Option<&Value>) -> OptionResult<bool> {
    Ok(input.len() <= MAX_EMAIL_LENGTH && EMAIL_PATTERN.is_match(input))
}

pub(crate) fn is_empty(input: &str, options: Option<&Value>) -> OptionResult<bool> {
    if bool_setting(options, "ignore_whitespace")?.unwrap_or(false) {
        return Ok(input.trim().is_empty());
    }
    Ok(input.is_empty())
}

/// Floats with optional `{min, max, gt, lt}` bounds.
pub(crate) fn is_float(input: &str, options: Option<&Value>) -> OptionResult<bool> {
    if matches!(input, "" | "." | "-" | "+") || !FLOAT_PATTERN.is_match(input) {
        return Ok(false);
    }
    match input.parse::<f64>() {
        Ok(value) => within_bounds(value, options),
        Err(_) => Ok(false),
    }
}

pub(crate) fn is_hexadecimal(input: &str, _options: Option<&Value>) -> OptionResult<bool> {
    Ok(HEX_PATTERN.is_match(input))
}

/// Membership in an array of allowed values, the keys of an object, or a
/// substring of a string.
pub(crate) fn is_in(input: &str, options: Option<&Value>) -> OptionResult<bool> {
    Ok(match options {
        Some(Value::Array(items)) => items.iter().any(|item| as_text(Some(item)) == input),
        Some(Value::Object(obj)) => obj.contains_key(input),
        Some(Value::String(s)) => s.contains(input),
        _ => false,
    })
}

/// Integers with optional `{min, max, gt, lt, allow_leading_zeroes}`.
pub(crate) fn is_int(input: &str, options: Option<&Value>) -> OptionResult<bool> {
    let allow_leading_zeroes = bool_setting(options, "allow_leading_zeroes")?.unwrap_or(true);
    let pattern: &Regex = if allow_leading_zeroes {
        &*INT_LEADING_ZEROES_PATTERN
    } else {
        &*INT_PATTERN
    };
    if !pattern.is_match(input) {
        return Ok(false);
    }
    match input.parse::<f64>() {
        Ok(value) => within_bounds(value, options),
        Err(_) => Ok(false),
    }
}

/// Dates and date-times in the ISO 8601 forms that turn up in records.
pub(crate) fn is_iso8601(input: &str, _options: Option<&Value>) -> OptionResult<bool> {
    Ok(parse_iso8601(input).is_some())
}

/// Objects and arrays only, unless `{allow_primitives: true}`.
pub(crate) fn is_json(input: &str, options: Option<&Value>) -> OptionResult<bool> {
    let allow_primitives = bool_setting(options, "allow_primitives")?.unwrap_or(false);
    Ok(match serde_json::from_str::<Value>(input) {
        Ok(Value::Object(_)) | Ok(Value::Array(_)) => true,
        Ok(Value::Null) | Ok(Value::Bool(_)) => allow_primitives,
        _ => false,
    })
}

/// Character length within `{min, max}`; a bare number is read as `min`.
pub(crate) fn is_length(input: &str, options: Option<&Value>) -> OptionResult<bool> {
    let (min, max) = match options {
        Some(Value::Object(_)) => (
            number_setting(options, "min")?.unwrap_or(0.0),
            number_setting(options, "max")?,
        ),
        Some(value) if value.is_number() => (as_number(value).unwrap_or(0.0), None),
        None | Some(Value::Null) => (0.0, None),
        Some(_) => return Err(BadOptions("expected {min, max}".to_string())),
    };
    let len = input.chars().count() as f64;
    Ok(len >= min && max.map_or(true, |max| len <= max))
}

pub(crate) fn is_lowercase(input: &str, _options: Option<&Value>) -> OptionResult<bool> {
    Ok(input == input.to_lowercase())
}

pub(crate) fn is_numeric(input: &str, options: Option<&Value>) -> OptionResult<bool> {
    if bool_setting(options, "no_symbols")?.unwrap_or(false) {
        return Ok(NUMERIC_NO_SYMBOLS_PATTERN.is_match(input));
    }
    Ok(NUMERIC_PATTERN.is_match(input))
}

pub(crate) fn is_uppercase(input: &str, _options: Option<&Value>) -> OptionResult<bool> {
    Ok(input == input.to_uppercase())
}

/// Hyphenated UUIDs; an optional version (`3`, `4`, `5`, or `"all"`).
pub(crate) fn is_uuid(input: &str, options: Option<&Value>) -> OptionResult<bool> {
    let version = match options {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s == "all" => None,
        Some(value) => match as_number(value) {
            Some(v) if [3.0, 4.0, 5.0].contains(&v) => Some(v as usize),
            _ => return Err(BadOptions(format!("unsupported UUID version {}", value))),
        },
    };
    if !UUID_PATTERN.is_match(input) {
        return Ok(false);
    }
    match Uuid::parse_str(input) {
        Ok(uuid) => Ok(version.map_or(true, |v| uuid.get_version_num() == v)),
        Err(_) => Ok(false),
    }
}

/// URLs with `{require_protocol, require_tld, require_host,
/// require_valid_protocol}`.
pub(crate) fn is_url(input: &str, options: Option<&Value>) -> OptionResult<bool> {
    let require_protocol = bool_setting(options, "require_protocol")?.unwrap_or(false);
    let require_tld = bool_setting(options, "require_tld")?.unwrap_or(true);
    let require_host = bool_setting(options, "require_host")?.unwrap_or(true);
    let require_valid_protocol = bool_setting(options, "require_valid_protocol")?.unwrap_or(true);

    if input.is_empty()
        || input.len() >= MAX_URL_LENGTH
        || input.chars().any(char::is_whitespace)
        || input.starts_with("mailto:")
        || input.starts_with("//")
    {
        return Ok(false);
    }

    let rest = match input.split_once("://") {
        Some((protocol, rest)) => {
            let protocol = protocol.to_lowercase();
            if require_valid_protocol && !VALID_PROTOCOLS.contains(&protocol.as_str()) {
                return Ok(false);
            }
            rest
        }
        None if require_protocol => return Ok(false),
        None => input,
    };

    let authority_end = rest.find(|c| matches!(c, '/' | '?' | '#')).unwrap_or(rest.len());
    let authority = &rest[..authority_end];
    if authority.is_empty() {
        return Ok(!require_host);
    }

    let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    let host = match host_port.rsplit_once(':') {
        Some((host, port)) => {
            match port.parse::<u32>() {
                Ok(p) if (1..=65535).contains(&p) => {}
                _ => return Ok(false),
            }
            host
        }
        None => host_port,
    };

    if IPV4_PATTERN.is_match(host) {
        return Ok(true);
    }
    Ok(is_fqdn(host, require_tld))
}

fn is_fqdn(host: &str, require_tld: bool) -> bool {
    let host = host.strip_suffix('.').unwrap_or(host);
    let labels: Vec<&str> = host.split('.').collect();
    if require_tld {
        if labels.len() < 2 {
            return false;
        }
        if !labels.last().map_or(false, |tld| TLD_PATTERN.is_match(tld)) {
            return false;
        }
    }
    labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

fn within_bounds(value: f64, options: Option<&Value>) -> OptionResult<bool> {
    let min = number_setting(options, "min")?;
    let max = number_setting(options, "max")?;
    let gt = number_setting(options, "gt")?;
    let lt = number_setting(options, "lt")?;
    Ok(min.map_or(true, |m| value >= m)
        && max.map_or(true, |m| value <= m)
        && gt.map_or(true, |m| value > m)
        && lt.map_or(true, |m| value < m))
}

/// Parse the ISO 8601 forms accepted by `isISO8601` and `toDate`.
pub(crate) fn parse_iso8601(input: &str) -> Option<DateTime<chrono::Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&chrono::Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_boolean() {
        assert_eq!(is_boolean("true", None), Ok(true));
        assert_eq!(is_boolean("0", None), Ok(true));
        assert_eq!(is_boolean("abcde", None), Ok(false));
        assert_eq!(is_boolean("Yes", None), Ok(false));
        assert_eq!(is_boolean("Yes", Some(&json!({"loose": true}))), Ok(true));
    }

    #[test]
    fn test_is_decimal_digits() {
        assert_eq!(is_decimal("1.01", Some(&json!({"decimal_digits": 2}))), Ok(true));
        assert_eq!(is_decimal("1.01", Some(&json!({"decimal_digits": 1}))), Ok(false));
        assert_eq!(is_decimal("1.01", None), Ok(true));
        assert_eq!(is_decimal("-", None), Ok(false));
        assert_eq!(is_decimal("12", Some(&json!({"force_decimal": true}))), Ok(false));
        assert!(is_decimal("1.0", Some(&json!({"decimal_digits": "x"}))).is_err());
    }

    #[test]
    fn test_is_int_bounds() {
        assert_eq!(is_int("12345", None), Ok(true));
        assert_eq!(is_int("12.5", None), Ok(false));
        assert_eq!(is_int("007", None), Ok(true));
        assert_eq!(is_int("007", Some(&json!({"allow_leading_zeroes": false}))), Ok(false));
        assert_eq!(is_int("5", Some(&json!({"min": 1, "max": 4}))), Ok(false));
        assert_eq!(is_int("4", Some(&json!({"min": 1, "max": 4}))), Ok(true));
    }

    #[test]
    fn test_is_float() {
        assert_eq!(is_float("1.5e3", None), Ok(true));
        assert_eq!(is_float(".5", None), Ok(true));
        assert_eq!(is_float(".", None), Ok(false));
        assert_eq!(is_float("abc", None), Ok(false));
        assert_eq!(is_float("2.5", Some(&json!({"gt": 2.5}))), Ok(false));
    }

    #[test]
    fn test_is_length() {
        assert_eq!(is_length("12345", Some(&json!({"min": 5, "max": 5}))), Ok(true));
        assert_eq!(is_length("12345", Some(&json!({"min": 6, "max": 6}))), Ok(false));
        assert_eq!(is_length("héllo", Some(&json!({"max": 5}))), Ok(true));
        assert_eq!(is_length("ab", Some(&json!(3))), Ok(false));
        assert!(is_length("ab", Some(&json!("3"))).is_err());
    }

    #[test]
    fn test_is_email() {
        assert_eq!(is_email("ops@example.com", None), Ok(true));
        assert_eq!(is_email("not-an-email", None), Ok(false));
        assert_eq!(is_email("a@b", None), Ok(false));
    }

    #[test]
    fn test_is_url() {
        assert_eq!(is_url("https://example.com/path?q=1", None), Ok(true));
        assert_eq!(is_url("example.com", None), Ok(true));
        assert_eq!(is_url("example.com", Some(&json!({"require_protocol": true}))), Ok(false));
        assert_eq!(is_url("http://localhost:8080", None), Ok(false));
        assert_eq!(
            is_url("http://localhost:8080", Some(&json!({"require_tld": false}))),
            Ok(true)
        );
        assert_eq!(is_url("gopher://example.com", None), Ok(false));
        assert_eq!(is_url("http://example.com:99999", None), Ok(false));
        assert_eq!(is_url("http://10.0.0.1/x", None), Ok(true));
    }

    #[test]
    fn test_is_uuid() {
        let v4 = "a3bb189e-8bf9-4888-9912-ace4e6543002";
        assert_eq!(is_uuid(v4, None), Ok(true));
        assert_eq!(is_uuid(v4, Some(&json!(4))), Ok(true));
        assert_eq!(is_uuid(v4, Some(&json!(3))), Ok(false));
        assert_eq!(is_uuid("a3bb189e8bf948889912ace4e6543002", None), Ok(false));
        assert!(is_uuid(v4, Some(&json!(9))).is_err());
    }

    #[test]
    fn test_is_in_and_equals() {
        assert_eq!(is_in("b", Some(&json!(["a", "b"]))), Ok(true));
        assert_eq!(is_in("c", Some(&json!(["a", "b"]))), Ok(false));
        assert_eq!(is_in("1", Some(&json!([1, 2]))), Ok(true));
        assert_eq!(equals("abc", Some(&json!("abc"))), Ok(true));
        assert_eq!(equals("abc", None), Ok(false));
    }

    #[test]
    fn test_matches_flags() {
        assert_eq!(matches("ABC", Some(&json!("^abc$"))), Ok(false));
        assert_eq!(
            matches("ABC", Some(&json!({"pattern": "^abc$", "flags": "i"}))),
            Ok(true)
        );
        assert!(matches("abc", Some(&json!("("))).is_err());
        assert!(matches("abc", None).is_err());
    }

    #[test]
    fn test_misc_predicates() {
        assert_eq!(is_base64("aGVsbG8=", None), Ok(true));
        assert_eq!(is_base64("aGVsbG8", None), Ok(false));
        assert_eq!(is_hexadecimal("0xdeadBEEF", None), Ok(true));
        assert_eq!(is_json(r#"{"a": 1}"#, None), Ok(true));
        assert_eq!(is_json("true", None), Ok(false));
        assert_eq!(is_iso8601("2026-01-29T00:00:00Z", None), Ok(true));
        assert_eq!(is_iso8601("2026-01-29", None), Ok(true));
        assert_eq!(is_iso8601("29/01/2026", None), Ok(false));
        assert_eq!(is_empty("  ", Some(&json!({"ignore_whitespace": true}))), Ok(true));
        assert_eq!(is_numeric("-1.5", None), Ok(true));
        assert_eq!(is_numeric("-1.5", Some(&json!({"no_symbols": true}))), Ok(false));
    }
}
