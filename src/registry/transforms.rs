//! Transform capabilities.
//!
//! Transforms take the (already string-checked) input and produce a new
//! value. Conversions that cannot parse their input yield `null` rather than
//! failing, the way the `validator` package yields `NaN`/`null`.

use serde_json::Value;

use super::options::{flag, BadOptions, OptionResult};
use super::predicates::{is_float, parse_iso8601};

/// Characters rewritten by `escape`, paired with their entities.
const HTML_ENTITIES: &[(char, &str)] = &[
    ('&', "&amp;"),
    ('"', "&quot;"),
    ('\'', "&#x27;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('/', "&#x2F;"),
    ('\\', "&#x5C;"),
    ('`', "&#96;"),
];

pub(crate) fn trim(input: &str, options: Option<&Value>) -> OptionResult<Value> {
    let trimmed = match trim_set(options)? {
        Some(chars) => input.trim_matches(|c: char| chars.contains(&c)),
        None => input.trim(),
    };
    Ok(Value::String(trimmed.to_string()))
}

pub(crate) fn ltrim(input: &str, options: Option<&Value>) -> OptionResult<Value> {
    let trimmed = match trim_set(options)? {
        Some(chars) => input.trim_start_matches(|c: char| chars.contains(&c)),
        None => input.trim_start(),
    };
    Ok(Value::String(trimmed.to_string()))
}

pub(crate) fn rtrim(input: &str, options: Option<&Value>) -> OptionResult<Value> {
    let trimmed = match trim_set(options)? {
        Some(chars) => input.trim_end_matches(|c: char| chars.contains(&c)),
        None => input.trim_end(),
    };
    Ok(Value::String(trimmed.to_string()))
}

/// Strict mode (`true`) maps only `1` and `true` to `true`. Otherwise
/// anything except `0`, `false` (any case) and the empty string is `true`.
pub(crate) fn to_boolean(input: &str, options: Option<&Value>) -> OptionResult<Value> {
    let result = if flag(options) {
        input == "1" || input == "true"
    } else {
        input != "0" && !input.eq_ignore_ascii_case("false") && !input.is_empty()
    };
    Ok(Value::Bool(result))
}

/// Leading-integer parse with an optional radix (2..=36), `null` when no
/// digits are found.
pub(crate) fn to_int(input: &str, options: Option<&Value>) -> OptionResult<Value> {
    let radix = match options {
        None | Some(Value::Null) => 10,
        Some(value) => match value.as_u64() {
            Some(r) if (2..=36).contains(&r) => r as u32,
            _ => return Err(BadOptions(format!("radix must be between 2 and 36, got {}", value))),
        },
    };

    let trimmed = input.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let unsigned = if radix == 16 {
        unsigned
            .strip_prefix("0x")
            .or_else(|| unsigned.strip_prefix("0X"))
            .unwrap_or(unsigned)
    } else {
        unsigned
    };

    let digits: String = unsigned.chars().take_while(|c| c.is_digit(radix)).collect();
    if digits.is_empty() {
        return Ok(Value::Null);
    }
    match i64::from_str_radix(&digits, radix) {
        Ok(n) => Ok(Value::from(if negative { -n } else { n })),
        Err(_) => Ok(Value::Null),
    }
}

pub(crate) fn to_float(input: &str, _options: Option<&Value>) -> OptionResult<Value> {
    if !is_float(input, None)? {
        return Ok(Value::Null);
    }
    Ok(input.parse::<f64>().map(Value::from).unwrap_or(Value::Null))
}

/// ISO 8601 or RFC 2822 input rendered as an RFC 3339 UTC timestamp.
pub(crate) fn to_date(input: &str, _options: Option<&Value>) -> OptionResult<Value> {
    let parsed = parse_iso8601(input).or_else(|| {
        chrono::DateTime::parse_from_rfc2822(input)
            .ok()
            .map(|dt| dt.with_timezone(&chrono::Utc))
    });
    Ok(parsed
        .map(|dt| Value::String(dt.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)))
        .unwrap_or(Value::Null))
}

pub(crate) fn escape(input: &str, _options: Option<&Value>) -> OptionResult<Value> {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match HTML_ENTITIES.iter().find(|(raw, _)| *raw == c) {
            Some((_, entity)) => out.push_str(entity),
            None => out.push(c),
        }
    }
    Ok(Value::String(out))
}

/// Inverse of `escape`; `&amp;` is resolved last so `&amp;lt;` stays `&lt;`.
pub(crate) fn unescape(input: &str, _options: Option<&Value>) -> OptionResult<Value> {
    let mut out = input.to_string();
    for (raw, entity) in HTML_ENTITIES.iter().skip(1) {
        out = out.replace(entity, &raw.to_string());
    }
    Ok(Value::String(out.replace("&amp;", "&")))
}

/// Remove ASCII control characters; `true` keeps `\n` and `\r`.
pub(crate) fn strip_low(input: &str, options: Option<&Value>) -> OptionResult<Value> {
    let keep_new_lines = flag(options);
    let stripped: String = input
        .chars()
        .filter(|c| {
            let low = (*c as u32) < 0x20 || *c == '\x7f';
            !low || (keep_new_lines && (*c == '\n' || *c == '\r'))
        })
        .collect();
    Ok(Value::String(stripped))
}

pub(crate) fn blacklist(input: &str, options: Option<&Value>) -> OptionResult<Value> {
    let chars = required_chars(options)?;
    Ok(Value::String(input.chars().filter(|c| !chars.contains(*c)).collect()))
}

pub(crate) fn whitelist(input: &str, options: Option<&Value>) -> OptionResult<Value> {
    let chars = required_chars(options)?;
    Ok(Value::String(input.chars().filter(|c| chars.contains(*c)).collect()))
}

/// Characters to strip; `None` means whitespace.
fn trim_set(options: Option<&Value>) -> OptionResult<Option<Vec<char>>> {
    match options {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(chars)) if chars.is_empty() => Ok(None),
        Some(Value::String(chars)) => Ok(Some(chars.chars().collect())),
        Some(_) => Err(BadOptions("trim characters must be a string".to_string())),
    }
}

fn required_chars(options: Option<&Value>) -> OptionResult<String> {
    match options {
        Some(Value::String(chars)) => Ok(chars.clone()),
        _ => Err(BadOptions("a string of characters is required".to_string())),
    }
}
