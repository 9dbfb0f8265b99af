//! Capability table.
//!
//! Every sanitizer and validator a field definition may name is a variant of
//! [`Capability`]. Names are resolved once, when definitions are bound, so the
//! hydrate path dispatches through a `match` instead of a name lookup.

use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;
use serde_json::Value;

use crate::error::{value_kind, CapabilityError};

use super::options::{is_truthy, BadOptions, OptionResult};
use super::{predicates, transforms};

type PredicateFn = fn(&str, Option<&Value>) -> OptionResult<bool>;
type TransformFn = fn(&str, Option<&Value>) -> OptionResult<Value>;

/// What a capability produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityKind {
    /// Answers pass/fail; used as a sanitizer it yields a boolean value.
    Predicate,
    /// Produces a new value; used as a validator its output's truthiness counts.
    Transform,
}

#[derive(Clone, Copy)]
enum Handler {
    Predicate(PredicateFn),
    Transform(TransformFn),
}

/// A named sanitizer or validator.
///
/// Sanitizers and validators share this single namespace, so any capability
/// may appear in either list of a field definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    // Predicates
    Equals,
    Contains,
    Matches,
    IsAlpha,
    IsAlphanumeric,
    IsBase64,
    IsBoolean,
    IsDecimal,
    IsEmail,
    IsEmpty,
    IsFloat,
    IsHexadecimal,
    IsIn,
    IsInt,
    IsIso8601,
    IsJson,
    IsLength,
    IsLowercase,
    IsNumeric,
    IsUrl,
    IsUppercase,
    IsUuid,
    // Transforms
    Blacklist,
    Escape,
    Ltrim,
    Rtrim,
    StripLow,
    ToBoolean,
    ToDate,
    ToFloat,
    ToInt,
    Trim,
    Unescape,
    Whitelist,
}

impl Capability {
    pub const ALL: &'static [Capability] = &[
        Capability::Equals,
        Capability::Contains,
        Capability::Matches,
        Capability::IsAlpha,
        Capability::IsAlphanumeric,
        Capability::IsBase64,
        Capability::IsBoolean,
        Capability::IsDecimal,
        Capability::IsEmail,
        Capability::IsEmpty,
        Capability::IsFloat,
        Capability::IsHexadecimal,
        Capability::IsIn,
        Capability::IsInt,
        Capability::IsIso8601,
        Capability::IsJson,
        Capability::IsLength,
        Capability::IsLowercase,
        Capability::IsNumeric,
        Capability::IsUrl,
        Capability::IsUppercase,
        Capability::IsUuid,
        Capability::Blacklist,
        Capability::Escape,
        Capability::Ltrim,
        Capability::Rtrim,
        Capability::StripLow,
        Capability::ToBoolean,
        Capability::ToDate,
        Capability::ToFloat,
        Capability::ToInt,
        Capability::Trim,
        Capability::Unescape,
        Capability::Whitelist,
    ];

    /// The method name used in field definitions.
    pub fn name(self) -> &'static str {
        match self {
            Capability::Equals => "equals",
            Capability::Contains => "contains",
            Capability::Matches => "matches",
            Capability::IsAlpha => "isAlpha",
            Capability::IsAlphanumeric => "isAlphanumeric",
            Capability::IsBase64 => "isBase64",
            Capability::IsBoolean => "isBoolean",
            Capability::IsDecimal => "isDecimal",
            Capability::IsEmail => "isEmail",
            Capability::IsEmpty => "isEmpty",
            Capability::IsFloat => "isFloat",
            Capability::IsHexadecimal => "isHexadecimal",
            Capability::IsIn => "isIn",
            Capability::IsInt => "isInt",
            Capability::IsIso8601 => "isISO8601",
            Capability::IsJson => "isJSON",
            Capability::IsLength => "isLength",
            Capability::IsLowercase => "isLowercase",
            Capability::IsNumeric => "isNumeric",
            Capability::IsUrl => "isURL",
            Capability::IsUppercase => "isUppercase",
            Capability::IsUuid => "isUUID",
            Capability::Blacklist => "blacklist",
            Capability::Escape => "escape",
            Capability::Ltrim => "ltrim",
            Capability::Rtrim => "rtrim",
            Capability::StripLow => "stripLow",
            Capability::ToBoolean => "toBoolean",
            Capability::ToDate => "toDate",
            Capability::ToFloat => "toFloat",
            Capability::ToInt => "toInt",
            Capability::Trim => "trim",
            Capability::Unescape => "unescape",
            Capability::Whitelist => "whitelist",
        }
    }

    /// Resolve a method name. Names are case-sensitive.
    pub fn from_name(name: &str) -> Option<Capability> {
        CAPABILITIES_BY_NAME.get(name).copied()
    }

    pub fn kind(self) -> CapabilityKind {
        match self.handler() {
            Handler::Predicate(_) => CapabilityKind::Predicate,
            Handler::Transform(_) => CapabilityKind::Transform,
        }
    }

    fn handler(self) -> Handler {
        use Handler::{Predicate, Transform};
        match self {
            Capability::Equals => Predicate(predicates::equals),
            Capability::Contains => Predicate(predicates::contains),
            Capability::Matches => Predicate(predicates::matches),
            Capability::IsAlpha => Predicate(predicates::is_alpha),
            Capability::IsAlphanumeric => Predicate(predicates::is_alphanumeric),
            Capability::IsBase64 => Predicate(predicates::is_base64),
            Capability::IsBoolean => Predicate(predicates::is_boolean),
            Capability::IsDecimal => Predicate(predicates::is_decimal),
            Capability::IsEmail => Predicate(predicates::is_email),
            Capability::IsEmpty => Predicate(predicates::is_empty),
            Capability::IsFloat => Predicate(predicates::is_float),
            Capability::IsHexadecimal => Predicate(predicates::is_hexadecimal),
            Capability::IsIn => Predicate(predicates::is_in),
            Capability::IsInt => Predicate(predicates::is_int),
            Capability::IsIso8601 => Predicate(predicates::is_iso8601),
            Capability::IsJson => Predicate(predicates::is_json),
            Capability::IsLength => Predicate(predicates::is_length),
            Capability::IsLowercase => Predicate(predicates::is_lowercase),
            Capability::IsNumeric => Predicate(predicates::is_numeric),
            Capability::IsUrl => Predicate(predicates::is_url),
            Capability::IsUppercase => Predicate(predicates::is_uppercase),
            Capability::IsUuid => Predicate(predicates::is_uuid),
            Capability::Blacklist => Transform(transforms::blacklist),
            Capability::Escape => Transform(transforms::escape),
            Capability::Ltrim => Transform(transforms::ltrim),
            Capability::Rtrim => Transform(transforms::rtrim),
            Capability::StripLow => Transform(transforms::strip_low),
            Capability::ToBoolean => Transform(transforms::to_boolean),
            Capability::ToDate => Transform(transforms::to_date),
            Capability::ToFloat => Transform(transforms::to_float),
            Capability::ToInt => Transform(transforms::to_int),
            Capability::Trim => Transform(transforms::trim),
            Capability::Unescape => Transform(transforms::unescape),
            Capability::Whitelist => Transform(transforms::whitelist),
        }
    }

    /// Run the capability. Predicates yield `Value::Bool`.
    ///
    /// Every built-in capability operates on text; any other input variant
    /// is rejected with [`CapabilityError::ExpectedString`].
    pub fn invoke(self, value: &Value, options: Option<&Value>) -> Result<Value, CapabilityError> {
        let input = value.as_str().ok_or(CapabilityError::ExpectedString {
            method: self.name(),
            received: value_kind(value),
        })?;

        let result = match self.handler() {
            Handler::Predicate(check) => check(input, options).map(Value::Bool),
            Handler::Transform(transform) => transform(input, options),
        };

        result.map_err(|BadOptions(reason)| CapabilityError::InvalidOptions {
            method: self.name(),
            reason,
        })
    }

    /// Run the capability as a validator: pass/fail by truthiness of the result.
    pub fn check(self, value: &Value, options: Option<&Value>) -> Result<bool, CapabilityError> {
        self.invoke(value, options).map(|result| is_truthy(&result))
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

lazy_static! {
    static ref CAPABILITIES_BY_NAME: HashMap<&'static str, Capability> = Capability::ALL
        .iter()
        .map(|capability| (capability.name(), *capability))
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_names_round_trip_through_table() {
        assert_eq!(CAPABILITIES_BY_NAME.len(), Capability::ALL.len());
        for capability in Capability::ALL {
            assert_eq!(Capability::from_name(capability.name()), Some(*capability));
        }
    }

    #[test]
    fn test_unknown_and_case_sensitive_names() {
        assert_eq!(Capability::from_name("hfewlkjewlhfwe"), None);
        assert_eq!(Capability::from_name("IsBoolean"), None);
        assert_eq!(Capability::from_name("isBoolean"), Some(Capability::IsBoolean));
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Capability::IsBoolean.kind(), CapabilityKind::Predicate);
        assert_eq!(Capability::Rtrim.kind(), CapabilityKind::Transform);
    }

    #[test]
    fn test_invoke_rejects_non_string_input() {
        let err = Capability::Rtrim.invoke(&json!(true), None).unwrap_err();
        assert_eq!(
            err,
            CapabilityError::ExpectedString {
                method: "rtrim",
                received: "a boolean"
            }
        );
    }

    #[test]
    fn test_invoke_maps_bad_options() {
        let err = Capability::Matches.invoke(&json!("abc"), None).unwrap_err();
        assert!(matches!(
            err,
            CapabilityError::InvalidOptions { method: "matches", .. }
        ));
    }

    #[test]
    fn test_predicate_as_sanitizer_and_transform_as_validator() {
        assert_eq!(
            Capability::Equals.invoke(&json!("a"), Some(&json!("a"))),
            Ok(json!(true))
        );
        assert_eq!(Capability::ToBoolean.check(&json!("1"), None), Ok(true));
        assert_eq!(Capability::Trim.check(&json!("   "), None), Ok(false));
    }
}
