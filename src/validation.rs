use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{ Deserialize, Deserializer, Serialize };
use serde_json::Value;

/// Rule a submitted field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    String,
    Email,
    Integer,
    Numeric,
    Boolean,
    Positive,
    AtLeastOne,
    TooLarge,
    Unique,
    Exists,
}

impl Rule {
    pub fn message(&self, field: &str) -> String {
        let label = field.replace('_', " ");
        match self {
            Rule::Required => format!("The {} field is required.", label),
            Rule::String => format!("The {} must be a string.", label),
            Rule::Email => format!("The {} must be a valid email address.", label),
            Rule::Integer => format!("The {} must be an integer.", label),
            Rule::Numeric => format!("The {} must be a number.", label),
            Rule::Boolean => format!("The {} field must be true or false.", label),
            Rule::Positive => format!("The {} must be greater than 0.", label),
            Rule::AtLeastOne => format!("The {} must be at least 1.", label),
            Rule::TooLarge => format!("The {} is too large.", label),
            Rule::Unique => format!("The {} has already been taken.", label),
            Rule::Exists => format!("The selected {} is invalid.", label),
        }
    }
}

/// Messages per offending field, serialized as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, rule: Rule) {
        self.0.entry(field.to_string()).or_default().push(rule.message(field));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Collects errors across all fields of a payload so the caller sees every
/// problem at once instead of the first one.
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A field that must be present and valid.
    pub fn required<T>(
        &mut self,
        field: &str,
        value: Option<&Value>,
        parse: fn(&Value) -> Result<T, Rule>
    ) -> Option<T> {
        match value {
            None => {
                self.errors.add(field, Rule::Required);
                None
            }
            Some(value) => self.check(field, value, parse),
        }
    }

    /// A field that may be omitted. When supplied it must be valid; an
    /// explicit `null` counts as an empty value.
    pub fn optional<T>(
        &mut self,
        field: &str,
        value: Option<&Value>,
        parse: fn(&Value) -> Result<T, Rule>
    ) -> Option<T> {
        value.and_then(|value| self.check(field, value, parse))
    }

    pub fn reject(&mut self, field: &str, rule: Rule) {
        self.errors.add(field, rule);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() { Ok(()) } else { Err(self.errors) }
    }

    fn check<T>(
        &mut self,
        field: &str,
        value: &Value,
        parse: fn(&Value) -> Result<T, Rule>
    ) -> Option<T> {
        match parse(value) {
            Ok(parsed) => Some(parsed),
            Err(rule) => {
                self.errors.add(field, rule);
                None
            }
        }
    }
}

/// Keeps an explicit `null` as `Some(Value::Null)` so it is validated as an
/// empty value instead of being treated as an omitted field. Pair with
/// `#[serde(default)]`.
pub fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
    where D: Deserializer<'de>
{
    Value::deserialize(deserializer).map(Some)
}

pub fn parse_string(value: &Value) -> Result<String, Rule> {
    match value {
        Value::Null => Err(Rule::Required),
        Value::String(s) if s.trim().is_empty() => Err(Rule::Required),
        Value::String(s) => Ok(s.trim().to_string()),
        _ => Err(Rule::String),
    }
}

pub fn parse_email(value: &Value) -> Result<String, Rule> {
    let email = parse_string(value)?;
    if is_valid_email(&email) { Ok(email) } else { Err(Rule::Email) }
}

pub fn parse_integer(value: &Value) -> Result<i32, Rule> {
    match value {
        Value::Null => Err(Rule::Required),
        Value::Number(n) =>
            n
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .ok_or(Rule::Integer),
        Value::String(s) if s.trim().is_empty() => Err(Rule::Required),
        Value::String(s) => s.trim().parse::<i32>().map_err(|_| Rule::Integer),
        _ => Err(Rule::Integer),
    }
}

/// Numbers are read from their JSON text so `0.05` stays exactly `0.05`.
pub fn parse_decimal(value: &Value) -> Result<Decimal, Rule> {
    let text = match value {
        Value::Null => {
            return Err(Rule::Required);
        }
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => {
            return Err(Rule::Numeric);
        }
    };

    if text.is_empty() {
        return Err(Rule::Required);
    }

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| Rule::Numeric)
}

pub fn parse_boolean(value: &Value) -> Result<bool, Rule> {
    match value {
        Value::Null => Err(Rule::Required),
        Value::Bool(b) => Ok(*b),
        Value::Number(n) =>
            match n.as_i64() {
                Some(1) => Ok(true),
                Some(0) => Ok(false),
                _ => Err(Rule::Boolean),
            }
        Value::String(s) =>
            match s.trim() {
                "" => Err(Rule::Required),
                "1" | "true" => Ok(true),
                "0" | "false" => Ok(false),
                _ => Err(Rule::Boolean),
            }
        _ => Err(Rule::Boolean),
    }
}

pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 &&
        labels
            .iter()
            .all(|label| {
                !label.is_empty() &&
                    !label.starts_with('-') &&
                    !label.ends_with('-') &&
                    label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("jane.doe@example.com"));
        assert!(is_valid_email("a+tag@mail.example.co.uk"));

        assert!(!is_valid_email("jane.doe"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("jane@localhost"));
        assert!(!is_valid_email("jane@@example.com"));
        assert!(!is_valid_email("jane doe@example.com"));
        assert!(!is_valid_email("jane@example..com"));
    }

    #[test]
    fn test_empty_strings_count_as_missing() {
        assert_eq!(parse_string(&json!("   ")), Err(Rule::Required));
        assert_eq!(parse_string(&json!(null)), Err(Rule::Required));
        assert_eq!(parse_string(&json!(42)), Err(Rule::String));
        assert_eq!(parse_string(&json!("  Ada ")), Ok("Ada".to_string()));
    }

    #[test]
    fn test_decimal_keeps_json_text() {
        assert_eq!(parse_decimal(&json!(0.05)), Ok(dec!(0.05)));
        assert_eq!(parse_decimal(&json!("0.125")), Ok(dec!(0.125)));
        assert_eq!(parse_decimal(&json!(1000)), Ok(dec!(1000)));
        assert_eq!(parse_decimal(&json!("1e-3")), Ok(dec!(0.001)));
        assert_eq!(parse_decimal(&json!("abc")), Err(Rule::Numeric));
        assert_eq!(parse_decimal(&json!(true)), Err(Rule::Numeric));
    }

    #[test]
    fn test_integer_and_boolean() {
        assert_eq!(parse_integer(&json!(12)), Ok(12));
        assert_eq!(parse_integer(&json!("7")), Ok(7));
        assert_eq!(parse_integer(&json!(1.5)), Err(Rule::Integer));

        assert_eq!(parse_boolean(&json!(true)), Ok(true));
        assert_eq!(parse_boolean(&json!(0)), Ok(false));
        assert_eq!(parse_boolean(&json!("1")), Ok(true));
        assert_eq!(parse_boolean(&json!("yes")), Err(Rule::Boolean));
    }

    #[test]
    fn test_validator_collects_every_field() {
        let payload = json!({ "first_name": "", "email": "nope" });

        let mut validator = Validator::new();
        validator.required("first_name", payload.get("first_name"), parse_string);
        validator.required("last_name", payload.get("last_name"), parse_string);
        validator.required("email", payload.get("email"), parse_email);
        validator.optional("nickname", payload.get("nickname"), parse_string);

        let errors = validator.finish().unwrap_err();
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, vec!["email", "first_name", "last_name"]);
        assert_eq!(errors.messages("last_name"), ["The last name field is required."]);
        assert_eq!(errors.messages("email"), ["The email must be a valid email address."]);
    }
}
