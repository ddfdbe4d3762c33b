use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use skyway_shared::Money;
use std::sync::OnceLock;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Collects every field problem of a request before rejecting it.
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldViolation::new(field, message));
    }

    /// Present and non-blank; returns the value as given.
    pub fn required(&mut self, field: &str, value: Option<String>) -> Option<String> {
        match value {
            Some(v) if !v.trim().is_empty() => Some(v),
            _ => {
                self.push(field, format!("{} is required", field));
                None
            }
        }
    }

    pub fn min_chars(&mut self, field: &str, value: Option<String>, min: usize, message: &str) -> Option<String> {
        let value = self.required(field, value)?;
        if value.chars().count() < min {
            self.push(field, message);
            return None;
        }
        Some(value)
    }

    pub fn email(&mut self, field: &str, value: Option<String>) -> Option<String> {
        let value = self.required(field, value)?;
        if !is_valid_email(&value) {
            self.push(field, "Please enter a valid email address");
            return None;
        }
        Some(value)
    }

    /// Non-negative decimal amount with at most two fractional digits.
    pub fn amount(&mut self, field: &str, value: Option<String>) -> Option<Money> {
        let raw = self.required(field, value)?;
        match raw.parse::<Money>() {
            Ok(money) if money.is_negative() => {
                self.push(field, format!("{} must not be negative", field));
                None
            }
            Ok(money) => Some(money),
            Err(e) => {
                self.push(field, e.to_string());
                None
            }
        }
    }

    pub fn optional_amount(&mut self, field: &str, value: Option<String>) -> Option<Money> {
        match value {
            Some(v) if !v.trim().is_empty() => self.amount(field, Some(v)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn finish(self) -> Result<(), AppError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.0))
        }
    }
}

/// Accepts an amount sent either as a JSON string or a JSON number, so both
/// reach [`Violations::amount`] as text.
pub fn amount_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected an amount, found {}",
            other
        ))),
    }
}

pub fn is_valid_email(value: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("email pattern is valid")
    });
    re.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_syntax() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("j.doe+trip@mail.example.co.uk"));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("jane example@x.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("jane@@example.com"));
        assert!(!is_valid_email("jane@example..com"));
    }

    #[test]
    fn test_collects_all_violations() {
        let mut v = Violations::new();
        assert_eq!(v.min_chars("passengerFirstName", Some("A".into()), 2, "too short"), None);
        assert_eq!(v.email("passengerEmail", None), None);
        assert_eq!(v.amount("totalPrice", Some("-1.00".into())), None);
        assert_eq!(v.amount("totalPrice", Some("12.345".into())), None);
        assert_eq!(v.amount("totalPrice", Some("12.3".into())), Some(Money::from_cents(1230)));

        match v.finish() {
            Err(AppError::Validation(list)) => {
                let fields: Vec<&str> = list.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(
                    fields,
                    vec!["passengerFirstName", "passengerEmail", "totalPrice", "totalPrice"]
                );
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[derive(Debug, Deserialize)]
    struct Priced {
        #[serde(default, deserialize_with = "amount_text")]
        price: Option<String>,
    }

    #[test]
    fn test_amount_text_accepts_strings_and_numbers() {
        let p: Priced = serde_json::from_str(r#"{"price":"459.00"}"#).unwrap();
        assert_eq!(p.price.as_deref(), Some("459.00"));
        let p: Priced = serde_json::from_str(r#"{"price":212}"#).unwrap();
        assert_eq!(p.price.as_deref(), Some("212"));
        let p: Priced = serde_json::from_str("{}").unwrap();
        assert_eq!(p.price, None);
        assert!(serde_json::from_str::<Priced>(r#"{"price":[1]}"#).is_err());
    }

    #[test]
    fn test_blank_optional_amount_is_absent() {
        let mut v = Violations::new();
        assert_eq!(v.optional_amount("minPrice", Some("  ".into())), None);
        assert_eq!(v.optional_amount("minPrice", None), None);
        assert!(v.is_empty());
    }
}
