use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wraps passenger contact details so `Debug`/`Display` (and therefore every
/// `tracing` field) only ever shows a redacted hint.
///
/// Serialization still yields the real value: API responses need it.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

impl<T: AsRef<str>> Masked<T> {
    /// `jane.doe@example.com` → `j***@example.com`, `+1 555 0100` → `***00`.
    pub fn hint(&self) -> String {
        let value = self.0.as_ref();
        match value.split_once('@') {
            Some((local, domain)) => {
                let first = local.chars().next().map(String::from).unwrap_or_default();
                format!("{}***@{}", first, domain)
            }
            None => {
                let chars: Vec<char> = value.chars().collect();
                let tail: String = chars[chars.len().saturating_sub(2)..].iter().collect();
                format!("***{}", tail)
            }
        }
    }
}

impl<T: AsRef<str>> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Masked({})", self.hint())
    }
}

impl<T: AsRef<str>> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hint())
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_keeps_domain_only() {
        let email = Masked("jane.doe@example.com");
        assert_eq!(email.to_string(), "j***@example.com");
        assert_eq!(format!("{:?}", email), "Masked(j***@example.com)");
    }

    #[test]
    fn test_phone_keeps_last_two_digits() {
        assert_eq!(Masked("+1 555 010 0199").to_string(), "***99");
        assert_eq!(Masked("7").to_string(), "***7");
    }

    #[test]
    fn test_serializes_real_value() {
        let phone = Masked("5550100199".to_string());
        assert_eq!(serde_json::to_string(&phone).unwrap(), r#""5550100199""#);
        assert_eq!(phone.into_inner(), "5550100199");
    }
}
