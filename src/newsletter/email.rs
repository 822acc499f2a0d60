//! The local email-shape check used to gate the subscription form.
//!
//! Only the *shape* is checked: `local-part@domain.tld` or `local-part@1.2.3.4`.
//! There is no DNS lookup and the value is never trimmed or normalized.

use lazy_regex::regex_is_match;
use serde::Serialize;

// ###################################
// ->   STRUCTS
// ###################################
/// An email address that passed the shape check.
/// Serializes as the plain string the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidEmail(String);

impl AsRef<str> for ValidEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ValidEmail {
    pub fn parse<S>(value: S) -> Result<Self, EmailError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref();

        if !has_email_shape(value) {
            return Err(EmailError::Invalid);
        }

        Ok(ValidEmail(value.to_owned()))
    }
}

/// `true` when `value` would be accepted by [`ValidEmail::parse`].
pub fn is_valid_email(value: &str) -> bool {
    ValidEmail::parse(value).is_ok()
}

/// Dot separated atoms, an `@`, then either hostname labels ending in a 2-6 letter TLD
/// or a dotted IPv4 address with an optional port.
fn has_email_shape(value: &str) -> bool {
    regex_is_match!(
        r"^([a-z0-9_!#$%&'*+/=?^`{|}~-]+\.)*[a-z0-9_!#$%&'*+/=?^`{|}~-]+@((([a-z0-9][a-z0-9-]{0,62}[a-z0-9]|[a-z])\.)+[a-z]{2,6}|([0-9]{1,3}\.){3}[0-9]{1,3}(:[0-9]{1,5})?)$"i,
        value
    )
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("email invalid")]
    Invalid,
}
