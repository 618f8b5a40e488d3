//! Signing credentials.
//!
//! A [`Credential`] pairs the public identifier sent in every `Authorization`
//! header (an application ID for the Application API, a user ID for the User
//! API) with the secret key used only as the HMAC key.

use std::fmt;

/// Public identifier and secret key of a Latch application or user.
///
/// The secret never leaves the process and is redacted from `Debug` output.
///
/// # Examples
///
/// ```
/// use rustlatch_auth::Credential;
///
/// let credential = Credential::new("MyAppID", "MySecretKey");
/// assert_eq!(credential.id(), "MyAppID");
/// assert!(!format!("{credential:?}").contains("MySecretKey"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    id: String,
    secret_key: String,
}

impl Credential {
    /// Create a credential from an identifier and its secret key.
    pub fn new(id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            secret_key: secret_key.into(),
        }
    }

    /// The public application or user identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The secret key bytes used as the HMAC key.
    #[must_use]
    pub fn secret_key(&self) -> &[u8] {
        self.secret_key.as_bytes()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
