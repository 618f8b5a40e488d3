//! 11Paths authorization header construction and verification.
//!
//! The `Authorization` header has the format:
//!
//! ```text
//! 11PATHS <AppId> <Signature>
//! ```
//!
//! and is always sent together with `X-11Paths-Date` carrying the exact
//! timestamp that went into the string to sign.

use rustlatch_core::protocol::{
    AUTHENTICATION_SCHEME, AUTHORIZATION_FIELD_SEPARATOR, AUTHORIZATION_HEADER_NAME,
    DATE_HEADER_NAME,
};
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::canonical::{build_canonical_params, sanitize_header_value, string_to_sign};
use crate::credentials::Credential;
use crate::error::AuthError;
use crate::request::RequestDescriptor;
use crate::signer::sign;

/// Everything the transport needs to put a signed request on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Value of the `Authorization` header.
    pub authorization: String,
    /// Value of the `X-11Paths-Date` header.
    pub date: String,
    /// Custom protocol headers, values with line breaks replaced exactly as signed.
    pub headers: Vec<(String, String)>,
    /// Form-encoded body for POST and PUT, `None` otherwise.
    pub body: Option<String>,
}

impl SignedRequest {
    /// All headers to set on the outgoing request: authorization, date, then
    /// the custom headers.
    #[must_use]
    pub fn header_pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs = Vec::with_capacity(self.headers.len() + 2);
        pairs.push((AUTHORIZATION_HEADER_NAME, self.authorization.as_str()));
        pairs.push((DATE_HEADER_NAME, self.date.as_str()));
        pairs.extend(self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        pairs
    }
}

/// Compose the authorization header value from an identifier and a signature.
///
/// # Examples
///
/// ```
/// use rustlatch_auth::authorization::build_authorization_header;
///
/// assert_eq!(
///     build_authorization_header("MyAppID", "c2lnbmF0dXJl"),
///     "11PATHS MyAppID c2lnbmF0dXJl"
/// );
/// ```
#[must_use]
pub fn build_authorization_header(app_id: &str, signature: &str) -> String {
    [AUTHENTICATION_SCHEME, app_id, signature].join(AUTHORIZATION_FIELD_SEPARATOR)
}

/// Compute the signature of a descriptor.
#[must_use]
pub fn request_signature(credential: &Credential, descriptor: &RequestDescriptor) -> String {
    let sts = string_to_sign(descriptor);
    debug!(method = %descriptor.method(), string_to_sign = ?sts, "Built string to sign");
    sign(credential.secret_key(), &sts)
}

/// Sign a descriptor, producing the header values and body to transmit.
///
/// Pure: calling it twice with the same inputs yields identical output.
#[must_use]
pub fn sign_request(credential: &Credential, descriptor: &RequestDescriptor) -> SignedRequest {
    let signature = request_signature(credential, descriptor);

    SignedRequest {
        authorization: build_authorization_header(credential.id(), &signature),
        date: descriptor.formatted_date(),
        headers: descriptor
            .headers()
            .iter()
            .map(|(k, v)| (k.clone(), sanitize_header_value(v).into_owned()))
            .collect(),
        body: descriptor
            .method()
            .carries_body()
            .then(|| build_canonical_params(descriptor.params())),
    }
}

/// Check a received `Authorization` value against the signature recomputed
/// for `descriptor`.
///
/// # Errors
///
/// Returns [`AuthError::InvalidAuthHeader`] if the header is malformed,
/// [`AuthError::IdentityMismatch`] if it names another identifier, and
/// [`AuthError::SignatureDoesNotMatch`] if the signature differs.
pub fn verify_authorization(
    credential: &Credential,
    descriptor: &RequestDescriptor,
    auth_header: &str,
) -> Result<(), AuthError> {
    let (id, provided_signature) = parse_authorization_header(auth_header)?;

    if id != credential.id() {
        return Err(AuthError::IdentityMismatch {
            expected: credential.id().to_owned(),
            found: id.to_owned(),
        });
    }

    let expected_signature = request_signature(credential, descriptor);

    if provided_signature
        .as_bytes()
        .ct_eq(expected_signature.as_bytes())
        .into()
    {
        Ok(())
    } else {
        debug!(id = %id, "11PATHS signature mismatch");
        Err(AuthError::SignatureDoesNotMatch)
    }
}

/// Split `11PATHS <id> <signature>` into its identifier and signature.
fn parse_authorization_header(header: &str) -> Result<(&str, &str), AuthError> {
    let mut fields = header.split(AUTHORIZATION_FIELD_SEPARATOR);
    let (Some(scheme), Some(id), Some(signature), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(AuthError::InvalidAuthHeader);
    };

    if scheme != AUTHENTICATION_SCHEME || id.is_empty() || signature.is_empty() {
        return Err(AuthError::InvalidAuthHeader);
    }

    Ok((id, signature))
}
