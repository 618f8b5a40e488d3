//! 11Paths request signing for RustLatch.
//!
//! This crate implements the client side of the Latch authentication scheme:
//! given a [`Credential`] and a [`RequestDescriptor`], it builds the canonical
//! string to sign, computes `Base64(HMAC-SHA1(secret, string_to_sign))`, and
//! returns the `Authorization` and `X-11Paths-Date` header values together with
//! the form body for POST/PUT requests.
//!
//! Everything here is pure and synchronous. Network I/O lives in
//! `rustlatch-client`.
//!
//! # Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use rustlatch_auth::{Credential, HttpMethod, RequestDescriptor, sign_request};
//!
//! let credential = Credential::new("MyAppID", "MySecretKey");
//! let descriptor = RequestDescriptor::builder(
//!     HttpMethod::Get,
//!     "https://latch.elevenpaths.com/api/0.9/pair/my_token",
//!     Utc.with_ymd_and_hms(2015, 2, 15, 14, 53, 0).unwrap(),
//! )
//! .build()
//! .unwrap();
//!
//! let signed = sign_request(&credential, &descriptor);
//! assert!(signed.authorization.starts_with("11PATHS MyAppID "));
//! assert_eq!(signed.date, "2015-02-15 14:53:00");
//! ```
//!
//! # Modules
//!
//! - [`authorization`] - Authorization header construction and verification
//! - [`canonical`] - Header/param canonicalization and string-to-sign assembly
//! - [`credentials`] - Identifier and secret key pair
//! - [`error`] - Descriptor and verification error types
//! - [`request`] - Immutable request descriptors
//! - [`signer`] - HMAC-SHA1 signature computation

pub mod authorization;
pub mod canonical;
pub mod credentials;
pub mod error;
pub mod request;
pub mod signer;

pub use authorization::{SignedRequest, sign_request, verify_authorization};
pub use credentials::Credential;
pub use error::AuthError;
pub use request::{FormParams, HttpMethod, RequestDescriptor, RequestDescriptorBuilder};
