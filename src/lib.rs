//!
//! Verification of cavage-style HTTP signatures
//!
//! Reads the signature parameters from either the `Signature` header or an `Authorization` header
//! using the `Signature` scheme, rebuilds the signing string from the declared header list and
//! checks the signature with the claimed algorithm and the key resolved from the `keyId`.
//!
//! The boolean entry points ([`easy::is_valid`] and [`Verifier::is_valid`]) never tell the caller
//! *why* a message was rejected. Use [`Verifier::verify`] if you need the exact failure.
//!

use http::HeaderName;

pub use self::cavage::{HeaderList, SignatureParameters};
pub use self::crypto::{Algorithm, AlgorithmRegistry};
pub use self::error::{Error, Result};
pub use self::key::{Key, KeyNotFound, KeyResolver, MemoryKeyStore};
pub use self::message::Message;
pub use self::sign::{Placement, Signer, SignerBuilder, SignerBuilderError};
pub use self::verify::{Verifier, VerifierBuilder, VerifierBuilderError};

mod error;
mod key;
mod message;
mod sign;
mod verify;

pub mod cavage;
pub mod config;
pub mod crypto;
pub mod easy;

/// Type-erased error returned by key resolvers
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

static SIGNATURE_HEADER: HeaderName = HeaderName::from_static("signature");

/// Prefix of an `Authorization` header value that carries signature parameters
const AUTHORIZATION_SCHEME: &str = "Signature ";
