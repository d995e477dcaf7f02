//!
//! Common cryptographic operations
//!

use miette::Diagnostic;
use thiserror::Error;

mod algorithm;
mod sign;
mod verify;

pub mod parse;

pub use self::algorithm::{Algorithm, AlgorithmRegistry, Hmac, Rsa};
pub use self::sign::{compute, sign};
pub use self::verify::verify;

/// Cryptographic operation error
#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum Error {
    /// Key isn't usable with the algorithm (for example an RSA key passed to HMAC)
    #[error("Key doesn't match the algorithm")]
    KeyMismatch,

    /// The underlying primitive failed to produce a signature
    #[error("Failed to sign message")]
    Signing,

    /// Algorithm doesn't support the operation (for example signing with `rsa-sha1`)
    #[error("Operation not supported by the algorithm")]
    UnsupportedOperation,
}
