use crate::{cavage::ParseError, BoxError};
use miette::Diagnostic;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Reasons a message failed verification (or couldn't be signed)
///
/// Only surfaced through the diagnostic APIs. The boolean entry points collapse all of these into `false`.
#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum Error {
    /// Cryptographic failure (key of the wrong kind, unsupported operation)
    #[error(transparent)]
    Crypto(#[from] crate::crypto::Error),

    /// Declared header list didn't contain any names
    #[error("Empty header list")]
    EmptyHeaderList,

    /// Serialised signature parameters aren't a valid header value
    #[error(transparent)]
    HeaderEncoding(#[from] http::header::InvalidHeaderValue),

    /// Header value isn't visible ASCII
    #[error(transparent)]
    InvalidHeaderValue(#[from] http::header::ToStrError),

    /// Parameter value can't be written into a signature header (contains a quote or isn't visible ASCII)
    #[error("Invalid value for parameter \"{0}\"")]
    InvalidParameterValue(&'static str),

    /// Key resolver couldn't produce a key for the key ID
    #[error("Failed to resolve key")]
    KeyResolution(#[source] BoxError),

    /// Signature header is missing a required parameter
    #[error("Missing signature parameter \"{0}\"")]
    MissingParameter(&'static str),

    /// Neither a `Signature` nor a `Signature`-scheme `Authorization` header is present
    #[error("Signature/Authorization header missing")]
    MissingSignatureHeader,

    /// Signature parameters are malformed
    #[error(transparent)]
    #[diagnostic(transparent)]
    ParameterParse(#[from] ParseError),

    /// A header named in the header list is absent from the message
    #[error("Signed header \"{0}\" not present")]
    SignedHeaderNotPresent(String),

    /// The `signature` parameter isn't valid Base64
    #[error(transparent)]
    SignatureEncoding(#[from] base64_simd::Error),

    /// Signature doesn't match the message
    #[error("Signature mismatch")]
    SignatureMismatch,

    /// Algorithm identifier isn't registered
    #[error("Unsupported algorithm \"{0}\"")]
    UnsupportedAlgorithm(String),
}
