//!
//! Parse RSA keys from their PEM forms
//!

use crate::Key;
use const_oid::db::rfc5912::RSA_ENCRYPTION;
use miette::Diagnostic;
use pkcs8::{Document, PrivateKeyInfo, SecretDocument, SubjectPublicKeyInfoRef};
use ring::signature::RsaKeyPair;
use thiserror::Error;

const PKCS1_PUBLIC_KEY_TAG: &str = "RSA PUBLIC KEY";
const PKCS1_PRIVATE_KEY_TAG: &str = "RSA PRIVATE KEY";

/// Key parsing error
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// Malformed DER structure
    #[error(transparent)]
    Der(#[from] pkcs8::der::Error),

    /// Key rejected
    #[error(transparent)]
    KeyRejected(#[from] ring::error::KeyRejected),

    /// Malformed key
    #[error("Malformed key")]
    MalformedKey,

    /// Malformed PKCS#8 document
    #[error(transparent)]
    Pkcs8(#[from] pkcs8::Error),

    /// Unknown key type
    #[error("Unknown key type")]
    UnknownKeyType,
}

/// Parse an RSA public key
///
/// Accepts SPKI (`PUBLIC KEY`) and PKCS#1 (`RSA PUBLIC KEY`) PEM documents.
#[inline]
pub fn public_key(pem: &str) -> Result<Key, Error> {
    let (pem_tag, document) = Document::from_pem(pem.trim())?;
    if pem_tag == PKCS1_PUBLIC_KEY_TAG {
        return Ok(Key::rsa_public(document.as_bytes()));
    }

    let spki: SubjectPublicKeyInfoRef<'_> = document.decode_msg()?;
    if spki.algorithm.oid != RSA_ENCRYPTION {
        return Err(Error::UnknownKeyType);
    }

    let raw_bytes = spki
        .subject_public_key
        .as_bytes()
        .ok_or(Error::MalformedKey)?;

    Ok(Key::rsa_public(raw_bytes))
}

/// Parse an RSA private key.
/// This function uses constant-time PEM decoding and zeroizes any temporary allocations.
///
/// Accepts PKCS#8 (`PRIVATE KEY`) and PKCS#1 (`RSA PRIVATE KEY`) PEM documents.
#[inline]
pub fn private_key(pem: &str) -> Result<Key, Error> {
    let (tag_line, document) = SecretDocument::from_pem(pem.trim())?;
    if tag_line == PKCS1_PRIVATE_KEY_TAG {
        return Ok(Key::rsa_private(RsaKeyPair::from_der(document.as_bytes())?));
    }

    let private_key_raw: PrivateKeyInfo<'_> = document.decode_msg()?;
    if private_key_raw.algorithm.oid != RSA_ENCRYPTION {
        return Err(Error::UnknownKeyType);
    }

    Ok(Key::rsa_private(RsaKeyPair::from_der(
        private_key_raw.private_key,
    )?))
}
