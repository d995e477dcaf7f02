use super::Error;
use crate::Key;
use ring::{
    hmac,
    rand::SystemRandom,
    signature::{
        RsaEncoding, RsaParameters, UnparsedPublicKey, RSA_PKCS1_2048_8192_SHA1_FOR_LEGACY_USE_ONLY,
        RSA_PKCS1_2048_8192_SHA256, RSA_PKCS1_SHA256,
    },
};
use std::{collections::HashMap, fmt, sync::Arc};
use subtle::ConstantTimeEq;

/// Signature algorithm strategy
///
/// Registered in an [`AlgorithmRegistry`] under its [`name`](Algorithm::name).
pub trait Algorithm: Send + Sync {
    /// Identifier used in the `algorithm` parameter
    fn name(&self) -> &str;

    /// Sign the message, returning the raw signature bytes
    fn sign(&self, key: &Key, msg: &[u8]) -> Result<Vec<u8>, Error>;

    /// Check whether the signature is valid for the message
    fn verify(&self, key: &Key, msg: &[u8], signature: &[u8]) -> Result<bool, Error>;
}

/// HMAC over a shared secret
///
/// Verification recomputes the MAC and compares in constant time.
#[derive(Clone, Copy, Debug)]
pub struct Hmac {
    name: &'static str,
    algorithm: hmac::Algorithm,
}

impl Hmac {
    #[must_use]
    pub const fn new(name: &'static str, algorithm: hmac::Algorithm) -> Self {
        Self { name, algorithm }
    }

    /// `hmac-sha256`
    #[must_use]
    pub fn sha256() -> Self {
        Self::new("hmac-sha256", hmac::HMAC_SHA256)
    }

    /// `hmac-sha1`
    #[must_use]
    pub fn sha1() -> Self {
        Self::new("hmac-sha1", hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY)
    }
}

impl Algorithm for Hmac {
    fn name(&self) -> &str {
        self.name
    }

    fn sign(&self, key: &Key, msg: &[u8]) -> Result<Vec<u8>, Error> {
        let Key::Secret(secret) = key else {
            return Err(Error::KeyMismatch);
        };

        let key = hmac::Key::new(self.algorithm, secret);
        Ok(hmac::sign(&key, msg).as_ref().to_vec())
    }

    fn verify(&self, key: &Key, msg: &[u8], signature: &[u8]) -> Result<bool, Error> {
        let expected = self.sign(key, msg)?;
        Ok(expected.ct_eq(signature).into())
    }
}

/// RSASSA-PKCS1-v1_5
///
/// Verification goes through the public-key primitive, signing needs an RSA key pair.
#[derive(Clone, Copy)]
pub struct Rsa {
    name: &'static str,
    verification: &'static RsaParameters,
    signing: Option<&'static dyn RsaEncoding>,
}

impl Rsa {
    /// Create an RSA strategy
    ///
    /// Without a `signing` encoding the strategy can only verify.
    #[must_use]
    pub const fn new(
        name: &'static str,
        verification: &'static RsaParameters,
        signing: Option<&'static dyn RsaEncoding>,
    ) -> Self {
        Self {
            name,
            verification,
            signing,
        }
    }

    /// `rsa-sha256`, accepting 2048 to 8192 bit moduli
    #[must_use]
    pub fn sha256() -> Self {
        Self::new(
            "rsa-sha256",
            &RSA_PKCS1_2048_8192_SHA256,
            Some(&RSA_PKCS1_SHA256),
        )
    }

    /// `rsa-sha1`, verify only
    #[must_use]
    pub fn sha1() -> Self {
        Self::new(
            "rsa-sha1",
            &RSA_PKCS1_2048_8192_SHA1_FOR_LEGACY_USE_ONLY,
            None,
        )
    }
}

impl fmt::Debug for Rsa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rsa")
            .field("name", &self.name)
            .field("can_sign", &self.signing.is_some())
            .finish_non_exhaustive()
    }
}

impl Algorithm for Rsa {
    fn name(&self) -> &str {
        self.name
    }

    fn sign(&self, key: &Key, msg: &[u8]) -> Result<Vec<u8>, Error> {
        let encoding = self.signing.ok_or(Error::UnsupportedOperation)?;
        let Key::RsaPrivate(key_pair) = key else {
            return Err(Error::KeyMismatch);
        };

        let mut buf = vec![0; key_pair.public().modulus_len()];
        key_pair
            .sign(encoding, &SystemRandom::new(), msg, &mut buf)
            .map_err(|_| Error::Signing)?;

        Ok(buf)
    }

    fn verify(&self, key: &Key, msg: &[u8], signature: &[u8]) -> Result<bool, Error> {
        let public_key: &[u8] = match key {
            Key::RsaPublic(der) => der.as_ref(),
            Key::RsaPrivate(key_pair) => key_pair.public().as_ref(),
            Key::Secret(..) => return Err(Error::KeyMismatch),
        };

        Ok(UnparsedPublicKey::new(self.verification, public_key)
            .verify(msg, signature)
            .is_ok())
    }
}

/// Algorithms available for signing and verification, keyed by identifier
///
/// The default registry contains `hmac-sha256`, `hmac-sha1`, `rsa-sha256` and `rsa-sha1`.
#[derive(Clone)]
pub struct AlgorithmRegistry {
    algorithms: HashMap<String, Arc<dyn Algorithm>>,
}

impl AlgorithmRegistry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            algorithms: HashMap::new(),
        }
    }

    /// Register an algorithm under its name, returning the algorithm it replaced
    pub fn register<A>(&mut self, algorithm: A) -> Option<Arc<dyn Algorithm>>
    where
        A: Algorithm + 'static,
    {
        self.algorithms
            .insert(algorithm.name().to_string(), Arc::new(algorithm))
    }

    #[must_use]
    pub fn with<A>(mut self, algorithm: A) -> Self
    where
        A: Algorithm + 'static,
    {
        self.register(algorithm);
        self
    }

    /// Only keep the algorithms whose identifier matches the predicate
    pub fn retain<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&str) -> bool,
    {
        self.algorithms.retain(|name, _| predicate(name));
    }

    /// Resolve an algorithm identifier
    pub fn create(&self, identifier: &str) -> crate::Result<&dyn Algorithm> {
        self.algorithms
            .get(identifier)
            .map(|algorithm| &**algorithm)
            .ok_or_else(|| crate::Error::UnsupportedAlgorithm(identifier.to_string()))
    }

    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.algorithms.contains_key(identifier)
    }

    /// Registered identifiers, in no particular order
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.algorithms.keys().map(String::as_str)
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::new()
            .with(Hmac::sha256())
            .with(Hmac::sha1())
            .with(Rsa::sha256())
            .with(Rsa::sha1())
    }
}

impl fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.identifiers()).finish()
    }
}
