use crate::BoxError;
use ring::signature::RsaKeyPair;
use std::{collections::HashMap, fmt, sync::Arc};
use thiserror::Error;

/// Key material resolved from a key ID
///
/// Cheap to clone. The material itself is shared.
#[derive(Clone)]
#[non_exhaustive]
pub enum Key {
    /// Shared secret for the HMAC family
    Secret(Arc<[u8]>),

    /// RSA public key in its PKCS#1 `RSAPublicKey` DER form
    RsaPublic(Arc<[u8]>),

    /// RSA key pair, usable for signing and verifying
    RsaPrivate(Arc<RsaKeyPair>),
}

impl Key {
    /// Shared secret key
    #[must_use]
    pub fn secret(secret: impl AsRef<[u8]>) -> Self {
        Self::Secret(secret.as_ref().into())
    }

    /// RSA public key from its PKCS#1 DER encoding
    #[must_use]
    pub fn rsa_public(der: impl AsRef<[u8]>) -> Self {
        Self::RsaPublic(der.as_ref().into())
    }

    /// RSA key pair
    #[must_use]
    pub fn rsa_private(key_pair: RsaKeyPair) -> Self {
        Self::RsaPrivate(Arc::new(key_pair))
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Secret(..) => f.debug_tuple("Secret").field(&"[redacted]").finish(),
            Self::RsaPublic(der) => f.debug_tuple("RsaPublic").field(&der.len()).finish(),
            Self::RsaPrivate(..) => f.debug_tuple("RsaPrivate").field(&"[redacted]").finish(),
        }
    }
}

/// No key is known under the requested key ID
#[derive(Debug, Error)]
#[error("Key \"{0}\" not found")]
pub struct KeyNotFound(pub String);

/// Look up key material by its key ID
///
/// Implemented for closures of the shape `Fn(&str) -> Result<Key, E>`.
pub trait KeyResolver {
    /// Fetch the key registered under `key_id`
    fn fetch(&self, key_id: &str) -> Result<Key, BoxError>;
}

impl<F, E> KeyResolver for F
where
    F: Fn(&str) -> Result<Key, E>,
    E: Into<BoxError>,
{
    #[inline]
    fn fetch(&self, key_id: &str) -> Result<Key, BoxError> {
        self(key_id).map_err(Into::into)
    }
}

/// In-memory key store
#[derive(Clone, Debug, Default)]
pub struct MemoryKeyStore {
    keys: HashMap<String, Key>,
}

impl MemoryKeyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key, replacing any key previously stored under the same ID
    pub fn insert(&mut self, key_id: impl Into<String>, key: Key) -> Option<Key> {
        self.keys.insert(key_id.into(), key)
    }

    #[must_use]
    pub fn with(mut self, key_id: impl Into<String>, key: Key) -> Self {
        self.insert(key_id, key);
        self
    }

    #[must_use]
    pub fn get(&self, key_id: &str) -> Option<&Key> {
        self.keys.get(key_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl KeyResolver for MemoryKeyStore {
    fn fetch(&self, key_id: &str) -> Result<Key, BoxError> {
        self.get(key_id)
            .cloned()
            .ok_or_else(|| KeyNotFound(key_id.to_string()).into())
    }
}

impl<S> FromIterator<(S, Key)> for MemoryKeyStore
where
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (S, Key)>>(iter: T) -> Self {
        Self {
            keys: iter
                .into_iter()
                .map(|(key_id, key)| (key_id.into(), key))
                .collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Key, KeyNotFound, KeyResolver, MemoryKeyStore};

    #[test]
    fn memory_store_fetch() {
        let store = MemoryKeyStore::new().with("test", Key::secret("secret"));

        assert!(matches!(store.fetch("test"), Ok(Key::Secret(secret)) if &*secret == b"secret"));

        let err = store.fetch("nope").unwrap_err();
        assert!(err.downcast_ref::<KeyNotFound>().is_some());
    }

    #[test]
    fn closure_resolver() {
        let resolver = |key_id: &str| {
            if key_id == "test" {
                Ok(Key::secret("secret"))
            } else {
                Err(KeyNotFound(key_id.to_string()))
            }
        };

        assert!(resolver.fetch("test").is_ok());
        assert!(resolver.fetch("other").is_err());
    }

    #[test]
    fn debug_redacts_secret() {
        let key = Key::secret("hunter2");
        assert!(!format!("{key:?}").contains("hunter2"));
    }
}
