//!
//! TOML configuration for keys and accepted algorithms
//!
//! ```toml
//! algorithms = ["hmac-sha256", "rsa-sha256"]
//!
//! [[keys]]
//! key-id = "shared"
//! type = "hmac"
//! secret = "hunter2"
//!
//! [[keys]]
//! key-id = "https://example.com/users/alice#main-key"
//! type = "rsa-public"
//! pem = """
//! -----BEGIN PUBLIC KEY-----
//! ...
//! -----END PUBLIC KEY-----
//! """
//! ```
//!

use crate::{crypto, AlgorithmRegistry, Key, MemoryKeyStore, Verifier};
use miette::Diagnostic;
use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// Key material couldn't be parsed
    #[error("Invalid key \"{key_id}\"")]
    InvalidKey {
        key_id: String,
        #[source]
        source: crypto::parse::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// Allow-list names an algorithm that isn't available
    #[error("Unknown algorithm \"{0}\"")]
    UnknownAlgorithm(String),
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum KeyMaterial {
    Hmac { secret: String },
    RsaPublic { pem: String },
    RsaPrivate { pem: String },
}

impl KeyMaterial {
    fn to_key(&self) -> Result<Key, crypto::parse::Error> {
        match self {
            Self::Hmac { secret } => Ok(Key::secret(secret)),
            Self::RsaPublic { pem } => crypto::parse::public_key(pem),
            Self::RsaPrivate { pem } => crypto::parse::private_key(pem),
        }
    }
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KeyConfiguration {
    pub key_id: String,
    #[serde(flatten)]
    pub material: KeyMaterial,
}

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
    /// Accepted algorithm identifiers. All default algorithms if absent
    #[serde(default)]
    pub algorithms: Option<Vec<String>>,

    #[serde(default)]
    pub keys: Vec<KeyConfiguration>,
}

impl Configuration {
    pub fn from_toml(content: &str) -> Result<Self, Error> {
        toml::from_str(content).map_err(Error::from)
    }

    pub fn load<P>(path: P) -> Result<Self, Error>
    where
        P: AsRef<Path>,
    {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse all configured keys into an in-memory key store
    pub fn key_store(&self) -> Result<MemoryKeyStore, Error> {
        self.keys
            .iter()
            .map(|key| {
                key.material
                    .to_key()
                    .map(|parsed| (key.key_id.clone(), parsed))
                    .map_err(|source| Error::InvalidKey {
                        key_id: key.key_id.clone(),
                        source,
                    })
            })
            .collect()
    }

    /// Default registry restricted to the configured algorithms
    pub fn registry(&self) -> Result<AlgorithmRegistry, Error> {
        let mut registry = AlgorithmRegistry::default();
        let Some(ref algorithms) = self.algorithms else {
            return Ok(registry);
        };

        if let Some(unknown) = algorithms.iter().find(|name| !registry.contains(name)) {
            return Err(Error::UnknownAlgorithm(unknown.clone()));
        }

        registry.retain(|name| algorithms.iter().any(|allowed| allowed == name));
        Ok(registry)
    }

    /// Verifier backed by the configured keys and algorithms
    pub fn verifier(&self) -> Result<Verifier<MemoryKeyStore>, Error> {
        Ok(Verifier::new(self.key_store()?).with_registry(self.registry()?))
    }
}

#[cfg(test)]
mod test {
    use super::{Configuration, Error};
    use crate::{Key, KeyResolver};

    const CONFIG: &str = r#"
algorithms = ["hmac-sha256"]

[[keys]]
key-id = "test"
type = "hmac"
secret = "secret"
"#;

    #[test]
    fn parse_config() {
        let config = Configuration::from_toml(CONFIG).unwrap();
        assert_eq!(config.keys.len(), 1);

        let store = config.key_store().unwrap();
        assert!(matches!(store.fetch("test"), Ok(Key::Secret(..))));

        let registry = config.registry().unwrap();
        assert!(registry.contains("hmac-sha256"));
        assert!(!registry.contains("hmac-sha1"));
    }

    #[test]
    fn empty_config_allows_defaults() {
        let config = Configuration::from_toml("").unwrap();
        assert!(config.key_store().unwrap().is_empty());
        assert_eq!(config.registry().unwrap().identifiers().count(), 4);
    }

    #[test]
    fn unknown_algorithm() {
        let config = Configuration::from_toml(r#"algorithms = ["hmac-md5"]"#).unwrap();
        assert!(matches!(
            config.registry(),
            Err(Error::UnknownAlgorithm(name)) if name == "hmac-md5"
        ));
    }

    #[test]
    fn invalid_key() {
        let config = Configuration::from_toml(
            r#"
[[keys]]
key-id = "broken"
type = "rsa-public"
pem = "nope"
"#,
        )
        .unwrap();

        assert!(matches!(
            config.key_store(),
            Err(Error::InvalidKey { key_id, .. }) if key_id == "broken"
        ));
    }

    #[test]
    fn unknown_key_type() {
        let result = Configuration::from_toml(
            r#"
[[keys]]
key-id = "x"
type = "ed25519"
pem = "nope"
"#,
        );

        assert!(matches!(result, Err(Error::Toml(..))));
    }
}
