//!
//! The cavage `Signature` header format
//!

use crate::{Error, Result};

mod header_list;
mod parse;
mod serialise;

pub mod signature_string;

pub use self::header_list::HeaderList;
pub use self::parse::{parse, ParseError};
pub use self::serialise::serialise;

/// Parameter names the verifier requires
pub const KEY_ID: &str = "keyId";
pub const ALGORITHM: &str = "algorithm";
pub const HEADERS: &str = "headers";
pub const SIGNATURE: &str = "signature";

/// Parsed signature parameters
///
/// Keeps every `key="value"` pair in the order it appeared, including names this crate doesn't know about.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignatureParameters<'a> {
    pairs: Vec<(&'a str, &'a str)>,
}

impl<'a> SignatureParameters<'a> {
    /// Value of the parameter with the given name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.pairs
            .iter()
            .find_map(|(key, value)| (*key == name).then_some(*value))
    }

    /// Value of the parameter, failing with [`Error::MissingParameter`] if it is absent
    pub fn require(&self, name: &'static str) -> Result<&'a str> {
        self.get(name).ok_or(Error::MissingParameter(name))
    }

    /// Iterate over all parameters in their original order
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.pairs.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for SignatureParameters<'a> {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}
