//!
//! Easy and fool-proof HTTP signature verification
//!
//! Uses the default algorithm registry. Build a [`Verifier`](crate::Verifier) if you need a different set of algorithms.
//!

use crate::{AlgorithmRegistry, KeyResolver, Message, Result};
use std::sync::OnceLock;

fn default_registry() -> &'static AlgorithmRegistry {
    static REGISTRY: OnceLock<AlgorithmRegistry> = OnceLock::new();
    REGISTRY.get_or_init(AlgorithmRegistry::default)
}

/// Check whether the message carries a valid signature
///
/// Returns `false` on any failure without telling which step failed.
#[inline]
pub fn is_valid<M, R>(message: &M, key_resolver: &R) -> bool
where
    M: Message + ?Sized,
    R: KeyResolver + ?Sized,
{
    crate::verify::is_valid(default_registry(), key_resolver, message)
}

/// Verify the signature of the message, reporting why it was rejected
#[inline]
pub fn verify<M, R>(message: &M, key_resolver: &R) -> Result<()>
where
    M: Message + ?Sized,
    R: KeyResolver + ?Sized,
{
    crate::verify::verify(default_registry(), key_resolver, message)
}
