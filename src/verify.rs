use crate::{
    cavage::{self, ALGORITHM, HEADERS, KEY_ID, SIGNATURE},
    crypto, AlgorithmRegistry, Error, HeaderList, KeyResolver, Message, Result,
    AUTHORIZATION_SCHEME, SIGNATURE_HEADER,
};
use derive_builder::Builder;
use http::{header::AUTHORIZATION, HeaderMap};
use tracing::{debug, instrument};

/// HTTP signature verifier
///
/// Resolves keys through the key resolver and algorithms through the registry (defaults to [`AlgorithmRegistry::default`]).
#[derive(Builder, Clone, Debug)]
#[builder(pattern = "owned")]
pub struct Verifier<R> {
    /// Source of the keys referenced by `keyId`
    key_resolver: R,

    /// Algorithms accepted by this verifier
    #[builder(default)]
    registry: AlgorithmRegistry,
}

impl<R> Verifier<R> {
    /// Return a builder for the verifier
    #[must_use]
    pub fn builder() -> VerifierBuilder<R> {
        VerifierBuilder::default()
    }

    /// Verifier with the default algorithm registry
    pub fn new(key_resolver: R) -> Self {
        Self {
            key_resolver,
            registry: AlgorithmRegistry::default(),
        }
    }

    /// Replace the algorithm registry
    #[must_use]
    pub fn with_registry(mut self, registry: AlgorithmRegistry) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }
}

impl<R> Verifier<R>
where
    R: KeyResolver,
{
    /// Verify the signature of the message, reporting why it was rejected
    ///
    /// Don't forward the error to whoever sent the message. Use [`Verifier::is_valid`] at trust boundaries.
    pub fn verify<M>(&self, message: &M) -> Result<()>
    where
        M: Message + ?Sized,
    {
        verify(&self.registry, &self.key_resolver, message)
    }

    /// Check whether the message carries a valid signature
    ///
    /// Every failure, be it a malformed header, an unknown key or a wrong signature, yields `false`.
    pub fn is_valid<M>(&self, message: &M) -> bool
    where
        M: Message + ?Sized,
    {
        is_valid(&self.registry, &self.key_resolver, message)
    }
}

/// Find the raw signature parameters
///
/// A `Signature` header that is empty or not visible ASCII counts as absent.
/// An `Authorization` header only counts if it uses the `Signature` scheme.
fn signature_parameters(headers: &HeaderMap) -> Result<&str> {
    let signature = headers
        .get(&SIGNATURE_HEADER)
        .and_then(|signature| signature.to_str().ok())
        .filter(|signature| !signature.is_empty());

    if let Some(signature) = signature {
        return Ok(signature);
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|authorization| authorization.to_str().ok())
        .and_then(|authorization| authorization.strip_prefix(AUTHORIZATION_SCHEME))
        .ok_or(Error::MissingSignatureHeader)
}

#[instrument(skip_all)]
pub(crate) fn verify<R, M>(registry: &AlgorithmRegistry, key_resolver: &R, message: &M) -> Result<()>
where
    R: KeyResolver + ?Sized,
    M: Message + ?Sized,
{
    let raw_parameters = signature_parameters(message.headers())?;
    let parameters = cavage::parse(raw_parameters)?;

    let key_id = parameters.require(KEY_ID)?;
    let algorithm = parameters.require(ALGORITHM)?;
    let headers = parameters.require(HEADERS)?;
    let signature = parameters.require(SIGNATURE)?;
    debug!(key_id, algorithm, headers, "verifying signature");

    let key = key_resolver.fetch(key_id).map_err(Error::KeyResolution)?;
    let algorithm = registry.create(algorithm)?;
    let header_list: HeaderList = headers.parse()?;

    crypto::verify(message, &key, algorithm, &header_list, signature)
}

pub(crate) fn is_valid<R, M>(registry: &AlgorithmRegistry, key_resolver: &R, message: &M) -> bool
where
    R: KeyResolver + ?Sized,
    M: Message + ?Sized,
{
    match verify(registry, key_resolver, message) {
        Ok(()) => true,
        Err(error) => {
            debug!(?error, "rejecting signature");
            false
        }
    }
}
