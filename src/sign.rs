use crate::{
    cavage, crypto, AlgorithmRegistry, Error, HeaderList, Key, Message, Result,
    AUTHORIZATION_SCHEME, SIGNATURE_HEADER,
};
use derive_builder::Builder;
use http::{header::AUTHORIZATION, HeaderName, HeaderValue, Request};
use tracing::instrument;

/// Header the signature parameters are written to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Placement {
    /// `Signature: keyId="..",...`
    #[default]
    Signature,

    /// `Authorization: Signature keyId="..",...`
    Authorization,
}

impl Placement {
    fn header_name(self) -> HeaderName {
        match self {
            Self::Signature => SIGNATURE_HEADER.clone(),
            Self::Authorization => AUTHORIZATION,
        }
    }
}

/// Values are written between quotes without escaping, so they must be visible ASCII (or spaces) without `"`
fn ensure_serialisable(parameter: &'static str, value: &str) -> Result<()> {
    let is_valid = value
        .bytes()
        .all(|byte| (byte.is_ascii_graphic() || byte == b' ') && byte != b'"');

    if is_valid {
        Ok(())
    } else {
        Err(Error::InvalidParameterValue(parameter))
    }
}

/// HTTP signature signer
///
/// Counterpart of the [`Verifier`](crate::Verifier). Builds the signing string exactly like the verifier does.
#[derive(Builder, Clone, Debug)]
#[builder(pattern = "owned", setter(into))]
pub struct Signer {
    /// Key ID announced in the `keyId` parameter
    key_id: String,

    /// Key the signature is computed with
    key: Key,

    /// Algorithm identifier, resolved through the registry
    algorithm: String,

    /// Headers covered by the signature, in signing order
    header_list: HeaderList,

    #[builder(default)]
    registry: AlgorithmRegistry,

    #[builder(default)]
    placement: Placement,
}

impl Signer {
    /// Return a builder for the signer
    #[must_use]
    pub fn builder() -> SignerBuilder {
        SignerBuilder::default()
    }

    /// Header the signature will be written to
    #[must_use]
    pub fn header_name(&self) -> HeaderName {
        self.placement.header_name()
    }

    /// Sign the message and return the value for the header named by [`Signer::header_name`]
    #[instrument(skip_all, fields(key_id = %self.key_id, algorithm = %self.algorithm))]
    pub fn sign<M>(&self, message: &M) -> Result<HeaderValue>
    where
        M: Message + ?Sized,
    {
        let algorithm = self.registry.create(&self.algorithm)?;
        ensure_serialisable(cavage::KEY_ID, &self.key_id)?;
        ensure_serialisable(cavage::ALGORITHM, algorithm.name())?;
        ensure_serialisable(cavage::HEADERS, &self.header_list.to_string())?;

        let signature_string = cavage::signature_string::construct(message, &self.header_list)?;
        let encoded_signature = crypto::sign(signature_string.as_bytes(), &self.key, algorithm)?;

        let parameters = cavage::serialise(
            &self.key_id,
            algorithm.name(),
            &self.header_list,
            &encoded_signature,
        );
        let value = match self.placement {
            Placement::Signature => parameters,
            Placement::Authorization => format!("{AUTHORIZATION_SCHEME}{parameters}"),
        };

        Ok(HeaderValue::from_str(&value)?)
    }

    /// Sign the request and insert the signature header, replacing any previous value
    pub fn sign_request<B>(&self, req: &mut Request<B>) -> Result<()> {
        let value = self.sign(&*req)?;
        req.headers_mut().insert(self.header_name(), value);
        Ok(())
    }
}
