use super::Algorithm;
use crate::{cavage::signature_string, HeaderList, Key, Message, Result};

/// Compute the signature over the message's signing string with the provided key and algorithm
#[inline]
pub fn compute<M>(
    message: &M,
    key: &Key,
    algorithm: &dyn Algorithm,
    header_list: &HeaderList,
) -> Result<Vec<u8>>
where
    M: Message + ?Sized,
{
    let signature_string = signature_string::construct(message, header_list)?;
    Ok(algorithm.sign(key, signature_string.as_bytes())?)
}

/// Sign a payload with the provided key and algorithm and encode the returned signature in Base64
#[inline]
pub fn sign(payload: &[u8], key: &Key, algorithm: &dyn Algorithm) -> Result<String, super::Error> {
    let signature = algorithm.sign(key, payload)?;
    Ok(base64_simd::STANDARD.encode_to_string(signature))
}
