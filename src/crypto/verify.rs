use super::Algorithm;
use crate::{cavage::signature_string, Error, HeaderList, Key, Message, Result};

/// Verify that the message's signing string corresponds with the Base64 encoded signature
///
/// Fails with [`Error::SignatureMismatch`] if the algorithm rejects the signature.
#[inline]
pub fn verify<M>(
    message: &M,
    key: &Key,
    algorithm: &dyn Algorithm,
    header_list: &HeaderList,
    encoded_signature: &str,
) -> Result<()>
where
    M: Message + ?Sized,
{
    let signature_string = signature_string::construct(message, header_list)?;
    let signature = base64_simd::STANDARD.decode_to_vec(encoded_signature)?;

    if algorithm.verify(key, signature_string.as_bytes(), &signature)? {
        Ok(())
    } else {
        Err(Error::SignatureMismatch)
    }
}

#[cfg(test)]
mod test {
    use crate::{
        crypto::{compute, Hmac},
        Error, HeaderList, Key,
    };
    use http::{HeaderMap, HeaderValue};

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("date", HeaderValue::from_static("Tue, 07 Jun 2014 20:51:35 GMT"));
        headers.insert("host", HeaderValue::from_static("example.com"));
        headers
    }

    #[test]
    fn compute_then_verify() {
        let headers = headers();
        let key = Key::secret("secret");
        let header_list: HeaderList = "date host".parse().unwrap();

        let signature = compute(&headers, &key, &Hmac::sha256(), &header_list).unwrap();
        let encoded = base64_simd::STANDARD.encode_to_string(&signature);
        assert_eq!(encoded, "3JByDyX6WXAHLVTdPgMk+27tYjr7+RcqaY+1zsGzVgc=");

        super::verify(&headers, &key, &Hmac::sha256(), &header_list, &encoded).unwrap();
    }

    #[test]
    fn wrong_secret() {
        let header_list: HeaderList = "date host".parse().unwrap();

        assert!(matches!(
            super::verify(
                &headers(),
                &Key::secret("not the secret"),
                &Hmac::sha256(),
                &header_list,
                "3JByDyX6WXAHLVTdPgMk+27tYjr7+RcqaY+1zsGzVgc=",
            ),
            Err(Error::SignatureMismatch)
        ));
    }

    #[test]
    fn invalid_base64() {
        let header_list: HeaderList = "date host".parse().unwrap();

        assert!(matches!(
            super::verify(
                &headers(),
                &Key::secret("secret"),
                &Hmac::sha256(),
                &header_list,
                "not base64!",
            ),
            Err(Error::SignatureEncoding(..))
        ));
    }
}
