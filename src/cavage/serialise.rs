use super::HeaderList;
use std::fmt::Write;

/// Serialise signature parameters into a `Signature` header value
///
/// The encoded signature is expected to be Base64. Values are written as-is since the format has no escaping.
#[inline]
#[must_use]
pub fn serialise(
    key_id: &str,
    algorithm: &str,
    header_list: &HeaderList,
    encoded_signature: &str,
) -> String {
    let mut buffer = String::new();

    let _ = write!(buffer, "keyId=\"{key_id}\"");
    let _ = write!(buffer, ",algorithm=\"{algorithm}\"");

    buffer.push_str(",headers=\"");
    for item in itertools::intersperse(header_list.names(), " ") {
        buffer.push_str(item);
    }
    buffer.push('"');

    let _ = write!(buffer, ",signature=\"{encoded_signature}\"");

    buffer
}

#[cfg(test)]
mod test {
    use crate::HeaderList;

    #[test]
    fn serialise_parses_back() {
        let header_list: HeaderList = "(request-target) host date".parse().unwrap();
        let serialised = super::serialise("Test", "hmac-sha256", &header_list, "c2ln");

        assert_eq!(
            serialised,
            r#"keyId="Test",algorithm="hmac-sha256",headers="(request-target) host date",signature="c2ln""#
        );

        let params = crate::cavage::parse(&serialised).unwrap();
        assert_eq!(params.get("headers"), Some("(request-target) host date"));
    }
}
