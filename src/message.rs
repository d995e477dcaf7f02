use http::{request::Parts, HeaderMap, Method, Request, Uri};

/// Read access to the parts of an HTTP message a signature can cover
pub trait Message {
    /// Headers of the message
    fn headers(&self) -> &HeaderMap;

    /// Value of the `(request-target)` pseudo-header: the lowercased method, a space and the path with its query
    ///
    /// `None` if the message has no request line
    fn request_target(&self) -> Option<String> {
        None
    }
}

fn request_target(method: &Method, uri: &Uri) -> String {
    let method = method.as_str().to_lowercase();
    let path_and_query = uri
        .path_and_query()
        .map_or_else(|| uri.path(), |path_and_query| path_and_query.as_str());

    format!("{method} {path_and_query}")
}

impl Message for HeaderMap {
    #[inline]
    fn headers(&self) -> &HeaderMap {
        self
    }
}

impl Message for Parts {
    #[inline]
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[inline]
    fn request_target(&self) -> Option<String> {
        Some(request_target(&self.method, &self.uri))
    }
}

impl<B> Message for Request<B> {
    #[inline]
    fn headers(&self) -> &HeaderMap {
        self.headers()
    }

    #[inline]
    fn request_target(&self) -> Option<String> {
        Some(request_target(self.method(), self.uri()))
    }
}

impl<M> Message for &M
where
    M: Message + ?Sized,
{
    #[inline]
    fn headers(&self) -> &HeaderMap {
        (**self).headers()
    }

    #[inline]
    fn request_target(&self) -> Option<String> {
        (**self).request_target()
    }
}

#[cfg(test)]
mod test {
    use super::Message;
    use http::{Method, Request, Uri};

    #[test]
    fn request_target_with_query() {
        let req = Request::builder()
            .method(Method::POST)
            .uri(Uri::from_static("/foo?param=value&pet=dog"))
            .body(())
            .unwrap();

        assert_eq!(
            Message::request_target(&req).as_deref(),
            Some("post /foo?param=value&pet=dog")
        );
    }

    #[test]
    fn request_target_absolute_uri() {
        let req = Request::builder()
            .method(Method::GET)
            .uri(Uri::from_static("https://example.com/inbox"))
            .body(())
            .unwrap();

        assert_eq!(
            Message::request_target(&req).as_deref(),
            Some("get /inbox")
        );
    }

    #[test]
    fn header_map_has_no_request_target() {
        let headers = http::HeaderMap::new();
        assert!(headers.request_target().is_none());
    }
}
