//! Blocking HTTP GET seam.
//!
//! The pipeline only talks to [`HttpFetch`]; [`CurlFetcher`] is the real
//! implementation and tests swap in an in-memory one.

mod curl_fetcher;

pub use curl_fetcher::CurlFetcher;

/// Transport-level failure (no HTTP status was received).
pub use curl::Error as TransportError;
pub use url::Url;

/// Status and raw body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One blocking GET per call. Non-2xx statuses are returned, not raised;
/// only transport failures (DNS, connect, timeout) are errors.
pub trait HttpFetch {
    fn get(&self, url: &Url) -> Result<HttpResponse, TransportError>;
}

impl<T: HttpFetch + ?Sized> HttpFetch for &T {
    fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        (**self).get(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range() {
        let ok = |status| HttpResponse {
            status,
            body: Vec::new(),
        };
        assert!(ok(200).is_success());
        assert!(ok(204).is_success());
        assert!(!ok(302).is_success());
        assert!(!ok(404).is_success());
        assert!(!ok(500).is_success());
    }
}
