//! libcurl-backed fetcher.

use std::time::Duration;

use super::{HttpFetch, HttpResponse, TransportError, Url};
use crate::config::{ApiConfig, HttpConfig};

/// Performs each GET on a fresh `curl::easy::Easy` with the fixed header set.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    /// Header lines in `Name: value` form.
    headers: Vec<String>,
    connect_timeout: Duration,
    timeout: Duration,
}

impl CurlFetcher {
    pub fn new(api: &ApiConfig, http: &HttpConfig) -> Self {
        Self {
            headers: api.header_lines(),
            connect_timeout: Duration::from_secs(http.connect_timeout_secs),
            timeout: Duration::from_secs(http.timeout_secs),
        }
    }
}

impl HttpFetch for CurlFetcher {
    fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url.as_str())?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        let mut list = curl::easy::List::new();
        for line in &self.headers {
            list.append(line)?;
        }
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        tracing::debug!(%url, status, bytes = body.len(), "GET complete");
        Ok(HttpResponse { status, body })
    }
}
