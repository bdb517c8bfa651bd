//! HTTP page fetcher with request pacing and Big5 encoding support
//!
//! Article pages come from arbitrary blogs and news sites; most are UTF-8
//! but older Traditional-Chinese sites still serve Big5. Every request gets
//! a browser User-Agent from a small rotation pool and goes through a shared
//! rate limiter. Each fetch is attempted exactly once: a failed page is an
//! empty extraction, and the pipeline moves on to the next article.

use encoding_rs::{BIG5, UTF_8};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use rand::seq::SliceRandom;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, USER_AGENT},
    Client, Response,
};
use std::num::NonZeroU32;
use std::time::Duration;

use crate::error::FetchError;

/// Pool of realistic User-Agent strings for rotation
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
];

/// Get a random user agent from the pool
pub(crate) fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS.choose(&mut rng).unwrap_or(&USER_AGENTS[0])
}

/// Article page fetcher
pub struct PageFetcher {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// Rate limiter to control request frequency
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl PageFetcher {
    /// Create a fetcher with default settings (2 requests/second, 10 s timeout)
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(2, Duration::from_secs(10))
    }

    /// Create a fetcher with custom pacing and timeout
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn with_config(requests_per_second: u32, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .cookie_store(true)
            .build()?;

        let rate = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::new(1).unwrap());
        let quota = Quota::per_second(rate);
        let rate_limiter = RateLimiter::direct(quota);

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    /// Fetch a page and decode it to UTF-8.
    ///
    /// Waits for the rate limiter, then attempts the request exactly once.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Timeout` on timeout, `FetchError::ServerError`
    /// on a non-success status, `FetchError::Decode` if neither UTF-8 nor
    /// Big5 decoding produces clean text.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.rate_limiter.until_ready().await;

        let headers = self.build_headers();
        match self.client.get(url).headers(headers).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    self.decode_response(response).await
                } else {
                    Err(FetchError::ServerError(status.as_u16()))
                }
            }
            Err(e) => {
                if e.is_timeout() {
                    Err(FetchError::Timeout)
                } else {
                    Err(FetchError::Http(e))
                }
            }
        }
    }

    /// Decode a response body handling both UTF-8 and Big5 encodings
    async fn decode_response(&self, response: Response) -> Result<String, FetchError> {
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_default();

        let bytes = response.bytes().await?;
        self.decode_bytes(&bytes, &content_type)
    }

    /// Decode bytes to a UTF-8 string with encoding detection.
    ///
    /// Strategies, in order: explicit charset in Content-Type, UTF-8, Big5,
    /// then an HTML meta charset sniff over the first kilobyte.
    pub fn decode_bytes(&self, bytes: &[u8], content_type: &str) -> Result<String, FetchError> {
        let content_type = content_type.to_lowercase();
        if content_type.contains("charset=big5") {
            return self.decode_big5(bytes);
        }
        if content_type.contains("charset=utf-8") {
            return self.decode_utf8(bytes);
        }

        // UTF-8 first (most common)
        if let Ok(text) = self.decode_utf8(bytes) {
            if !text.starts_with('\u{FFFD}') {
                return Ok(text);
            }
        }

        // Big5 fallback for legacy zh-TW sites
        if let Ok(text) = self.decode_big5(bytes) {
            return Ok(text);
        }

        // Meta charset tag as last resort
        if let Ok(partial) = std::str::from_utf8(&bytes[..bytes.len().min(1024)]) {
            if partial.to_lowercase().contains("charset=big5") {
                return self.decode_big5(bytes);
            }
        }

        Err(FetchError::Decode(
            "Failed to decode content with UTF-8 or Big5".to_string(),
        ))
    }

    fn decode_utf8(&self, bytes: &[u8]) -> Result<String, FetchError> {
        let (cow, _encoding, had_errors) = UTF_8.decode(bytes);
        if had_errors {
            return Err(FetchError::Decode("UTF-8 decoding errors".to_string()));
        }
        Ok(cow.into_owned())
    }

    fn decode_big5(&self, bytes: &[u8]) -> Result<String, FetchError> {
        let (cow, _encoding, had_errors) = BIG5.decode(bytes);
        if had_errors {
            return Err(FetchError::Decode("Big5 decoding errors".to_string()));
        }
        Ok(cow.into_owned())
    }

    /// Build browser-like HTTP headers with a rotated User-Agent
    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(USER_AGENT, HeaderValue::from_static(random_user_agent()));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("zh-TW,zh;q=0.9,en-US;q=0.8,en;q=0.7"),
        );
        headers.insert(
            ACCEPT_ENCODING,
            HeaderValue::from_static("gzip, deflate, br"),
        );

        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_rotation() {
        let mut agents = std::collections::HashSet::new();
        for _ in 0..100 {
            let agent = random_user_agent();
            assert!(USER_AGENTS.contains(&agent));
            agents.insert(agent);
        }
        assert!(agents.len() > 1, "User agents should rotate");
    }

    #[test]
    fn test_decode_utf8() {
        let fetcher = PageFetcher::new().unwrap();
        let text = "台北美食 Hello!";
        let decoded = fetcher.decode_bytes(text.as_bytes(), "text/html; charset=utf-8");
        assert_eq!(decoded.unwrap(), text);
    }

    #[test]
    fn test_decode_big5() {
        let fetcher = PageFetcher::new().unwrap();
        // "台北" in Big5 encoding
        let big5_bytes: &[u8] = &[0xa5, 0x78, 0xa5, 0x5f];
        let decoded = fetcher.decode_bytes(big5_bytes, "text/html; charset=big5");
        assert_eq!(decoded.unwrap(), "台北");
    }

    #[test]
    fn test_decode_big5_fallback_without_charset() {
        let fetcher = PageFetcher::new().unwrap();
        let big5_bytes: &[u8] = &[0xa5, 0x78, 0xa5, 0x5f];
        let decoded = fetcher.decode_bytes(big5_bytes, "text/html");
        assert_eq!(decoded.unwrap(), "台北");
    }

    #[test]
    fn test_headers() {
        let fetcher = PageFetcher::new().unwrap();
        let headers = fetcher.build_headers();
        assert!(headers.contains_key(USER_AGENT));
        assert!(headers.contains_key(ACCEPT));
        assert!(headers.contains_key(ACCEPT_LANGUAGE));
    }

    #[test]
    fn test_fetcher_creation() {
        assert!(PageFetcher::new().is_ok());
        assert!(PageFetcher::with_config(5, Duration::from_secs(15)).is_ok());
    }
}
