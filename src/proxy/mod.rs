//! Proxy fetching for pages that refuse to be framed.
//!
//! A page is requested through an ordered list of CORS proxies, and the
//! markup that comes back is rewritten so it renders from a foreign origin.
//! Network access sits behind the [`Fetcher`] trait; the `http` feature
//! provides a reqwest-backed implementation.
//!
//! # Example
//!
//! ```rust
//! use texquant::proxy::{FetchRequest, FetchResponse, Fetcher, PageLoad, ProxyChain};
//! use texquant::Result;
//!
//! struct Canned;
//!
//! impl Fetcher for Canned {
//!     fn fetch(&self, _url: &str, _request: &FetchRequest) -> Result<FetchResponse> {
//!         Ok(FetchResponse::ok("<head></head><p>hello</p>"))
//!     }
//! }
//!
//! let page = ProxyChain::new().load(&Canned, "https://example.com/", &FetchRequest::get());
//! assert!(matches!(page, PageLoad::Loaded { .. }));
//! assert!(page.html().contains(r#"<base href="https://example.com/">"#));
//! ```

mod chain;
#[cfg(feature = "http")]
mod http;
mod inject;

pub use chain::{DEFAULT_PROXIES, FetchRequest, FetchResponse, Fetcher, Method, ProxyChain, normalize_url};
#[cfg(feature = "http")]
pub use http::HttpFetcher;
pub use inject::{escape_attribute, escape_html, inject_helpers, render_error_page};

/// Outcome of [`ProxyChain::load`]: always a page that can be displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLoad {
    /// Fetched and rewritten document
    Loaded { url: String, html: String },
    /// Error page standing in for the document
    Failed { url: String, message: String, html: String },
}

impl PageLoad {
    pub fn url(&self) -> &str {
        match self {
            PageLoad::Loaded { url, .. } | PageLoad::Failed { url, .. } => url,
        }
    }

    pub fn html(&self) -> &str {
        match self {
            PageLoad::Loaded { html, .. } | PageLoad::Failed { html, .. } => html,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, PageLoad::Loaded { .. })
    }
}

impl ProxyChain {
    /// Fetch `url` and turn the outcome into a displayable page.
    ///
    /// Failures of any kind, including a rejected URL or an empty body,
    /// produce [`PageLoad::Failed`] carrying an error page.
    pub fn load<F>(&self, fetcher: &F, url: &str, request: &FetchRequest) -> PageLoad
    where
        F: Fetcher + ?Sized,
    {
        let outcome = self
            .fetch(fetcher, url, request)
            .and_then(|response| inject_helpers(&response.body, url));

        match outcome {
            Ok(html) => {
                tracing::info!(url, "page loaded");
                PageLoad::Loaded {
                    url: url.to_string(),
                    html,
                }
            },
            Err(err) => {
                let message = err.to_string();
                tracing::error!(url, error = %message, "cannot load page");
                PageLoad::Failed {
                    url: url.to_string(),
                    html: render_error_page(url, &message),
                    message,
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Error, Result};

    struct Fixed(u16, &'static str);

    impl Fetcher for Fixed {
        fn fetch(&self, _url: &str, _request: &FetchRequest) -> Result<FetchResponse> {
            Ok(FetchResponse {
                status: self.0,
                status_text: "Status".into(),
                body: self.1.into(),
            })
        }
    }

    #[test]
    fn test_load_success() {
        let page = ProxyChain::new().load(&Fixed(200, "<p>x</p>"), "https://a/", &FetchRequest::get());
        assert!(page.is_loaded());
        assert_eq!(page.url(), "https://a/");
        assert!(page.html().starts_with(r#"<head><base href="https://a/"></head>"#));
    }

    #[test]
    fn test_load_empty_body_fails() {
        let page = ProxyChain::new().load(&Fixed(200, ""), "https://a/", &FetchRequest::get());
        match page {
            PageLoad::Failed { message, html, .. } => {
                assert_eq!(message, Error::EmptyResponse.to_string());
                assert!(html.contains("Empty response from proxy"));
            },
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_load_invalid_url_fails() {
        let page = ProxyChain::new().load(&Fixed(200, "x"), "javascript:alert(1)", &FetchRequest::get());
        assert!(!page.is_loaded());
        assert!(page.html().contains("javascript:alert(1)"));
    }

    #[test]
    fn test_load_all_proxies_failed() {
        let page = ProxyChain::new().load(&Fixed(503, "busy"), "https://a/", &FetchRequest::get());
        let PageLoad::Failed { message, .. } = page else {
            panic!("expected failure");
        };
        assert!(message.starts_with("All 3 proxies failed"));
    }
}
