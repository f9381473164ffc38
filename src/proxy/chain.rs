// Ordered proxy fallback
//
// A request is tried through each proxy in turn. The first 2xx answer wins;
// anything else advances to the next proxy. Only the last failure survives.

use crate::common::{Error, Result};

/// Public CORS proxies tried when no list is configured.
pub const DEFAULT_PROXIES: [&str; 3] = [
    "https://api.allorigins.win/raw?url=",
    "https://api.codetabs.com/v1/proxy/?quest=",
    "https://cors.isomorphic-git.org/",
];

/// HTTP method of a [`FetchRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
}

/// Request parameters forwarded unchanged to every attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchRequest {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl FetchRequest {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            headers: Vec::new(),
            body: Some(body.into()),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Response of a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl FetchResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            status_text: "OK".to_string(),
            body: body.into(),
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything that can perform one HTTP round trip.
///
/// Implementations return `Ok` for every response that arrived, whatever
/// its status; only transport failures are errors.
pub trait Fetcher {
    fn fetch(&self, url: &str, request: &FetchRequest) -> Result<FetchResponse>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, url: &str, request: &FetchRequest) -> Result<FetchResponse> {
        (**self).fetch(url, request)
    }
}

/// Check that `url` is an absolute http(s) URL.
pub fn normalize_url(url: &str) -> Result<&str> {
    let url = url.trim();
    let scheme_end = url.find("://").ok_or_else(|| Error::InvalidUrl(url.to_string()))?;
    let scheme = &url[..scheme_end];
    if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") {
        Ok(url)
    } else {
        Err(Error::InvalidUrl(url.to_string()))
    }
}

/// Ordered list of proxy URL prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyChain {
    proxies: Vec<String>,
}

impl Default for ProxyChain {
    fn default() -> Self {
        Self {
            proxies: DEFAULT_PROXIES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl ProxyChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chain that fetches every URL directly.
    pub fn direct() -> Self {
        Self { proxies: Vec::new() }
    }

    pub fn proxies(&self) -> &[String] {
        &self.proxies
    }

    /// Replace the proxy list. An empty list is ignored.
    pub fn set_proxies<I, S>(&mut self, proxies: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let proxies: Vec<String> = proxies.into_iter().map(Into::into).collect();
        if proxies.is_empty() {
            tracing::debug!("ignoring empty proxy list");
            return;
        }
        self.proxies = proxies;
    }

    /// Target URL of attempt `index`.
    pub fn target(&self, index: usize, url: &str) -> Option<String> {
        self.proxies
            .get(index)
            .map(|proxy| format!("{}{}", proxy, urlencoding::encode(url)))
    }

    /// Fetch `url` through the chain.
    ///
    /// Without proxies the URL is fetched directly and its outcome returned
    /// as is. Otherwise each proxy is tried in order and the first 2xx
    /// response is returned; when every attempt fails the last failure is
    /// wrapped in [`Error::AllProxiesFailed`].
    pub fn fetch<F>(&self, fetcher: &F, url: &str, request: &FetchRequest) -> Result<FetchResponse>
    where
        F: Fetcher + ?Sized,
    {
        let url = normalize_url(url)?;
        if self.proxies.is_empty() {
            return fetcher.fetch(url, request);
        }

        let mut last = None;
        let mut index = 0;
        while let Some(target) = self.target(index, url) {
            match attempt(fetcher, &target, request) {
                Ok(response) => {
                    tracing::debug!(proxy = index, status = response.status, "proxy fetch succeeded");
                    return Ok(response);
                },
                Err(err) => {
                    tracing::warn!(proxy = index, target = %target, error = %err, "proxy fetch failed");
                    last = Some(err);
                },
            }
            index += 1;
        }

        Err(Error::AllProxiesFailed {
            attempts: index,
            last: Box::new(last.unwrap_or(Error::EmptyResponse)),
        })
    }
}

fn attempt<F>(fetcher: &F, target: &str, request: &FetchRequest) -> Result<FetchResponse>
where
    F: Fetcher + ?Sized,
{
    let response = fetcher.fetch(target, request)?;
    if response.is_success() {
        Ok(response)
    } else {
        Err(Error::Fetch {
            status: response.status,
            message: response.status_text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Answers from a script of canned outcomes and records every URL.
    struct ScriptedFetcher {
        outcomes: RefCell<Vec<Result<FetchResponse>>>,
        seen: RefCell<Vec<String>>,
    }

    impl ScriptedFetcher {
        fn new(outcomes: Vec<Result<FetchResponse>>) -> Self {
            Self {
                outcomes: RefCell::new(outcomes),
                seen: RefCell::new(Vec::new()),
            }
        }

        fn seen(&self) -> Vec<String> {
            self.seen.borrow().clone()
        }
    }

    impl Fetcher for ScriptedFetcher {
        fn fetch(&self, url: &str, _request: &FetchRequest) -> Result<FetchResponse> {
            self.seen.borrow_mut().push(url.to_string());
            let mut outcomes = self.outcomes.borrow_mut();
            if outcomes.is_empty() {
                return Err(Error::Transport("script exhausted".into()));
            }
            outcomes.remove(0)
        }
    }

    fn status(code: u16, text: &str) -> Result<FetchResponse> {
        Ok(FetchResponse {
            status: code,
            status_text: text.to_string(),
            body: String::new(),
        })
    }

    fn chain(proxies: &[&str]) -> ProxyChain {
        let mut chain = ProxyChain::new();
        chain.set_proxies(proxies.iter().copied());
        chain
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("https://example.com").unwrap(), "https://example.com");
        assert!(normalize_url("HTTP://EXAMPLE.COM").is_ok());
        assert!(matches!(normalize_url("ftp://example.com"), Err(Error::InvalidUrl(_))));
        assert!(matches!(normalize_url("example.com"), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_default_and_empty_list() {
        let mut chain = ProxyChain::new();
        assert_eq!(chain.proxies().len(), 3);
        chain.set_proxies(Vec::<String>::new());
        assert_eq!(chain.proxies()[0], DEFAULT_PROXIES[0]);
    }

    #[test]
    fn test_target_encodes_url() {
        let chain = chain(&["https://p/?u="]);
        assert_eq!(
            chain.target(0, "https://a.com/x?y=1").as_deref(),
            Some("https://p/?u=https%3A%2F%2Fa.com%2Fx%3Fy%3D1")
        );
        assert_eq!(chain.target(1, "https://a.com"), None);
    }

    #[test]
    fn test_first_success_short_circuits() {
        let fetcher = ScriptedFetcher::new(vec![Ok(FetchResponse::ok("page")), status(500, "unused")]);
        let response = chain(&["A", "B"]).fetch(&fetcher, "http://x", &FetchRequest::get()).unwrap();
        assert_eq!(response.body, "page");
        assert_eq!(fetcher.seen(), vec!["Ahttp%3A%2F%2Fx"]);
    }

    #[test]
    fn test_falls_back_in_order() {
        let fetcher = ScriptedFetcher::new(vec![
            status(403, "Forbidden"),
            Err(Error::Transport("refused".into())),
            Ok(FetchResponse::ok("third")),
        ]);
        let response = chain(&["A", "B", "C"]).fetch(&fetcher, "http://x", &FetchRequest::get()).unwrap();
        assert_eq!(response.body, "third");
        assert_eq!(fetcher.seen().len(), 3);
        assert!(fetcher.seen()[2].starts_with('C'));
    }

    #[test]
    fn test_last_failure_reported() {
        let fetcher = ScriptedFetcher::new(vec![
            Err(Error::Transport("refused".into())),
            status(502, "Bad Gateway"),
        ]);
        let err = chain(&["A", "B"])
            .fetch(&fetcher, "http://x", &FetchRequest::get())
            .unwrap_err();
        match err {
            Error::AllProxiesFailed { attempts, last } => {
                assert_eq!(attempts, 2);
                assert!(matches!(*last, Error::Fetch { status: 502, .. }));
                assert_eq!(last.to_string(), "Fetch failed: 502 Bad Gateway");
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_direct_fetch_without_proxies() {
        let fetcher = ScriptedFetcher::new(vec![status(404, "Not Found")]);
        let response = ProxyChain::direct()
            .fetch(&fetcher, "https://site", &FetchRequest::get())
            .unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(fetcher.seen(), vec!["https://site"]);
    }

    #[test]
    fn test_invalid_url_makes_no_request() {
        let fetcher = ScriptedFetcher::new(vec![]);
        let err = ProxyChain::new().fetch(&fetcher, "file:///etc/passwd", &FetchRequest::get());
        assert!(matches!(err, Err(Error::InvalidUrl(_))));
        assert!(fetcher.seen().is_empty());
    }

    #[test]
    fn test_long_chain_is_iterative() {
        let proxies: Vec<String> = (0..10_000).map(|i| format!("p{i}/")).collect();
        let mut chain = ProxyChain::new();
        chain.set_proxies(proxies);
        let fetcher = ScriptedFetcher::new(vec![]);
        let err = chain.fetch(&fetcher, "http://x", &FetchRequest::get()).unwrap_err();
        assert!(matches!(err, Error::AllProxiesFailed { attempts: 10_000, .. }));
    }
}
