//! Middleware to authorize outgoing catalog API requests
//!
//! When using [`ClientWithMiddleware`](reqwest_middleware::ClientWithMiddleware),
//! include the [`AccessTokenMiddleware`] in the middleware stack to send the
//! shared access token held by a [`TokenManager`] with each upstream request.
//!
//! If a request already carries an `Authorization` header by the time the
//! middleware executes, that value is left in place. If the upstream API
//! answers `401 Unauthorized` to a request authorized by this middleware, a
//! token refresh is requested. The response itself is passed back unchanged so
//! that the handler can decide what to tell its own caller.
//!
//! ```
//! use reqwest::Client;
//! use reqwest_middleware::ClientBuilder;
//! use tyro_reqwest::{AccessTokenMiddleware, ForwardedFor, UpstreamPrefix};
//! use tyro_tokens::{
//!     backoff::ErrorBackoffConfig, sources::StaticTokenSource, TokenLifetimeConfig,
//!     TokenManager,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")] async fn main() {
//! let tokens = TokenManager::spawn(
//!     StaticTokenSource::new("token"),
//!     TokenLifetimeConfig::default(),
//!     ErrorBackoffConfig::default(),
//! );
//!
//! let base = "https://sandbox.iii.com/iii/sierra-api/v1/".parse().unwrap();
//! let client = ClientBuilder::new(Client::default())
//!     .with(AccessTokenMiddleware::new(tokens).with_predicate(UpstreamPrefix::new(base)))
//!     .build();
//!
//! let inbound = reqwest::header::HeaderMap::new();
//! let peer = "203.0.113.7:51234".parse().ok();
//!
//! let mut req = client.get("https://sandbox.iii.com/iii/sierra-api/v1/items?bibIds=1000001");
//! if let Some(forwarded) = ForwardedFor::from_parts(&inbound, peer) {
//!     req = req.with_extension(forwarded);
//! }
//! # async move { req
//!     .send()
//!     .await
//!     .unwrap();
//! # };
//! # }
//! ```

#![warn(
    missing_docs,
    unused_import_braces,
    unused_imports,
    unused_qualifications
)]
#![deny(
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_must_use
)]

use std::{fmt, net::SocketAddr};

use bytes::{BufMut, BytesMut};
use predicates::{prelude::*, reflection};
use reqwest::{
    header::{self, HeaderMap, HeaderName, HeaderValue},
    Request, Response, StatusCode, Url,
};
use reqwest_middleware::{Error, Middleware, Next, Result};
use tyro_tokens::TokenManager;

/// The `X-Forwarded-For` header
pub const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// The `User-Agent` sent upstream unless a request already names one
pub const DEFAULT_USER_AGENT: &str = "Tyro";

/// A middleware that injects the shared access token into outgoing requests
#[derive(Clone, Debug)]
pub struct AccessTokenMiddleware<P> {
    tokens: TokenManager,
    user_agent: HeaderValue,
    predicate: P,
}

impl AccessTokenMiddleware<HttpsOnly> {
    /// Construct a new middleware from a token manager
    ///
    /// By default, this middleware will only send its token if the request
    /// is being sent via HTTPS. To change this behavior, provide a
    /// custom predicate with [`with_predicate()`][Self::with_predicate()].
    pub fn new(tokens: TokenManager) -> Self {
        Self {
            tokens,
            user_agent: HeaderValue::from_static(DEFAULT_USER_AGENT),
            predicate: HttpsOnly,
        }
    }

    /// Replaces the default predicate with a custom predicate
    pub fn with_predicate<P>(self, predicate: P) -> AccessTokenMiddleware<P> {
        AccessTokenMiddleware {
            tokens: self.tokens,
            user_agent: self.user_agent,
            predicate,
        }
    }
}

impl<P> AccessTokenMiddleware<P> {
    /// Replaces the `User-Agent` sent with authorized requests
    pub fn with_user_agent(mut self, user_agent: HeaderValue) -> Self {
        self.user_agent = user_agent;
        self
    }

    async fn authorization_header(&self) -> Result<HeaderValue> {
        let token = self.tokens.get_or_wait().await.map_err(Error::middleware)?;

        if tracing::enabled!(tracing::Level::TRACE) {
            tracing::trace!(
                token.status = ?token.token_status(),
                token.lifetime = token.lifetime().as_secs(),
                token.until_expired = token.until_expired().as_secs(),
                "obtained access token"
            );
        }

        let access_token = token.access_token().as_str();
        let mut header_value = BytesMut::with_capacity(access_token.len() + 7);
        header_value.put_slice(b"Bearer ");
        header_value.put_slice(access_token.as_bytes());

        let mut value =
            HeaderValue::from_maybe_shared(header_value.freeze()).map_err(Error::middleware)?;
        value.set_sensitive(true);
        Ok(value)
    }
}

#[async_trait::async_trait]
impl<P> Middleware for AccessTokenMiddleware<P>
where
    P: Predicate<Request> + Send + Sync + 'static,
{
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut http::Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        let mut attached = false;

        if self.predicate.eval(&req) {
            if !req.headers().contains_key(header::AUTHORIZATION) {
                let value = self.authorization_header().await?;
                req.headers_mut().insert(header::AUTHORIZATION, value);
                attached = true;
            }

            req.headers_mut()
                .entry(header::USER_AGENT)
                .or_insert_with(|| self.user_agent.clone());

            if let Some(forwarded) = extensions.get::<ForwardedFor>() {
                req.headers_mut()
                    .insert(X_FORWARDED_FOR, forwarded.header_value().clone());
            }
        }

        let resp = next.run(req, extensions).await?;

        if attached && resp.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!(
                url = %resp.url(),
                "upstream rejected access token, requesting refresh"
            );
            self.tokens.request_refresh();
        }

        Ok(resp)
    }
}

/// The client address to report upstream in `X-Forwarded-For`
///
/// Attach this to a request as an extension; the middleware copies it into
/// the outgoing headers.
#[derive(Clone, Debug)]
pub struct ForwardedFor(HeaderValue);

impl ForwardedFor {
    /// Determines the forwarding address for an inbound request
    ///
    /// An `X-Forwarded-For` value set by an earlier proxy is passed along as
    /// is. Otherwise the IP of the connected peer is used. Returns `None`
    /// when neither is known.
    pub fn from_parts(headers: &HeaderMap, remote_addr: Option<SocketAddr>) -> Option<Self> {
        if let Some(existing) = headers.get(X_FORWARDED_FOR) {
            if !existing.is_empty() {
                return Some(Self(existing.clone()));
            }
        }

        let ip = remote_addr?.ip().to_string();
        HeaderValue::from_str(&ip).ok().map(Self)
    }

    /// The value to send in the `X-Forwarded-For` header
    #[inline]
    pub fn header_value(&self) -> &HeaderValue {
        &self.0
    }
}

/// Only attach an access token if the request is being sent over HTTPS
#[derive(Clone, Copy, Debug)]
pub struct HttpsOnly;

impl Predicate<Request> for HttpsOnly {
    #[inline]
    fn eval(&self, req: &Request) -> bool {
        req.url().scheme() == "https"
    }

    fn find_case(&self, expected: bool, req: &Request) -> Option<reflection::Case> {
        let result = self.eval(req);
        if result != expected {
            Some(
                reflection::Case::new(Some(self), result).add_product(reflection::Product::new(
                    "scheme",
                    req.url().scheme().to_owned(),
                )),
            )
        } else {
            None
        }
    }
}

impl reflection::PredicateReflection for HttpsOnly {}
impl fmt::Display for HttpsOnly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("scheme is https")
    }
}

/// Only attach an access token to requests under the catalog API's base URL
///
/// The request must share the base URL's scheme, host and port, and its path
/// must be the base path or lie beneath it.
#[derive(Clone, Debug)]
pub struct UpstreamPrefix {
    base: Url,
}

impl UpstreamPrefix {
    /// Construct a new predicate from the catalog API's base URL
    pub fn new(base: Url) -> Self {
        Self { base }
    }
}

impl Predicate<Request> for UpstreamPrefix {
    fn eval(&self, req: &Request) -> bool {
        let url = req.url();
        if url.origin() != self.base.origin() {
            return false;
        }

        let base = self.base.path().trim_end_matches('/');
        match url.path().strip_prefix(base) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    fn find_case(&self, expected: bool, req: &Request) -> Option<reflection::Case> {
        let result = self.eval(req);
        if result != expected {
            Some(
                reflection::Case::new(Some(self), result)
                    .add_product(reflection::Product::new("url", req.url().to_string())),
            )
        } else {
            None
        }
    }
}

impl reflection::PredicateReflection for UpstreamPrefix {}
impl fmt::Display for UpstreamPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("url under ")?;
        f.write_str(self.base.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            atomic::{AtomicBool, AtomicUsize, Ordering},
            Arc, Mutex,
        },
        time::Duration,
    };

    use reqwest::{Client, Method};
    use reqwest_middleware::ClientBuilder;
    use tyro_tokens::{
        backoff::ErrorBackoffConfig,
        sources::{AsyncTokenSource, GrantedToken, StaticTokenSource},
        AcquireError, TokenLifetimeConfig,
    };

    use super::*;

    const TEST_TOKEN: &str = "this-is-a-test-token";
    const BEARER_TEST_TOKEN: &str = "Bearer this-is-a-test-token";

    struct AuthChecker {
        expected_authorization: String,
        checked: AtomicBool,
    }

    impl AuthChecker {
        pub fn new(expected: impl Into<String>) -> Self {
            Self {
                expected_authorization: expected.into(),
                checked: AtomicBool::new(false),
            }
        }
    }

    #[async_trait::async_trait]
    impl Middleware for AuthChecker {
        async fn handle(
            &self,
            req: Request,
            _: &mut http::Extensions,
            _: Next<'_>,
        ) -> Result<Response> {
            let authorization_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .expect("no authorization header")
                .to_str()
                .expect("authorization header was not valid UTF-8");

            assert_eq!(authorization_header, self.expected_authorization);
            self.checked.store(true, Ordering::Release);

            Ok(http::Response::<&[u8]>::default().into())
        }
    }

    #[derive(Default)]
    struct NoAuthChecker {
        checked: AtomicBool,
    }

    #[async_trait::async_trait]
    impl Middleware for NoAuthChecker {
        async fn handle(
            &self,
            req: Request,
            _: &mut http::Extensions,
            _: Next<'_>,
        ) -> Result<Response> {
            assert_eq!(req.headers().get(header::AUTHORIZATION), None);
            self.checked.store(true, Ordering::Release);

            Ok(http::Response::<&[u8]>::default().into())
        }
    }

    /// Records the headers it saw and answers with a fixed status
    struct Upstream {
        status: StatusCode,
        seen: Mutex<Option<HeaderMap>>,
    }

    impl Upstream {
        fn answering(status: StatusCode) -> Self {
            Self {
                status,
                seen: Mutex::new(None),
            }
        }

        fn seen(&self) -> HeaderMap {
            self.seen
                .lock()
                .unwrap()
                .take()
                .expect("upstream was not called")
        }
    }

    #[async_trait::async_trait]
    impl Middleware for Upstream {
        async fn handle(
            &self,
            req: Request,
            _: &mut http::Extensions,
            _: Next<'_>,
        ) -> Result<Response> {
            *self.seen.lock().unwrap() = Some(req.headers().clone());

            let resp = http::Response::builder()
                .status(self.status)
                .body(&b""[..])
                .expect("valid response");
            Ok(resp.into())
        }
    }

    struct CountingSource {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl AsyncTokenSource for CountingSource {
        async fn request_token(&mut self) -> std::result::Result<GrantedToken, AcquireError> {
            self.calls.fetch_add(1, Ordering::AcqRel);
            Ok(GrantedToken {
                access_token: TEST_TOKEN.into(),
                token_type: Some("bearer".into()),
                expires_in: Duration::from_secs(3600),
            })
        }
    }

    struct RejectedSource;

    #[async_trait::async_trait]
    impl AsyncTokenSource for RejectedSource {
        async fn request_token(&mut self) -> std::result::Result<GrantedToken, AcquireError> {
            Err(AcquireError::Authentication {
                status: 401,
                body: "invalid_client".into(),
            })
        }
    }

    struct UnresponsiveSource;

    #[async_trait::async_trait]
    impl AsyncTokenSource for UnresponsiveSource {
        async fn request_token(&mut self) -> std::result::Result<GrantedToken, AcquireError> {
            std::future::pending().await
        }
    }

    fn spawn_tokens(source: impl AsyncTokenSource + 'static) -> TokenManager {
        TokenManager::spawn(
            source,
            TokenLifetimeConfig::default(),
            ErrorBackoffConfig::default(),
        )
    }

    fn prepare_middleware() -> AccessTokenMiddleware<HttpsOnly> {
        AccessTokenMiddleware::new(spawn_tokens(StaticTokenSource::new(TEST_TOKEN)))
    }

    mod when_request_does_not_have_an_authorization_header {
        use super::*;

        #[tokio::test]
        async fn middleware_with_defaults_attaches_token_on_https_request() {
            let middleware = prepare_middleware();
            let auth_checker = Arc::new(AuthChecker::new(BEARER_TEST_TOKEN));

            let client = ClientBuilder::new(Client::default())
                .with(middleware)
                .with_arc(auth_checker.clone())
                .build();

            let resp = client.get("https://example.com").send().await.unwrap();

            assert_eq!(resp.status(), http::StatusCode::OK);
            assert!(auth_checker.checked.load(Ordering::Acquire));
        }

        #[tokio::test]
        async fn middleware_with_defaults_does_not_attach_token_on_http_request() {
            let middleware = prepare_middleware();
            let auth_checker = Arc::new(NoAuthChecker::default());

            let client = ClientBuilder::new(Client::default())
                .with(middleware)
                .with_arc(auth_checker.clone())
                .build();

            let resp = client.get("http://example.com").send().await.unwrap();

            assert_eq!(resp.status(), http::StatusCode::OK);
            assert!(auth_checker.checked.load(Ordering::Acquire));
        }

        #[tokio::test]
        async fn middleware_fails_the_request_when_token_acquisition_failed() {
            let middleware = AccessTokenMiddleware::new(spawn_tokens(RejectedSource));
            let auth_checker = Arc::new(NoAuthChecker::default());

            let client = ClientBuilder::new(Client::default())
                .with(middleware)
                .with_arc(auth_checker.clone())
                .build();

            let err = client.get("https://example.com").send().await.unwrap_err();

            assert!(matches!(err, Error::Middleware(_)));
            assert!(err.to_string().contains("token acquisition failed"));
            assert!(!auth_checker.checked.load(Ordering::Acquire));
        }

        #[tokio::test(start_paused = true)]
        async fn middleware_gives_up_when_no_token_arrives_in_time() {
            let tokens = spawn_tokens(UnresponsiveSource).with_initial_wait(Duration::from_secs(2));
            let auth_checker = Arc::new(NoAuthChecker::default());

            let client = ClientBuilder::new(Client::default())
                .with(AccessTokenMiddleware::new(tokens))
                .with_arc(auth_checker.clone())
                .build();

            let err = client.get("https://example.com").send().await.unwrap_err();

            assert!(matches!(err, Error::Middleware(_)));
            assert!(!auth_checker.checked.load(Ordering::Acquire));
        }

        mod and_predicate_evaluates_to_attach {
            use super::*;

            #[tokio::test]
            async fn middleware_attaches_access_token() {
                let middleware = prepare_middleware().with_predicate(predicate::always());
                let auth_checker = Arc::new(AuthChecker::new(BEARER_TEST_TOKEN));

                let client = ClientBuilder::new(Client::default())
                    .with(middleware)
                    .with_arc(auth_checker.clone())
                    .build();

                let resp = client.get("http://example.com").send().await.unwrap();

                assert_eq!(resp.status(), http::StatusCode::OK);
                assert!(auth_checker.checked.load(Ordering::Acquire));
            }

            #[tokio::test]
            async fn middleware_sets_user_agent_and_forwarded_for() {
                let middleware = prepare_middleware().with_predicate(predicate::always());
                let upstream = Arc::new(Upstream::answering(StatusCode::OK));

                let client = ClientBuilder::new(Client::default())
                    .with(middleware)
                    .with_arc(upstream.clone())
                    .build();

                let forwarded =
                    ForwardedFor::from_parts(&HeaderMap::new(), "203.0.113.7:51234".parse().ok())
                        .unwrap();

                client
                    .get("https://example.com/items")
                    .with_extension(forwarded)
                    .send()
                    .await
                    .unwrap();

                let seen = upstream.seen();
                assert_eq!(seen[header::USER_AGENT], DEFAULT_USER_AGENT);
                assert_eq!(seen[X_FORWARDED_FOR], "203.0.113.7");
                assert_eq!(seen[header::AUTHORIZATION], BEARER_TEST_TOKEN);
            }

            #[tokio::test]
            async fn middleware_keeps_a_user_agent_already_set() {
                let middleware = prepare_middleware().with_predicate(predicate::always());
                let upstream = Arc::new(Upstream::answering(StatusCode::OK));

                let client = ClientBuilder::new(Client::default())
                    .with(middleware)
                    .with_arc(upstream.clone())
                    .build();

                client
                    .get("https://example.com/items")
                    .header(header::USER_AGENT, "catalog-browser")
                    .send()
                    .await
                    .unwrap();

                let seen = upstream.seen();
                assert_eq!(seen[header::USER_AGENT], "catalog-browser");
                assert!(seen.get(X_FORWARDED_FOR).is_none());
            }

            #[tokio::test(start_paused = true)]
            async fn unauthorized_response_requests_a_refresh() {
                let calls = Arc::new(AtomicUsize::new(0));
                let tokens = spawn_tokens(CountingSource {
                    calls: calls.clone(),
                });
                let middleware = AccessTokenMiddleware::new(tokens.clone());
                let upstream = Arc::new(Upstream::answering(StatusCode::UNAUTHORIZED));

                let client = ClientBuilder::new(Client::default())
                    .with(middleware)
                    .with_arc(upstream.clone())
                    .build();

                let resp = client.get("https://example.com").send().await.unwrap();
                assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
                assert_eq!(calls.load(Ordering::Acquire), 1);

                tokio::time::sleep(Duration::from_millis(10)).await;
                assert_eq!(calls.load(Ordering::Acquire), 2);
            }

            #[tokio::test(start_paused = true)]
            async fn successful_response_does_not_request_a_refresh() {
                let calls = Arc::new(AtomicUsize::new(0));
                let tokens = spawn_tokens(CountingSource {
                    calls: calls.clone(),
                });
                let upstream = Arc::new(Upstream::answering(StatusCode::OK));

                let client = ClientBuilder::new(Client::default())
                    .with(AccessTokenMiddleware::new(tokens))
                    .with_arc(upstream)
                    .build();

                client.get("https://example.com").send().await.unwrap();

                tokio::time::sleep(Duration::from_millis(10)).await;
                assert_eq!(calls.load(Ordering::Acquire), 1);
            }
        }

        mod and_predicate_evaluates_to_ignore {
            use super::*;

            #[tokio::test]
            async fn middleware_does_not_attach_access_token() {
                let middleware = prepare_middleware().with_predicate(predicate::never());
                let auth_checker = Arc::new(NoAuthChecker::default());

                let client = ClientBuilder::new(Client::default())
                    .with(middleware)
                    .with_arc(auth_checker.clone())
                    .build();

                let resp = client.get("https://example.com").send().await.unwrap();

                assert_eq!(resp.status(), http::StatusCode::OK);
                assert!(auth_checker.checked.load(Ordering::Acquire));
            }
        }
    }

    mod when_request_has_an_authorization_header {
        use super::*;

        const EXISTING: &str = "Bearer caller-supplied";

        #[tokio::test]
        async fn middleware_leaves_existing_header_in_place() {
            let middleware = prepare_middleware();
            let auth_checker = Arc::new(AuthChecker::new(EXISTING));

            let client = ClientBuilder::new(Client::default())
                .with(middleware)
                .with_arc(auth_checker.clone())
                .build();

            let resp = client
                .get("https://example.com")
                .header(header::AUTHORIZATION, EXISTING)
                .send()
                .await
                .unwrap();

            assert_eq!(resp.status(), http::StatusCode::OK);
            assert!(auth_checker.checked.load(Ordering::Acquire));
        }

        #[tokio::test(start_paused = true)]
        async fn unauthorized_response_does_not_request_a_refresh() {
            let calls = Arc::new(AtomicUsize::new(0));
            let tokens = spawn_tokens(CountingSource {
                calls: calls.clone(),
            });
            tokens.initialized().await;

            let client = ClientBuilder::new(Client::default())
                .with(AccessTokenMiddleware::new(tokens))
                .with(Upstream::answering(StatusCode::UNAUTHORIZED))
                .build();

            client
                .get("https://example.com")
                .header(header::AUTHORIZATION, EXISTING)
                .send()
                .await
                .unwrap();

            tokio::time::sleep(Duration::from_millis(10)).await;
            assert_eq!(calls.load(Ordering::Acquire), 1);
        }
    }

    mod forwarded_for {
        use super::*;

        #[test]
        fn uses_peer_address_when_no_header_present() {
            let forwarded =
                ForwardedFor::from_parts(&HeaderMap::new(), "[2001:db8::1]:443".parse().ok())
                    .unwrap();
            assert_eq!(forwarded.header_value(), "2001:db8::1");
        }

        #[test]
        fn passes_along_an_existing_header() {
            let mut headers = HeaderMap::new();
            headers.insert(X_FORWARDED_FOR, HeaderValue::from_static("198.51.100.4"));

            let forwarded =
                ForwardedFor::from_parts(&headers, "203.0.113.7:51234".parse().ok()).unwrap();
            assert_eq!(forwarded.header_value(), "198.51.100.4");
        }

        #[test]
        fn ignores_an_empty_header() {
            let mut headers = HeaderMap::new();
            headers.insert(X_FORWARDED_FOR, HeaderValue::from_static(""));

            let forwarded =
                ForwardedFor::from_parts(&headers, "203.0.113.7:51234".parse().ok()).unwrap();
            assert_eq!(forwarded.header_value(), "203.0.113.7");
        }

        #[test]
        fn is_unknown_without_header_or_peer() {
            assert!(ForwardedFor::from_parts(&HeaderMap::new(), None).is_none());
        }
    }

    mod request_predicates {
        use super::*;

        fn request(url: &str) -> Request {
            Request::new(Method::GET, url.parse().unwrap())
        }

        fn catalog() -> UpstreamPrefix {
            UpstreamPrefix::new(
                "https://sandbox.iii.com/iii/sierra-api/v1/"
                    .parse()
                    .unwrap(),
            )
        }

        #[test]
        fn https_only_reports_the_offending_scheme() {
            let req = request("http://example.com");
            assert!(!HttpsOnly.eval(&req));

            let case = HttpsOnly.find_case(true, &req).unwrap();
            let scheme = case.products().next().unwrap();
            assert_eq!(scheme.name(), "scheme");
            assert_eq!(scheme.value().to_string(), "http");

            assert!(HttpsOnly.find_case(true, &request("https://example.com")).is_none());
        }

        #[test]
        fn upstream_prefix_accepts_paths_under_the_base() {
            let catalog = catalog();
            assert!(catalog.eval(&request("https://sandbox.iii.com/iii/sierra-api/v1")));
            assert!(catalog.eval(&request(
                "https://sandbox.iii.com/iii/sierra-api/v1/items?bibIds=1000001"
            )));
        }

        #[test]
        fn upstream_prefix_rejects_other_origins_and_paths() {
            let catalog = catalog();
            assert!(!catalog.eval(&request("http://sandbox.iii.com/iii/sierra-api/v1/items")));
            assert!(!catalog.eval(&request("https://example.com/iii/sierra-api/v1/items")));
            assert!(!catalog.eval(&request(
                "https://sandbox.iii.com:8443/iii/sierra-api/v1/items"
            )));
            assert!(!catalog.eval(&request("https://sandbox.iii.com/iii/sierra-api/v10/items")));
        }

        #[test]
        fn upstream_prefix_displays_its_base() {
            assert_eq!(
                catalog().to_string(),
                "url under https://sandbox.iii.com/iii/sierra-api/v1/"
            );
        }
    }
}
