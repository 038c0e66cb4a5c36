//! Blocking HTTP executor backed by ureq
//!
//! Uses synchronous HTTP (ureq) to be executor-agnostic.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;
use url::Url;

use super::executor::{RequestExecutor, parse_body};
use crate::config::{ClientConfig, Credentials};
use crate::error::{Result, TransportError};
use crate::params::Params;

/// Media type requested from the REST API
const ACCEPT: &str = "application/vnd.github+json";

/// Executor that talks to a GitHub (or GitHub Enterprise) REST endpoint
pub struct HttpExecutor {
    agent: ureq::Agent,
    config: ClientConfig,
}

impl HttpExecutor {
    /// Create an executor honoring the proxy environment variables
    pub fn new(config: ClientConfig) -> Self {
        Self::with_proxy(config, ureq::Proxy::try_from_env())
    }

    /// Create an executor with an explicit proxy, or none
    pub fn with_proxy(config: ClientConfig, proxy: Option<ureq::Proxy>) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .http_status_as_error(false)
            .proxy(proxy)
            .build();

        Self {
            agent: ureq::Agent::new_with_config(agent_config),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Value of the Authorization header, if credentials are configured
    fn authorization(&self) -> Option<String> {
        match &self.config.credentials {
            Credentials::Anonymous => None,
            Credentials::Token(token) => Some(format!("token {}", token)),
            Credentials::Basic { login, password } => Some(format!(
                "Basic {}",
                STANDARD.encode(format!("{}:{}", login, password))
            )),
        }
    }
}

/// Join the endpoint and path, then append the query
///
/// The endpoint's own path is kept, so `https://ghe.example.com/api/v3`
/// plus `/notifications` targets `/api/v3/notifications`.
pub fn request_url(endpoint: &str, path: &str, params: &Params) -> Result<Url> {
    let raw = format!("{}{}", endpoint.trim_end_matches('/'), path);
    let mut url = Url::parse(&raw).map_err(|source| TransportError::InvalidUrl {
        url: raw.clone(),
        source,
    })?;

    if !params.is_empty() {
        let mut query = url.query_pairs_mut();
        for (key, value) in params {
            query.append_pair(key, value);
        }
    }

    Ok(url)
}

impl RequestExecutor for HttpExecutor {
    fn get(&self, path: &str, params: &Params) -> Result<Value> {
        let url = request_url(&self.config.endpoint, path, params)?;
        log::debug!("GET {} {:?}", path, params.keys().collect::<Vec<_>>());

        let mut request = self
            .agent
            .get(url.as_str())
            .header("Accept", ACCEPT)
            .header("User-Agent", &self.config.user_agent);
        if let Some(authorization) = self.authorization() {
            request = request.header("Authorization", &authorization);
        }

        let mut response = request.call().map_err(|source| TransportError::Request {
            path: path.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("GitHub API returned {} for {}", status, path);
            return Err(TransportError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            }
            .into());
        }

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|source| TransportError::Request {
                path: path.to_string(),
                source,
            })?;

        parse_body(path, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread::JoinHandle;

    /// Serve one canned HTTP response on a loopback port
    ///
    /// Returns the endpoint URL and a handle yielding the raw request head.
    fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );

        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut head = String::new();
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
                head.push_str(&line);
            }
            stream.write_all(response.as_bytes()).unwrap();
            head
        });

        (endpoint, handle)
    }

    fn executor_for(endpoint: String, credentials: Credentials) -> HttpExecutor {
        let config = ClientConfig {
            endpoint,
            user_agent: "octofeed-tests".to_string(),
            credentials,
            ..ClientConfig::default()
        };
        HttpExecutor::with_proxy(config, None)
    }

    #[test]
    fn test_get_translates_error_status() {
        let (endpoint, server) = serve_once("404 Not Found", r#"{"message":"Not Found"}"#);
        let executor = executor_for(endpoint, Credentials::Anonymous);

        let err = executor
            .get("/notifications/threads/1/subscription", &Params::new())
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("/notifications/threads/1/subscription"));
        server.join().unwrap();
    }

    #[test]
    fn test_get_empty_body_is_null() {
        let (endpoint, server) = serve_once("200 OK", "");
        let executor = executor_for(endpoint, Credentials::Anonymous);

        let body = executor.get("/notifications", &Params::new()).unwrap();
        assert_eq!(body, Value::Null);
        server.join().unwrap();
    }

    #[test]
    fn test_get_sends_headers_and_query() {
        let (endpoint, server) = serve_once("200 OK", r#"[{"id":"1"}]"#);
        let executor = executor_for(endpoint, Credentials::Token("abc".to_string()));
        let mut params = Params::new();
        params.insert("all".to_string(), "true".to_string());

        let body = executor.get("/notifications", &params).unwrap();
        assert_eq!(body[0]["id"], "1");

        let head = server.join().unwrap().to_ascii_lowercase();
        assert!(head.starts_with("get /notifications?all=true http/1.1"));
        assert!(head.contains("authorization: token abc"));
        assert!(head.contains("accept: application/vnd.github+json"));
        assert!(head.contains("user-agent: octofeed-tests"));
    }

    #[test]
    fn test_get_anonymous_omits_authorization() {
        let (endpoint, server) = serve_once("200 OK", "[]");
        let executor = executor_for(endpoint, Credentials::Anonymous);

        executor.get("/notifications", &Params::new()).unwrap();
        let head = server.join().unwrap().to_ascii_lowercase();
        assert!(!head.contains("authorization:"));
    }

    fn executor(credentials: Credentials) -> HttpExecutor {
        HttpExecutor::new(ClientConfig {
            credentials,
            ..ClientConfig::default()
        })
    }

    #[test]
    fn test_request_url_public_api() {
        let url = request_url("https://api.github.com", "/notifications", &Params::new()).unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/notifications");
    }

    #[test]
    fn test_request_url_keeps_enterprise_prefix() {
        let url = request_url(
            "https://ghe.example.com/api/v3/",
            "/notifications/threads/42",
            &Params::new(),
        )
        .unwrap();
        assert_eq!(url.as_str(), "https://ghe.example.com/api/v3/notifications/threads/42");
    }

    #[test]
    fn test_request_url_encodes_query() {
        let mut params = Params::new();
        params.insert("all".to_string(), "true".to_string());
        params.insert("since".to_string(), "2012-10-09T23:39:01Z".to_string());

        let url = request_url("https://api.github.com", "/notifications", &params).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/notifications?all=true&since=2012-10-09T23%3A39%3A01Z"
        );
    }

    #[test]
    fn test_request_url_invalid_endpoint() {
        let err = request_url("not a url", "/notifications", &Params::new()).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Transport(TransportError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_authorization_header() {
        assert_eq!(executor(Credentials::Anonymous).authorization(), None);
        assert_eq!(
            executor(Credentials::Token("abc".to_string())).authorization(),
            Some("token abc".to_string())
        );
        // base64("octocat:hunter2")
        assert_eq!(
            executor(Credentials::Basic {
                login: "octocat".to_string(),
                password: "hunter2".to_string(),
            })
            .authorization(),
            Some("Basic b2N0b2NhdDpodW50ZXIy".to_string())
        );
    }
}
