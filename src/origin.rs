// SPDX-License-Identifier: MIT

//! Request origin handling and outbound URL construction.
//!
//! An [`Origin`] records which externally reachable host a redirect should
//! target: the released app host, or a local debug port during development.
//! It is captured from the `Origin` header when a log-in URL is issued,
//! persisted with the log-in state, and replayed at callback time.

use serde::{Deserialize, Serialize};

/// Where a redirect should land.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Origin {
    /// The released SPA host.
    Release,
    /// A local dev server, `http://localhost:<port>`.
    Debug { port: u16 },
}

impl Origin {
    /// Classify a request's `Origin` header. Anything that is not a
    /// `http://localhost:<port>` origin maps to the released host.
    pub fn from_header(origin_header: Option<&str>) -> Origin {
        let Some(header) = origin_header else {
            return Origin::Release;
        };
        let Some(rest) = header.strip_prefix("http://localhost") else {
            return Origin::Release;
        };
        match rest.strip_prefix(':') {
            Some(port) => match port.parse() {
                Ok(port) => Origin::Debug { port },
                Err(_) => Origin::Release,
            },
            None if rest.is_empty() => Origin::Debug { port: 80 },
            None => Origin::Release,
        }
    }

    /// The base URL (scheme + host, no trailing slash) for this origin.
    pub fn base_url(&self, app_origin: &str) -> String {
        match self {
            Origin::Release => app_origin.to_string(),
            Origin::Debug { port } => format!("http://localhost:{}", port),
        }
    }
}

/// Percent-encode a form value, with spaces as `+`.
fn form_encode(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}

/// Build `https://<host>/<path...>?<query>` with form-encoded parameters.
pub fn url_with_query(host: &str, path: &[&str], query: &[(&str, &str)]) -> String {
    let mut url = format!("https://{}/{}", host, path.join("/"));
    for (i, (key, value)) in query.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str(&format!("{}={}", form_encode(key), form_encode(value)));
    }
    url
}

/// Build `<base><path>#<params>` with the parameters encoded like a query
/// string but carried in the fragment, so the browser never sends them to
/// any server.
pub fn url_with_fragment(base: &str, path: &str, params: &[(&str, &str)]) -> String {
    let mut url = format!("{}{}", base, path);
    for (i, (key, value)) in params.iter().enumerate() {
        url.push(if i == 0 { '#' } else { '&' });
        url.push_str(&format!("{}={}", form_encode(key), form_encode(value)));
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_from_localhost_header() {
        assert_eq!(
            Origin::from_header(Some("http://localhost:2520")),
            Origin::Debug { port: 2520 }
        );
    }

    #[test]
    fn test_origin_from_release_header() {
        assert_eq!(
            Origin::from_header(Some("https://teame-c1a32.web.app")),
            Origin::Release
        );
        assert_eq!(Origin::from_header(None), Origin::Release);
        // https localhost is not a dev origin
        assert_eq!(
            Origin::from_header(Some("https://localhost:2520")),
            Origin::Release
        );
    }

    #[test]
    fn test_base_url() {
        let app = "https://teame-c1a32.web.app";
        assert_eq!(Origin::Release.base_url(app), app);
        assert_eq!(
            Origin::Debug { port: 2520 }.base_url(app),
            "http://localhost:2520"
        );
    }

    #[test]
    fn test_url_with_query_encoding() {
        let url = url_with_query(
            "access.line.me",
            &["oauth2", "v2.1", "authorize"],
            &[("scope", "profile openid"), ("state", "abc123")],
        );
        assert_eq!(
            url,
            "https://access.line.me/oauth2/v2.1/authorize?scope=profile+openid&state=abc123"
        );
    }

    #[test]
    fn test_url_with_fragment() {
        let url = url_with_fragment(
            "https://teame-c1a32.web.app",
            "/dashboard",
            &[("accessToken", "deadbeef")],
        );
        assert_eq!(
            url,
            "https://teame-c1a32.web.app/dashboard#accessToken=deadbeef"
        );
    }
}
