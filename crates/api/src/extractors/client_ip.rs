//! Client identity extractors.
//!
//! The service runs behind a proxy, so the client address comes from
//! forwarding headers rather than the socket peer.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

/// Placeholder used when no identifying header is present.
pub const UNKNOWN_CLIENT: &str = "unknown";

const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";
const REAL_IP_HEADER: &str = "x-real-ip";

/// First hop of `X-Forwarded-For`, trimmed. Empty values count as absent.
fn first_forwarded(headers: &HeaderMap) -> Option<String> {
    headers
        .get(FORWARDED_FOR_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn real_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REAL_IP_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Rate-limit key for registration: `X-Forwarded-For` only.
///
/// Every client without the header shares the `"unknown"` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientId(pub String);

impl ClientId {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self(first_forwarded(headers).unwrap_or_else(|| UNKNOWN_CLIENT.to_string()))
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for ClientId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

/// Visitor address for analytics: `X-Forwarded-For`, then `X-Real-IP`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorAddr(pub String);

impl VisitorAddr {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self(
            first_forwarded(headers)
                .or_else(|| real_ip(headers))
                .unwrap_or_else(|| UNKNOWN_CLIENT.to_string()),
        )
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for VisitorAddr
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

/// `User-Agent` header, or `"unknown"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgent(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for UserAgent
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let agent = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_CLIENT);
        Ok(Self(agent.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request};

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_client_id_first_forwarded_hop() {
        let h = headers(&[("x-forwarded-for", " 203.0.113.7 , 10.0.0.1")]);
        assert_eq!(ClientId::from_headers(&h).0, "203.0.113.7");
    }

    #[test]
    fn test_client_id_missing_header() {
        assert_eq!(ClientId::from_headers(&HeaderMap::new()).0, UNKNOWN_CLIENT);
    }

    #[test]
    fn test_client_id_ignores_real_ip() {
        let h = headers(&[("x-real-ip", "198.51.100.2")]);
        assert_eq!(ClientId::from_headers(&h).0, UNKNOWN_CLIENT);
    }

    #[test]
    fn test_client_id_empty_forwarded() {
        let h = headers(&[("x-forwarded-for", "  ")]);
        assert_eq!(ClientId::from_headers(&h).0, UNKNOWN_CLIENT);
    }

    #[test]
    fn test_visitor_addr_falls_back_to_real_ip() {
        let h = headers(&[("x-real-ip", "198.51.100.2")]);
        assert_eq!(VisitorAddr::from_headers(&h).0, "198.51.100.2");
    }

    #[test]
    fn test_visitor_addr_prefers_forwarded() {
        let h = headers(&[
            ("x-forwarded-for", "203.0.113.7"),
            ("x-real-ip", "198.51.100.2"),
        ]);
        assert_eq!(VisitorAddr::from_headers(&h).0, "203.0.113.7");
    }

    #[test]
    fn test_visitor_addr_unknown() {
        assert_eq!(VisitorAddr::from_headers(&HeaderMap::new()).0, UNKNOWN_CLIENT);
    }

    #[tokio::test]
    async fn test_user_agent_extractor() {
        let (mut parts, _) = Request::builder()
            .header("user-agent", "Mozilla/5.0")
            .body(())
            .unwrap()
            .into_parts();
        let agent = UserAgent::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(agent.0, "Mozilla/5.0");

        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();
        let agent = UserAgent::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(agent.0, UNKNOWN_CLIENT);
    }
}
