use std::net::{IpAddr, SocketAddr};
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

/// Logs one line per request with the client address, status and latency.
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let client = client_ip(request.headers(), peer)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "-".to_string());

    let started = Instant::now();
    let response = next.run(request).await;
    let status = response.status().as_u16();
    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

    if response.status().is_server_error() {
        warn!(%method, %path, status, latency_ms, client_ip = %client, "request failed");
    } else {
        info!(%method, %path, status, latency_ms, client_ip = %client, "request served");
    }
    response
}

/// Resolves the originating client: the first `X-Forwarded-For` hop, then
/// `X-Real-IP`, then the socket peer.
pub fn client_ip(headers: &HeaderMap, peer: Option<IpAddr>) -> Option<IpAddr> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .and_then(|hop| hop.trim().parse().ok());
    if forwarded.is_some() {
        return forwarded;
    }

    headers
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
        .or(peer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> Option<IpAddr> {
        Some(IpAddr::from([10, 0, 0, 7]))
    }

    #[test]
    fn client_ip_prefers_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.4"));
        assert_eq!(
            client_ip(&headers, peer()),
            Some(IpAddr::from([203, 0, 113, 9]))
        );
    }

    #[test]
    fn client_ip_falls_back_to_real_ip_then_peer() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("unknown"));
        headers.insert("x-real-ip", HeaderValue::from_static(" 2001:db8::1 "));
        assert_eq!(
            client_ip(&headers, peer()),
            Some("2001:db8::1".parse().expect("valid ipv6"))
        );

        assert_eq!(client_ip(&HeaderMap::new(), peer()), peer());
        assert_eq!(client_ip(&HeaderMap::new(), None), None);
    }
}
