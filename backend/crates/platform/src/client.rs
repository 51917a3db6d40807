//! Client identification utilities
//!
//! Resolves the address a request is attributed to.

use axum::http::HeaderMap;
use std::net::IpAddr;

/// Key used when no address can be determined (e.g. in-process tests)
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For header first (for reverse proxy setups),
/// then falls back to direct connection IP.
///
/// ## Arguments
/// * `headers` - HTTP request headers
/// * `direct_ip` - Direct connection IP address
///
/// ## Returns
/// The client IP address, or None if not determinable
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    // First entry is the original client; later ones are proxies.
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first_ip) = xff.split(',').next() {
            if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }
    direct_ip
}

/// Resolve the rate-limit key for a request
///
/// Forwarding headers are client-controlled, so they are only honoured
/// when the deployment sits behind a trusted proxy.
pub fn client_key(headers: &HeaderMap, direct_ip: Option<IpAddr>, trust_proxy: bool) -> String {
    let ip = if trust_proxy {
        extract_client_ip(headers, direct_ip)
    } else {
        direct_ip
    };

    ip.map(|ip| ip.to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}
