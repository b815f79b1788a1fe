//! Client identity behind reverse proxies.
//!
//! # Responsibilities
//! - Derive the apparent client address from the socket peer and `X-Forwarded-For`
//! - Honor only a configured number of trusted forwarding hops
//!
//! # Design Decisions
//! - The peer is always trusted to report one hop; each additional trusted hop
//!   moves one entry further left in `X-Forwarded-For`
//! - Never walk further than the trusted depth, so clients cannot pick their
//!   own rate-limit key by prepending fake entries
//! - An unparseable entry stops the walk at the last trusted address

use std::net::IpAddr;

use axum::http::HeaderMap;

pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Key used when no peer address is known.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Apparent client address after trusting `trusted_hops` proxies.
pub fn client_addr(headers: &HeaderMap, peer: IpAddr, trusted_hops: usize) -> IpAddr {
    let mut addr = peer;
    if trusted_hops == 0 {
        return addr;
    }

    // Rightmost entry was appended by the nearest proxy.
    let forwarded: Vec<&str> = headers
        .get_all(X_FORWARDED_FOR)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect();

    for entry in forwarded.iter().rev().take(trusted_hops) {
        match entry.parse::<IpAddr>() {
            Ok(hop) => addr = hop,
            Err(_) => break,
        }
    }
    addr
}

/// Rate-limit key for a request.
pub fn client_identity(headers: &HeaderMap, peer: Option<IpAddr>, trusted_hops: usize) -> String {
    match peer {
        Some(peer) => client_addr(headers, peer, trusted_hops).to_string(),
        None => UNKNOWN_CLIENT.to_string(),
    }
}
