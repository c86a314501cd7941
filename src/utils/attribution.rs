//! Attribution headers forwarded to the backend on every lookup.

use axum::extract::ConnectInfo;
use axum::http::{Extensions, HeaderMap, HeaderName, HeaderValue, header};
use std::net::{IpAddr, SocketAddr};

const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// Headers copied from the browser request to the backend lookup.
///
/// The backend uses them for click attribution: client address, referrer and
/// the optional device/browser/OS client hints.
pub const FORWARDED_HEADERS: [HeaderName; 7] = [
    header::USER_AGENT,
    X_FORWARDED_FOR,
    HeaderName::from_static("x-real-ip"),
    header::REFERER,
    HeaderName::from_static("sec-ch-ua"),
    HeaderName::from_static("sec-ch-ua-mobile"),
    HeaderName::from_static("sec-ch-ua-platform"),
];

/// Extracts the forwarded subset of `headers`.
///
/// Absent headers are skipped; every value of a repeated header is kept.
/// `peer`, when given, is appended to `X-Forwarded-For` the way a proxy
/// would, so the backend sees the browser's address instead of ours.
pub fn attribution_headers(headers: &HeaderMap, peer: Option<IpAddr>) -> HeaderMap {
    let mut forwarded = HeaderMap::new();

    for name in &FORWARDED_HEADERS {
        for value in headers.get_all(name) {
            forwarded.append(name.clone(), value.clone());
        }
    }

    if let Some(peer) = peer
        && let Ok(value) = HeaderValue::from_str(&peer.to_string())
    {
        forwarded.append(X_FORWARDED_FOR, value);
    }

    forwarded
}

/// Socket peer of the request, unless a trusted proxy already reports the
/// client address. `None` when the server runs without `ConnectInfo`.
pub fn client_peer(extensions: &Extensions, behind_proxy: bool) -> Option<IpAddr> {
    if behind_proxy {
        return None;
    }
    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
}
