//! Session cookie helpers.

use axum::http::{HeaderMap, header::COOKIE};
use cookie::{Cookie, SameSite};

/// Default name of the session cookie.
pub const DEFAULT_SESSION_COOKIE: &str = "access_token";

/// Returns the session token from the request cookies.
///
/// Handles several `Cookie` headers and several cookies per header. Malformed
/// pairs are skipped; an empty value counts as no token.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| Cookie::split_parse(value))
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == cookie_name && !cookie.value().is_empty())
        .map(|cookie| cookie.value().to_string())
}

/// Builds the `Set-Cookie` value storing a new session token.
///
/// Scoped to the whole site, hidden from page scripts and withheld from
/// cross-site subrequests.
pub fn session_cookie(cookie_name: &str, token: &str) -> String {
    Cookie::build((cookie_name.to_string(), token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
        .to_string()
}

/// Builds a `Set-Cookie` value that removes the session cookie.
pub fn removal_cookie(cookie_name: &str) -> String {
    let mut cookie = Cookie::new(cookie_name.to_string(), "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(values: &[&'static str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for value in values {
            headers.append(COOKIE, HeaderValue::from_static(value));
        }
        headers
    }

    #[test]
    fn test_session_token_single_cookie() {
        let headers = headers_with(&["access_token=abc123"]);
        assert_eq!(
            session_token(&headers, DEFAULT_SESSION_COOKIE),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_session_token_among_other_cookies() {
        let headers = headers_with(&["theme=dark; access_token=tok; lang=en"]);
        assert_eq!(
            session_token(&headers, DEFAULT_SESSION_COOKIE),
            Some("tok".to_string())
        );
    }

    #[test]
    fn test_session_token_in_second_header() {
        let headers = headers_with(&["theme=dark", "access_token=tok"]);
        assert_eq!(
            session_token(&headers, DEFAULT_SESSION_COOKIE),
            Some("tok".to_string())
        );
    }

    #[test]
    fn test_session_token_missing_or_empty() {
        assert_eq!(session_token(&HeaderMap::new(), DEFAULT_SESSION_COOKIE), None);
        assert_eq!(
            session_token(&headers_with(&["access_token="]), DEFAULT_SESSION_COOKIE),
            None
        );
        assert_eq!(
            session_token(&headers_with(&["other_token=x"]), DEFAULT_SESSION_COOKIE),
            None
        );
    }

    #[test]
    fn test_session_token_custom_name() {
        let headers = headers_with(&["sid=s1; access_token=a1"]);
        assert_eq!(session_token(&headers, "sid"), Some("s1".to_string()));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let value = removal_cookie(DEFAULT_SESSION_COOKIE);

        assert!(value.starts_with("access_token=;"));
        assert!(value.contains("Path=/"));
        assert!(value.contains("Max-Age=0"));
    }

    #[test]
    fn test_session_cookie_attributes() {
        let value = session_cookie(DEFAULT_SESSION_COOKIE, "tok");

        assert!(value.starts_with("access_token=tok"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Lax"));
        assert!(value.contains("Path=/"));
    }
}
