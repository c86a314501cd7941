//! Navigation guard for dashboard and auth pages.
//!
//! The decision is a pure function of the requested path and whether a
//! session token is present; the axum wiring lives in
//! [`crate::web::middleware::route_guard`].

use url::form_urlencoded;

/// Login page; unauthenticated visitors of protected paths land here.
pub const LOGIN_PATH: &str = "/auth/login";

/// Main dashboard; authenticated visitors of auth pages land here.
pub const DASHBOARD_PATH: &str = "/main";

/// Default protected path prefixes.
pub const DEFAULT_PROTECTED_PREFIXES: [&str; 3] = ["/main", "/links", "/settings"];

/// Default auth-only pages.
pub const DEFAULT_AUTH_PATHS: [&str; 2] = ["/auth/login", "/auth/register"];

/// Paths never inspected by the guard.
const STATIC_PREFIXES: [&str; 1] = ["/static/"];
const STATIC_FILES: [&str; 3] = ["/favicon.ico", "/robots.txt", "/health"];

/// Result of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Pass,
    RedirectToLogin { target: String },
    RedirectToDashboard,
}

/// Configured protected prefixes and auth-only pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    protected_prefixes: Vec<String>,
    auth_paths: Vec<String>,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(
            DEFAULT_PROTECTED_PREFIXES.iter().map(|p| p.to_string()),
            DEFAULT_AUTH_PATHS.iter().map(|p| p.to_string()),
        )
    }
}

impl RouteGuard {
    /// Creates a guard. Trailing slashes on configured paths are ignored.
    pub fn new(
        protected_prefixes: impl IntoIterator<Item = String>,
        auth_paths: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            protected_prefixes: protected_prefixes.into_iter().map(normalize).collect(),
            auth_paths: auth_paths.into_iter().map(normalize).collect(),
        }
    }

    pub fn protected_prefixes(&self) -> &[String] {
        &self.protected_prefixes
    }

    pub fn auth_paths(&self) -> &[String] {
        &self.auth_paths
    }

    /// Decides what to do with a navigation to `path`.
    ///
    /// - static assets: pass
    /// - protected path without token: login, with the path as return target,
    ///   whatever the last segment looks like (`/settings/export.csv` included)
    /// - auth page with token: dashboard
    /// - anything else: pass
    pub fn decide(&self, path: &str, has_token: bool) -> GuardDecision {
        if is_static_asset(path) {
            return GuardDecision::Pass;
        }

        let path = normalize_ref(path);

        if !has_token && self.is_protected(path) {
            return GuardDecision::RedirectToLogin {
                target: login_target(path),
            };
        }

        if has_token && self.is_auth_path(path) {
            return GuardDecision::RedirectToDashboard;
        }

        GuardDecision::Pass
    }

    pub fn is_protected(&self, path: &str) -> bool {
        let path = normalize_ref(path);
        self.protected_prefixes
            .iter()
            .any(|prefix| matches_prefix(path, prefix))
    }

    pub fn is_auth_path(&self, path: &str) -> bool {
        let path = normalize_ref(path);
        self.auth_paths.iter().any(|auth| auth == path)
    }
}

/// Returns `true` for assets the guard never inspects: `/static/*`,
/// `/favicon.ico`, `/robots.txt` and `/health`.
pub fn is_static_asset(path: &str) -> bool {
    STATIC_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) || STATIC_FILES.contains(&path)
}

/// `/auth/login?redirect={path}`
pub fn login_target(path: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("redirect", path)
        .finish();
    format!("{LOGIN_PATH}?{query}")
}

/// Accepts a post-login return target only if it stays on this site.
///
/// Falls back to [`DASHBOARD_PATH`] for absent, absolute, protocol-relative
/// or backslash-smuggled targets.
pub fn sanitize_return_target(target: Option<&str>) -> String {
    match target {
        Some(t) if t.starts_with('/') && !t.starts_with("//") && !t.contains('\\') => {
            t.to_string()
        }
        _ => DASHBOARD_PATH.to_string(),
    }
}

/// Prefix match aligned on path segments: `/main` covers `/main` and
/// `/main/x` but not `/mainframe`.
fn matches_prefix(path: &str, prefix: &str) -> bool {
    if prefix == "/" {
        return true;
    }
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

fn normalize(path: String) -> String {
    normalize_ref(&path).to_string()
}

fn normalize_ref(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_path_without_token_redirects_to_login() {
        let guard = RouteGuard::default();

        assert_eq!(
            guard.decide("/main", false),
            GuardDecision::RedirectToLogin {
                target: "/auth/login?redirect=%2Fmain".to_string()
            }
        );
        assert_eq!(
            guard.decide("/links/abc/edit", false),
            GuardDecision::RedirectToLogin {
                target: "/auth/login?redirect=%2Flinks%2Fabc%2Fedit".to_string()
            }
        );
    }

    #[test]
    fn test_protected_path_with_token_passes() {
        let guard = RouteGuard::default();

        for path in ["/main", "/links", "/settings", "/settings/profile"] {
            assert_eq!(guard.decide(path, true), GuardDecision::Pass, "{path}");
        }
    }

    #[test]
    fn test_auth_pages_with_token_redirect_to_dashboard() {
        let guard = RouteGuard::default();

        assert_eq!(
            guard.decide("/auth/login", true),
            GuardDecision::RedirectToDashboard
        );
        assert_eq!(
            guard.decide("/auth/register/", true),
            GuardDecision::RedirectToDashboard
        );
        assert_eq!(guard.decide("/auth/login", false), GuardDecision::Pass);
    }

    #[test]
    fn test_prefix_is_segment_aligned() {
        let guard = RouteGuard::default();

        assert_eq!(guard.decide("/mainframe", false), GuardDecision::Pass);
        assert_eq!(guard.decide("/linksy", false), GuardDecision::Pass);
    }

    #[test]
    fn test_public_paths_pass() {
        let guard = RouteGuard::default();

        for path in ["/", "/abc123", "/abc123/enter-passcode", "/link-error"] {
            assert_eq!(guard.decide(path, false), GuardDecision::Pass, "{path}");
            assert_eq!(guard.decide(path, true), GuardDecision::Pass, "{path}");
        }
    }

    #[test]
    fn test_static_assets_are_never_guarded() {
        let guard = RouteGuard::new(vec!["/".to_string()], Vec::new());

        assert_eq!(guard.decide("/static/app.css", false), GuardDecision::Pass);
        assert_eq!(guard.decide("/favicon.ico", false), GuardDecision::Pass);
        assert_eq!(guard.decide("/robots.txt", false), GuardDecision::Pass);
        assert_eq!(guard.decide("/health", false), GuardDecision::Pass);
        assert!(matches!(
            guard.decide("/anything", false),
            GuardDecision::RedirectToLogin { .. }
        ));
    }

    #[test]
    fn test_protected_file_paths_still_require_token() {
        let guard = RouteGuard::default();

        assert_eq!(
            guard.decide("/settings/export.csv", false),
            GuardDecision::RedirectToLogin {
                target: "/auth/login?redirect=%2Fsettings%2Fexport.csv".to_string()
            }
        );
        assert!(matches!(
            guard.decide("/main/logo.png", false),
            GuardDecision::RedirectToLogin { .. }
        ));
        assert_eq!(
            guard.decide("/settings/export.csv", true),
            GuardDecision::Pass
        );
    }

    #[test]
    fn test_public_file_paths_pass() {
        let guard = RouteGuard::default();

        assert_eq!(guard.decide("/sitemap.xml", false), GuardDecision::Pass);
        assert_eq!(guard.decide("/bad.code", false), GuardDecision::Pass);
    }

    #[test]
    fn test_custom_configuration_normalizes_trailing_slash() {
        let guard = RouteGuard::new(
            vec!["/admin/".to_string()],
            vec!["/signin/".to_string()],
        );

        assert_eq!(guard.protected_prefixes(), ["/admin".to_string()]);
        assert!(guard.is_protected("/admin/users"));
        assert!(!guard.is_protected("/main"));
        assert!(guard.is_auth_path("/signin"));
    }

    #[test]
    fn test_sanitize_return_target() {
        assert_eq!(sanitize_return_target(Some("/links")), "/links");
        assert_eq!(sanitize_return_target(None), "/main");
        assert_eq!(sanitize_return_target(Some("https://evil.test")), "/main");
        assert_eq!(sanitize_return_target(Some("//evil.test")), "/main");
        assert_eq!(sanitize_return_target(Some("/\\evil.test")), "/main");
    }
}
