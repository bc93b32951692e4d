//! Client configuration.
//!
//! Every value has a default; the environment (or a build-time lookup in the
//! browser) may override it.

const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
const ENV_API_BASE: &str = "ICYCON_API_BASE";
const ENV_AUTH_SCHEME: &str = "ICYCON_AUTH_SCHEME";

/// Prefix placed in front of the token in the `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScheme {
    Bearer,
    /// Django REST framework `TokenAuthentication`.
    #[default]
    Token,
}

impl AuthScheme {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bearer" => Some(AuthScheme::Bearer),
            "token" => Some(AuthScheme::Token),
            _ => None,
        }
    }

    pub fn header_value(&self, token: &str) -> String {
        match self {
            AuthScheme::Bearer => format!("Bearer {}", token),
            AuthScheme::Token => format!("Token {}", token),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin of the REST API without a trailing slash. Empty means
    /// same-origin relative URLs.
    pub base_url: String,
    pub auth_scheme: AuthScheme,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            auth_scheme: AuthScheme::default(),
        }
    }

    pub fn with_auth_scheme(mut self, scheme: AuthScheme) -> Self {
        self.auth_scheme = scheme;
        self
    }

    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through an arbitrary lookup; unknown or blank values
    /// keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base = lookup(ENV_API_BASE)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let scheme = lookup(ENV_AUTH_SCHEME)
            .and_then(|v| AuthScheme::parse(&v))
            .unwrap_or_default();
        Self::new(base).with_auth_scheme(scheme)
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.auth_scheme, AuthScheme::Token);
    }

    #[test]
    fn overrides_are_read_and_trimmed() {
        let config = ClientConfig::from_lookup(|key| match key {
            "ICYCON_API_BASE" => Some("https://api.icycon.io/".to_string()),
            "ICYCON_AUTH_SCHEME" => Some("Bearer".to_string()),
            _ => None,
        });
        assert_eq!(config.base_url, "https://api.icycon.io");
        assert_eq!(config.auth_scheme, AuthScheme::Bearer);
        assert_eq!(
            config.url("/api/seo/sites/"),
            "https://api.icycon.io/api/seo/sites/"
        );
        assert_eq!(config.url("api/x/"), "https://api.icycon.io/api/x/");
    }

    #[test]
    fn empty_base_yields_relative_urls() {
        let config = ClientConfig::new("");
        assert_eq!(config.url("/api/profile/"), "/api/profile/");
    }

    #[test]
    fn unknown_scheme_falls_back_to_token() {
        let config = ClientConfig::from_lookup(|key| {
            (key == "ICYCON_AUTH_SCHEME").then(|| "basic".to_string())
        });
        assert_eq!(config.auth_scheme.header_value("abc"), "Token abc");
    }
}
