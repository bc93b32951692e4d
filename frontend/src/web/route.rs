//! Route table. Pure: no DOM access, so it is tested natively.

use icycon_shared::RecordId;
use std::fmt::Display;

/// Dashboard sections under `/app/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    Seo,
    Aso,
    Marketplace,
    Analytics,
    Social,
    Email,
    Profile,
    Account,
}

impl Module {
    pub const ALL: [Module; 8] = [
        Module::Seo,
        Module::Aso,
        Module::Marketplace,
        Module::Analytics,
        Module::Social,
        Module::Email,
        Module::Profile,
        Module::Account,
    ];

    pub fn segment(&self) -> &'static str {
        match self {
            Module::Seo => "seo",
            Module::Aso => "aso",
            Module::Marketplace => "marketplace",
            Module::Analytics => "analytics",
            Module::Social => "social",
            Module::Email => "email",
            Module::Profile => "profile",
            Module::Account => "account",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Module::Seo => "SEO",
            Module::Aso => "ASO",
            Module::Marketplace => "Marketplace",
            Module::Analytics => "Analytics",
            Module::Social => "Social",
            Module::Email => "Email",
            Module::Profile => "Profile",
            Module::Account => "Account",
        }
    }

    fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.segment() == segment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum AppRoute {
    #[default]
    Landing,
    Login,
    Signup,
    Module(Module),
    SeoSite(RecordId),
}

impl AppRoute {
    /// Unknown paths resolve to the landing page.
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();
        match segments.as_slice() {
            [] | [""] => Self::Landing,
            ["login"] => Self::Login,
            ["signup"] => Self::Signup,
            // the dashboard index opens on the first module
            ["app"] => Self::Module(Module::Seo),
            ["app", segment] => Module::from_segment(segment)
                .map(Self::Module)
                .unwrap_or_default(),
            ["app", "seo", "site", id] if !id.is_empty() => Self::SeoSite(RecordId::from(*id)),
            _ => Self::Landing,
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Self::Landing => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Signup => "/signup".to_string(),
            Self::Module(m) => format!("/app/{}", m.segment()),
            Self::SeoSite(id) => format!("/app/seo/site/{}", id),
        }
    }

    /// Everything under `/app/` is private.
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Module(_) | Self::SeoSite(_))
    }

    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Signup)
    }

    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    pub fn auth_success_redirect() -> Self {
        Self::Module(Module::Seo)
    }

    /// Sidebar highlighting: the detail page belongs to SEO.
    pub fn module(&self) -> Option<Module> {
        match self {
            Self::Module(m) => Some(*m),
            Self::SeoSite(_) => Some(Module::Seo),
            _ => None,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_paths_map_one_to_one() {
        for module in Module::ALL {
            let route = AppRoute::Module(module);
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
            assert!(route.requires_auth());
        }
    }

    #[test]
    fn parses_public_and_detail_routes() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Landing);
        assert_eq!(AppRoute::from_path("/login/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/signup"), AppRoute::Signup);
        assert_eq!(AppRoute::from_path("/app"), AppRoute::Module(Module::Seo));
        assert_eq!(
            AppRoute::from_path("/app/seo/site/12"),
            AppRoute::SeoSite(RecordId::Int(12))
        );
        assert_eq!(AppRoute::SeoSite(RecordId::Int(12)).module(), Some(Module::Seo));
    }

    #[test]
    fn unknown_paths_fall_back_to_landing() {
        assert_eq!(AppRoute::from_path("/app/billing"), AppRoute::Landing);
        assert_eq!(AppRoute::from_path("/app/seo/site"), AppRoute::Landing);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::Landing);
        assert_eq!(AppRoute::from_path("/nope").to_path(), "/");
        assert!(!AppRoute::from_path("/nope").requires_auth());
    }

    #[test]
    fn auth_pages_bounce_signed_in_users() {
        assert!(AppRoute::Login.should_redirect_when_authenticated());
        assert!(AppRoute::Signup.should_redirect_when_authenticated());
        assert!(!AppRoute::Landing.should_redirect_when_authenticated());
        assert_eq!(AppRoute::auth_success_redirect().to_path(), "/app/seo");
        assert_eq!(AppRoute::auth_failure_redirect().to_path(), "/login");
    }
}
