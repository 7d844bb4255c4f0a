//! Light/dark theme preference persisted in a cookie

use axum::http::{header, HeaderMap, HeaderValue};

pub const THEME_COOKIE: &str = "elle-ui-theme";

/// Client hint carrying the OS color-scheme preference
pub const COLOR_SCHEME_HINT: &str = "sec-ch-prefers-color-scheme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemePreference {
    Light,
    Dark,
    /// No explicit choice: follow the OS preference
    #[default]
    System,
}

impl ThemePreference {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "light" => Self::Light,
            "dark" => Self::Dark,
            _ => Self::System,
        }
    }

    /// Read the preference cookie
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == THEME_COOKIE)
            .map(|(_, value)| Self::parse(value))
            .unwrap_or_default()
    }

    /// Whether the page renders dark, given the OS preference
    pub fn is_dark(self, os_prefers_dark: bool) -> bool {
        match self {
            Self::Light => false,
            Self::Dark => true,
            Self::System => os_prefers_dark,
        }
    }

    /// Explicit choice after a toggle
    pub fn toggled(self, os_prefers_dark: bool) -> Self {
        if self.is_dark(os_prefers_dark) {
            Self::Light
        } else {
            Self::Dark
        }
    }

    /// Class on `<body>`; `system-theme` defers to the CSS media query
    pub fn body_class(self) -> &'static str {
        match self {
            Self::Light => "light-theme",
            Self::Dark => "dark-theme",
            Self::System => "system-theme",
        }
    }

    pub fn as_str(self) -> Option<&'static str> {
        match self {
            Self::Light => Some("light"),
            Self::Dark => Some("dark"),
            Self::System => None,
        }
    }

    /// `Set-Cookie` value persisting an explicit choice
    pub fn cookie(self) -> Option<HeaderValue> {
        self.as_str().and_then(|value| {
            HeaderValue::from_str(&format!(
                "{THEME_COOKIE}={value}; Path=/; Max-Age=31536000; SameSite=Lax"
            ))
            .ok()
        })
    }
}

/// OS color-scheme preference from the client hint, light when absent
pub fn os_prefers_dark(headers: &HeaderMap) -> bool {
    headers
        .get(COLOR_SCHEME_HINT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim().trim_matches('"') == "dark")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_cookie_parsing() {
        let h = headers(&[("cookie", "session=abc; elle-ui-theme=dark")]);
        assert_eq!(ThemePreference::from_headers(&h), ThemePreference::Dark);

        let h = headers(&[("cookie", "elle-ui-theme=light")]);
        assert_eq!(ThemePreference::from_headers(&h), ThemePreference::Light);

        let h = headers(&[("cookie", "elle-ui-theme=purple")]);
        assert_eq!(ThemePreference::from_headers(&h), ThemePreference::System);

        assert_eq!(ThemePreference::from_headers(&HeaderMap::new()), ThemePreference::System);
    }

    #[test]
    fn test_unset_follows_os() {
        assert!(ThemePreference::System.is_dark(true));
        assert!(!ThemePreference::System.is_dark(false));
        assert!(!ThemePreference::Light.is_dark(true));
        assert!(ThemePreference::Dark.is_dark(false));
    }

    #[test]
    fn test_toggle_persists_explicit_choice() {
        assert_eq!(ThemePreference::System.toggled(true), ThemePreference::Light);
        assert_eq!(ThemePreference::System.toggled(false), ThemePreference::Dark);
        assert_eq!(ThemePreference::Dark.toggled(false), ThemePreference::Light);
        assert_eq!(ThemePreference::Light.toggled(true), ThemePreference::Dark);

        let cookie = ThemePreference::Dark.cookie().unwrap();
        assert!(cookie.to_str().unwrap().starts_with("elle-ui-theme=dark;"));
        assert!(ThemePreference::System.cookie().is_none());
    }

    #[test]
    fn test_os_hint() {
        assert!(os_prefers_dark(&headers(&[("sec-ch-prefers-color-scheme", "\"dark\"")])));
        assert!(!os_prefers_dark(&headers(&[("sec-ch-prefers-color-scheme", "light")])));
        assert!(!os_prefers_dark(&HeaderMap::new()));
    }
}
