//! The page map of the portal.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Every navigable page of the portal, in site-map order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Page {
    Home,
    About,
    Events,
    Team,
    Gallery,
    Articles,
    Training,
    Minutes,
    Branding,
    Contact,
    Faq,
    Privacy,
    Terms,
    Sitemap,
    /// Admin panel; visitors are never sent here.
    Admin,
}

impl Page {
    /// Check if visitors are barred from this page.
    pub fn is_restricted(self) -> bool {
        matches!(self, Page::Admin)
    }

    /// Find the first page whose name contains `fragment` (case-insensitive).
    pub fn find(fragment: &str) -> Option<Page> {
        let fragment = fragment.to_lowercase();
        if fragment.is_empty() {
            return None;
        }
        Page::iter().find(|page| page.as_ref().contains(fragment.as_str()))
    }
}

/// Light or dark colour scheme of the portal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_only_admin_is_restricted() {
        let restricted: Vec<_> = Page::iter().filter(|p| p.is_restricted()).collect();
        assert_eq!(restricted, vec![Page::Admin]);
    }

    #[test]
    fn test_find_by_fragment() {
        assert_eq!(Page::find("events"), Some(Page::Events));
        assert_eq!(Page::find("GALL"), Some(Page::Gallery));
        assert_eq!(Page::find("adm"), Some(Page::Admin));
        assert_eq!(Page::find("nowhere"), None);
        assert_eq!(Page::find(""), None);
    }

    #[test]
    fn test_find_returns_first_in_site_order() {
        // "e" appears in "home" before any later page.
        assert_eq!(Page::find("e"), Some(Page::Home));
    }

    #[test]
    fn test_page_names() {
        assert_eq!(Page::Faq.to_string(), "faq");
        assert_eq!(Page::from_str("Team").unwrap(), Page::Team);
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }
}
