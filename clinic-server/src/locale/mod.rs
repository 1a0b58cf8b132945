//! Bilingual field resolution
//!
//! Every content entity stores a Vietnamese base field plus an optional
//! English counterpart (`title` / `title_en`). There is no database-level
//! locale projection, so every public read path must map records through
//! [`resolve`] / [`resolve_opt`] before responding.

use serde::{Deserialize, Deserializer};

/// Requested content language
///
/// Parsed from the `?locale=` query parameter; anything that is not `en`
/// resolves to the default Vietnamese content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Vi,
    En,
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(if s.eq_ignore_ascii_case("en") {
            Locale::En
        } else {
            Locale::Vi
        })
    }
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Vi => "vi",
            Locale::En => "en",
        }
    }
}

/// Resolve a required bilingual field.
///
/// For `En`, the English value wins when present and non-empty; otherwise
/// the Vietnamese base is authoritative.
pub fn resolve(base: &str, en: Option<&str>, locale: Locale) -> String {
    match locale {
        Locale::En => match en {
            Some(v) if !v.trim().is_empty() => v.to_string(),
            _ => base.to_string(),
        },
        Locale::Vi => base.to_string(),
    }
}

/// Resolve an optional bilingual field.
///
/// Sibling of [`resolve`] for call sites where neither side may be
/// populated; returns `None` instead of an empty string.
pub fn resolve_opt(base: Option<&str>, en: Option<&str>, locale: Locale) -> Option<String> {
    let picked = match locale {
        Locale::En => match en {
            Some(v) if !v.trim().is_empty() => Some(v),
            _ => base,
        },
        Locale::Vi => base,
    };
    picked
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.to_string())
}

/// Resolve a bilingual reference pair (e.g. feature images).
pub fn resolve_ref<'a, T>(base: Option<&'a T>, en: Option<&'a T>, locale: Locale) -> Option<&'a T> {
    match locale {
        Locale::En => en.or(base),
        Locale::Vi => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn en_prefers_english_when_present() {
        assert_eq!(
            resolve("Dịch vụ", Some("Services"), Locale::En),
            "Services"
        );
    }

    #[test]
    fn en_falls_back_to_base_when_missing_or_empty() {
        assert_eq!(resolve("Dịch vụ", None, Locale::En), "Dịch vụ");
        assert_eq!(resolve("Dịch vụ", Some(""), Locale::En), "Dịch vụ");
        assert_eq!(resolve("Dịch vụ", Some("   "), Locale::En), "Dịch vụ");
    }

    #[test]
    fn vi_always_returns_base() {
        assert_eq!(
            resolve("Dịch vụ", Some("Services"), Locale::Vi),
            "Dịch vụ"
        );
    }

    #[test]
    fn opt_returns_none_when_both_sides_empty() {
        assert_eq!(resolve_opt(None, None, Locale::En), None);
        assert_eq!(resolve_opt(Some(""), None, Locale::En), None);
        assert_eq!(resolve_opt(None, Some("x"), Locale::Vi), None);
    }

    #[test]
    fn opt_en_fallback_chain() {
        assert_eq!(
            resolve_opt(Some("Mô tả"), None, Locale::En),
            Some("Mô tả".to_string())
        );
        assert_eq!(
            resolve_opt(Some("Mô tả"), Some("Description"), Locale::En),
            Some("Description".to_string())
        );
    }

    #[test]
    fn unknown_locales_fall_back_to_vi() {
        assert_eq!(serde_json::from_str::<Locale>("\"en\"").unwrap(), Locale::En);
        assert_eq!(serde_json::from_str::<Locale>("\"EN\"").unwrap(), Locale::En);
        assert_eq!(serde_json::from_str::<Locale>("\"vi\"").unwrap(), Locale::Vi);
        assert_eq!(serde_json::from_str::<Locale>("\"fr\"").unwrap(), Locale::Vi);
    }

    #[test]
    fn ref_resolution() {
        let a = 1;
        let b = 2;
        assert_eq!(resolve_ref(Some(&a), Some(&b), Locale::En), Some(&b));
        assert_eq!(resolve_ref(Some(&a), None, Locale::En), Some(&a));
        assert_eq!(resolve_ref(Some(&a), Some(&b), Locale::Vi), Some(&a));
    }
}
