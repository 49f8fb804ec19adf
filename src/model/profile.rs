//! Profile aggregate: a named, persisted bundle of lower-third
//! configuration plus presentation metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{default_config, LowerThirdConfig};

/// Current advanced-schema version.
pub const SCHEMA_VERSION: u32 = 2;

/// Editorial category a profile belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileCategory {
    #[default]
    Noticias,
    Deportes,
    Entrevista,
    Musica,
    Eventos,
}

impl ProfileCategory {
    /// Parse a wire-record string, falling back to the default category.
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "deportes" => Self::Deportes,
            "entrevista" => Self::Entrevista,
            "musica" => Self::Musica,
            "eventos" => Self::Eventos,
            _ => Self::Noticias,
        }
    }

    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Noticias => "noticias",
            Self::Deportes => "deportes",
            Self::Entrevista => "entrevista",
            Self::Musica => "musica",
            Self::Eventos => "eventos",
        }
    }
}

/// The three-plus-three color palette carried for legacy consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Background colors, most to least prominent.
    pub backgrounds: [String; 3],
    /// Text colors, most to least prominent.
    pub texts: [String; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            backgrounds: [
                "#101826".to_string(),
                "#1B2A41".to_string(),
                "#253C5C".to_string(),
            ],
            texts: [
                "#FFFFFF".to_string(),
                "#D9E2EC".to_string(),
                "#9FB3C8".to_string(),
            ],
        }
    }
}

/// On-air guest metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GuestInfo {
    pub name: String,
    pub role: String,
}

/// Dynamic ticker content shown alongside the lower third.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DynamicContent {
    pub enabled: bool,
    pub items: Vec<String>,
}

/// A named, persisted profile. The name is the unique key in the
/// remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub category: ProfileCategory,
    pub created_at: DateTime<Utc>,
    pub schema_version: u32,
    pub palette: Palette,
    pub guest: GuestInfo,
    pub dynamic_content: DynamicContent,
    pub config: LowerThirdConfig,
}

impl Profile {
    /// A fresh profile carrying the built-in default configuration.
    #[must_use]
    pub fn with_defaults(name: &str) -> Self {
        Self {
            name: name.to_string(),
            category: ProfileCategory::default(),
            created_at: Utc::now(),
            schema_version: SCHEMA_VERSION,
            palette: Palette::default(),
            guest: GuestInfo::default(),
            dynamic_content: DynamicContent::default(),
            config: default_config(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_defaults() {
        let profile = Profile::with_defaults("Noticias 9PM");
        assert_eq!(profile.name, "Noticias 9PM");
        assert_eq!(profile.category, ProfileCategory::Noticias);
        assert_eq!(profile.schema_version, SCHEMA_VERSION);
        assert_eq!(profile.config, default_config());
    }

    #[test]
    fn test_category_wire_fallback() {
        assert_eq!(ProfileCategory::from_wire("DEPORTES"), ProfileCategory::Deportes);
        assert_eq!(ProfileCategory::from_wire("weather"), ProfileCategory::Noticias);
    }
}
