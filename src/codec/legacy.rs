//! Legacy "basic profile" schema migration.
//!
//! The original flat schema predates the nested configuration tree and is
//! still read and written by older consumers. Its field names are kept
//! verbatim (`NombrePerfil`, `colorFondo1`..`3`, `colorLetra1`..`3`,
//! `urlLogo`, `urlPublicidad`, `Invitado`, `Categoria`).
//!
//! Reading a profile tries the advanced record first and falls back to
//! this schema; writing always produces both records, advanced last.

use chrono::Utc;
use serde_json::{json, Value};

use super::wire::str_or;
use crate::model::{LogoMode, Profile, ProfileCategory};

/// Legacy wire keys, in record order.
const BACKGROUND_KEYS: [&str; 3] = ["colorFondo1", "colorFondo2", "colorFondo3"];
const TEXT_KEYS: [&str; 3] = ["colorLetra1", "colorLetra2", "colorLetra3"];

/// Returns true when the record looks like a parseable legacy profile.
///
/// The legacy schema has no version marker; the profile-name field is the
/// discriminator.
#[must_use]
pub fn is_basic_record(record: &Value) -> bool {
    record.get("NombrePerfil").is_some_and(Value::is_string)
}

/// Build a current-schema profile from a legacy flat record.
///
/// Fields the legacy schema does not carry keep their built-in defaults;
/// the creation timestamp is the migration time.
#[must_use]
pub fn migrate_basic(record: &Value) -> Profile {
    let mut profile = Profile::with_defaults(&str_or(record, "NombrePerfil", ""));
    profile.created_at = Utc::now();
    profile.category = ProfileCategory::from_wire(&str_or(record, "Categoria", ""));
    profile.guest.name = str_or(record, "Invitado", "");

    for (i, key) in BACKGROUND_KEYS.iter().enumerate() {
        if let Some(color) = record.get(*key).and_then(Value::as_str) {
            profile.palette.backgrounds[i] = color.to_string();
        }
    }
    for (i, key) in TEXT_KEYS.iter().enumerate() {
        if let Some(color) = record.get(*key).and_then(Value::as_str) {
            profile.palette.texts[i] = color.to_string();
        }
    }

    // The legacy colors also drive the slot styling in rank order.
    let slots = [
        &mut profile.config.main_text,
        &mut profile.config.secondary_text,
        &mut profile.config.theme,
    ];
    for (i, slot) in slots.into_iter().enumerate() {
        slot.background.color = profile.palette.backgrounds[i].clone();
        slot.style.color = profile.palette.texts[i].clone();
    }

    if let LogoMode::Simple(simple) = &mut profile.config.logo.mode {
        simple.url = str_or(record, "urlLogo", "");
    }
    profile.config.advertisement.url = str_or(record, "urlPublicidad", "");

    profile
}

/// Project a profile back onto the legacy flat schema for old consumers.
#[must_use]
pub fn to_basic_record(profile: &Profile) -> Value {
    let logo_url = match &profile.config.logo.mode {
        LogoMode::Simple(simple) => simple.url.clone(),
        LogoMode::Alliance(alliance) => alliance.url.clone(),
        LogoMode::Rotation(rotation) => rotation
            .items
            .first()
            .map(|item| item.url.clone())
            .unwrap_or_default(),
    };

    json!({
        "NombrePerfil": profile.name,
        "Categoria": profile.category.as_wire(),
        "colorFondo1": profile.palette.backgrounds[0],
        "colorFondo2": profile.palette.backgrounds[1],
        "colorFondo3": profile.palette.backgrounds[2],
        "colorLetra1": profile.palette.texts[0],
        "colorLetra2": profile.palette.texts[1],
        "colorLetra3": profile.palette.texts[2],
        "urlLogo": logo_url,
        "urlPublicidad": profile.config.advertisement.url,
        "Invitado": profile.guest.name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Palette, RotationItem, RotationLogo};

    #[test]
    fn test_migrate_scenario() {
        let record = json!({
            "NombrePerfil": "Noticias",
            "colorFondo1": "#1066FF",
            "urlLogo": "https://x/a.png",
            "Invitado": "Ana",
        });
        let profile = migrate_basic(&record);

        assert_eq!(profile.name, "Noticias");
        assert_eq!(profile.category, ProfileCategory::Noticias);
        assert_eq!(profile.guest.name, "Ana");
        assert_eq!(profile.palette.backgrounds[0], "#1066FF");
        // Unspecified palette entries keep their defaults
        assert_eq!(profile.palette.backgrounds[1], Palette::default().backgrounds[1]);

        let LogoMode::Simple(simple) = &profile.config.logo.mode else {
            panic!("expected simple mode");
        };
        assert_eq!(simple.url, "https://x/a.png");
        // mainText is unset by migration
        assert_eq!(profile.config.main_text.content, "");
    }

    #[test]
    fn test_migrate_category() {
        let record = json!({"NombrePerfil": "Goles", "Categoria": "deportes"});
        assert_eq!(migrate_basic(&record).category, ProfileCategory::Deportes);
    }

    #[test]
    fn test_basic_record_projection() {
        let mut profile = Profile::with_defaults("Noticias");
        profile.guest.name = "Ana".to_string();
        profile.palette.backgrounds[0] = "#1066FF".to_string();
        if let LogoMode::Simple(simple) = &mut profile.config.logo.mode {
            simple.url = "https://x/a.png".to_string();
        }

        let record = to_basic_record(&profile);
        assert_eq!(record["NombrePerfil"], "Noticias");
        assert_eq!(record["colorFondo1"], "#1066FF");
        assert_eq!(record["urlLogo"], "https://x/a.png");
        assert_eq!(record["Invitado"], "Ana");
    }

    #[test]
    fn test_basic_record_rotation_logo_url() {
        let mut profile = Profile::with_defaults("Rotando");
        profile.config.logo.mode = LogoMode::Rotation(RotationLogo {
            items: vec![RotationItem {
                url: "https://x/first.png".to_string(),
                name: "First".to_string(),
                duration_ms: 3000,
            }],
            ..RotationLogo::default()
        });
        assert_eq!(to_basic_record(&profile)["urlLogo"], "https://x/first.png");
    }

    #[test]
    fn test_legacy_subset_roundtrip() {
        let record = json!({
            "NombrePerfil": "Entrevista",
            "Categoria": "entrevista",
            "colorFondo1": "#101010",
            "colorLetra1": "#FAFAFA",
            "urlLogo": "https://x/logo.png",
            "urlPublicidad": "https://x/ad.png",
            "Invitado": "Luis",
        });
        let projected = to_basic_record(&migrate_basic(&record));
        for key in [
            "NombrePerfil",
            "Categoria",
            "colorFondo1",
            "colorLetra1",
            "urlLogo",
            "urlPublicidad",
            "Invitado",
        ] {
            assert_eq!(projected[key], record[key], "field {key}");
        }
    }

    #[test]
    fn test_is_basic_record() {
        assert!(is_basic_record(&json!({"NombrePerfil": "X"})));
        assert!(!is_basic_record(&json!({"name": "X"})));
        assert!(!is_basic_record(&json!({"NombrePerfil": 4})));
    }
}
