//! Structural validation of a configuration tree.
//!
//! All rules are evaluated independently; every violation is collected,
//! never short-circuited. Errors block a save at the caller's discretion;
//! warnings never affect validity.

use serde::Serialize;

use crate::model::{LogoMode, LowerThirdConfig};
use crate::primitives::{is_hex_color, Position};

/// Outcome of [`validate`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Validate a configuration tree.
///
/// `valid` is true iff the error list is empty.
#[must_use]
pub fn validate(config: &LowerThirdConfig) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    check_logo(config, &mut errors, &mut warnings);
    check_text_slots(config, &mut warnings);
    check_colors(config, &mut errors);
    check_bounds(config, &mut warnings);

    ValidationReport {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}

/// A URL that would plausibly resolve: scheme plus a non-empty remainder.
fn looks_like_url(url: &str) -> bool {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty())
}

fn check_url(url: &str, what: &str, errors: &mut Vec<String>, warnings: &mut Vec<String>) {
    if url.is_empty() {
        errors.push(format!("{what} URL is empty"));
    } else if !looks_like_url(url) {
        warnings.push(format!("{what} URL does not look well-formed: {url}"));
    }
}

fn check_logo(config: &LowerThirdConfig, errors: &mut Vec<String>, warnings: &mut Vec<String>) {
    if !config.logo.visible {
        return;
    }
    match &config.logo.mode {
        LogoMode::Simple(simple) => check_url(&simple.url, "logo image", errors, warnings),
        LogoMode::Alliance(alliance) => check_url(&alliance.url, "alliance logo", errors, warnings),
        LogoMode::Rotation(rotation) => {
            for (i, item) in rotation.items.iter().enumerate() {
                let what = if item.name.is_empty() {
                    format!("rotation item {}", i + 1)
                } else {
                    format!("rotation item '{}'", item.name)
                };
                check_url(&item.url, &what, errors, warnings);
            }
        }
    }
}

fn check_text_slots(config: &LowerThirdConfig, warnings: &mut Vec<String>) {
    for (name, slot) in config.text_slots() {
        // An operator may pre-stage a hidden slot; only visible-and-empty
        // is worth flagging, and only as a warning.
        if slot.visible && slot.content.is_empty() {
            warnings.push(format!("{name} is visible but has no content"));
        }
    }
}

fn check_colors(config: &LowerThirdConfig, errors: &mut Vec<String>) {
    let mut check = |color: &str, what: &str| {
        if !is_hex_color(color) {
            errors.push(format!("{what} color is not a valid hex color: {color}"));
        }
    };

    for (name, slot) in config.text_slots() {
        check(&slot.background.color, &format!("{name} background"));
        check(&slot.style.color, &format!("{name} text"));
        if let Some(shadow) = &slot.style.shadow {
            check(&shadow.color, &format!("{name} shadow"));
        }
    }
    if let LogoMode::Simple(simple) = &config.logo.mode {
        check(&simple.background.color, "logo background");
    }
}

// Bounds apply to hidden elements too: a parked element keeps its
// position, and an off-canvas one will be invisible once shown.
fn check_bounds(config: &LowerThirdConfig, warnings: &mut Vec<String>) {
    let canvas = config.layout.canvas;
    let mut check = |position: Position, what: &str| {
        let out = position.x < 0
            || position.y < 0
            || position.x > canvas.width as i32
            || position.y > canvas.height as i32;
        if out {
            warnings.push(format!(
                "{what} position ({}, {}) is outside the {}x{} canvas",
                position.x, position.y, canvas.width, canvas.height
            ));
        }
    };

    check(config.logo.mode.position(), "logo");
    for (name, slot) in config.text_slots() {
        check(slot.position, name);
    }
    check(config.advertisement.position, "advertisement");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{default_config, RotationItem, RotationLogo, SimpleLogo};
    use crate::primitives::Position;

    #[test]
    fn test_default_config_is_valid() {
        let report = validate(&default_config());
        assert!(report.valid, "errors: {:?}", report.errors);
        assert!(report.warnings.is_empty(), "warnings: {:?}", report.warnings);
    }

    #[test]
    fn test_visible_logo_with_empty_url_is_error() {
        let mut config = default_config();
        config.logo.visible = true;
        let report = validate(&config);
        assert!(!report.valid);
        assert!(report.errors.iter().any(|e| e.contains("logo") && e.contains("URL")));
    }

    #[test]
    fn test_hidden_logo_with_empty_url_is_fine() {
        let mut config = default_config();
        config.logo.visible = false;
        assert!(validate(&config).valid);
    }

    #[test]
    fn test_malformed_url_is_warning_not_error() {
        let mut config = default_config();
        config.logo.visible = true;
        config.logo.mode = LogoMode::Simple(SimpleLogo {
            url: "ftp://old-school/logo.png".to_string(),
            ..SimpleLogo::default()
        });
        let report = validate(&config);
        assert!(report.valid);
        assert!(report.warnings.iter().any(|w| w.contains("well-formed")));
    }

    #[test]
    fn test_rotation_items_named_per_error() {
        let mut config = default_config();
        config.logo.visible = true;
        config.logo.mode = LogoMode::Rotation(RotationLogo {
            items: vec![
                RotationItem {
                    url: String::new(),
                    name: "Canal A".to_string(),
                    duration_ms: 3000,
                },
                RotationItem {
                    url: "https://x/b.png".to_string(),
                    name: "Canal B".to_string(),
                    duration_ms: 3000,
                },
                RotationItem {
                    url: String::new(),
                    name: String::new(),
                    duration_ms: 3000,
                },
            ],
            ..RotationLogo::default()
        });
        let report = validate(&config);
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].contains("Canal A"));
        assert!(report.errors[1].contains("rotation item 3"));
    }

    #[test]
    fn test_visible_empty_slot_warns_hidden_does_not() {
        let mut config = default_config();
        config.main_text.visible = true;
        config.main_text.content = String::new();
        config.secondary_text.visible = false;
        config.secondary_text.content = String::new();

        let report = validate(&config);
        assert!(report.valid);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("main_text"));
    }

    #[test]
    fn test_all_hidden_empty_slots_quiet() {
        let config = default_config();
        let report = validate(&config);
        assert!(report.valid);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_bad_color_is_error() {
        let mut config = default_config();
        config.theme.style.color = "blue".to_string();
        let report = validate(&config);
        assert!(!report.valid);
        assert!(report.errors.iter().any(|e| e.contains("theme text")));
    }

    #[test]
    fn test_out_of_bounds_is_warning() {
        let mut config = default_config();
        config.main_text.visible = true;
        config.main_text.content = "Titular".to_string();
        config.main_text.position = Position::new(2500, 900);
        let report = validate(&config);
        assert!(report.valid);
        assert!(report.warnings.iter().any(|w| w.contains("outside")));
    }

    #[test]
    fn test_out_of_bounds_warns_even_when_hidden() {
        let mut config = default_config();
        config.main_text.visible = false;
        config.main_text.position = Position::new(5000, 5000);
        let report = validate(&config);
        assert!(report.valid);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("main_text") && w.contains("outside")));
    }

    #[test]
    fn test_errors_are_collected_not_short_circuited() {
        let mut config = default_config();
        config.logo.visible = true; // empty URL error
        config.main_text.style.color = "nope".to_string();
        config.theme.background.color = "#12345".to_string();
        let report = validate(&config);
        assert_eq!(report.errors.len(), 3);
    }
}
