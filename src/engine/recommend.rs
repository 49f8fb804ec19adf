//! Improvement recommendations over a configuration tree.
//!
//! Each heuristic runs independently and produces zero or one
//! recommendation. Everything here is pure and deterministic; color
//! parsing failures are absorbed into a neutral contrast value rather
//! than propagated, because the output is advisory.

use serde::Serialize;

use crate::model::LowerThirdConfig;

/// WCAG AA contrast threshold for normal text.
const MIN_CONTRAST: f64 = 4.5;
/// Font sizes below this are hard to read on a broadcast frame.
const MIN_FONT_PX: u32 = 16;
/// Combined entry animations beyond this feel sluggish on air.
const MAX_TOTAL_ENTRY_MS: u32 = 2000;
/// Fraction of canvas width considered the unsafe left edge.
const EDGE_FRACTION: f64 = 0.05;

/// What aspect of the configuration a recommendation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Accessibility,
    Usability,
    Performance,
    Layout,
    Content,
}

/// How urgently a recommendation should be acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A single prioritized improvement suggestion.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub suggested_action: String,
}

/// Generate improvement recommendations for a configuration.
#[must_use]
pub fn recommend(config: &LowerThirdConfig) -> Vec<Recommendation> {
    let mut out = Vec::new();

    let contrast = contrast_ratio(
        &config.main_text.background.color,
        &config.main_text.style.color,
    );
    if contrast < MIN_CONTRAST {
        out.push(Recommendation {
            kind: RecommendationKind::Accessibility,
            priority: Priority::High,
            title: "Low main-text contrast".to_string(),
            description: format!(
                "Contrast ratio between the main text and its background is {contrast:.2}, below the {MIN_CONTRAST} minimum for readable on-screen text."
            ),
            suggested_action: "Pick a darker background or a lighter text color".to_string(),
        });
    }

    if config.main_text.typography.size < MIN_FONT_PX {
        out.push(Recommendation {
            kind: RecommendationKind::Usability,
            priority: Priority::Medium,
            title: "Main text is very small".to_string(),
            description: format!(
                "Main text is {}px; below {MIN_FONT_PX}px it becomes illegible on most viewer devices.",
                config.main_text.typography.size
            ),
            suggested_action: format!("Increase the main text size to at least {MIN_FONT_PX}px"),
        });
    }

    let total_entry: u32 = config
        .text_slots()
        .iter()
        .map(|(_, slot)| slot.entry.duration_ms)
        .sum();
    if total_entry > MAX_TOTAL_ENTRY_MS {
        out.push(Recommendation {
            kind: RecommendationKind::Performance,
            priority: Priority::Low,
            title: "Entry animations are slow in aggregate".to_string(),
            description: format!(
                "The three text slots take {total_entry}ms to animate in, more than {MAX_TOTAL_ENTRY_MS}ms in total."
            ),
            suggested_action: "Shorten the entry animations or overlap them".to_string(),
        });
    }

    let edge = f64::from(config.layout.canvas.width) * EDGE_FRACTION;
    let near_edge: Vec<&str> = [
        ("main_text", &config.main_text),
        ("secondary_text", &config.secondary_text),
    ]
    .into_iter()
    .filter(|(_, slot)| f64::from(slot.position.x) < edge)
    .map(|(name, _)| name)
    .collect();
    if !near_edge.is_empty() {
        out.push(Recommendation {
            kind: RecommendationKind::Layout,
            priority: Priority::Medium,
            title: "Text too close to the left edge".to_string(),
            description: format!(
                "{} sit within 5% of the canvas width from the left edge and may be cut off on overscanned displays.",
                near_edge.join(", ")
            ),
            suggested_action: "Move the flagged slots inside the safe margin".to_string(),
        });
    }

    out
}

/// WCAG contrast ratio between two hex colors, in [1.0, 21.0].
///
/// Returns the neutral value 1.0 when either color fails to parse, so
/// callers never have to handle a parse error from an advisory path.
#[must_use]
pub fn contrast_ratio(background: &str, foreground: &str) -> f64 {
    match (relative_luminance(background), relative_luminance(foreground)) {
        (Some(a), Some(b)) => {
            let (lighter, darker) = if a >= b { (a, b) } else { (b, a) };
            (lighter + 0.05) / (darker + 0.05)
        }
        _ => 1.0,
    }
}

/// WCAG relative luminance of a hex color.
fn relative_luminance(color: &str) -> Option<f64> {
    let (r, g, b) = parse_hex(color)?;
    Some(0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b))
}

/// sRGB piecewise linearization of one channel.
fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Parse `#RGB` or `#RRGGBB` into channels. Fails soft with `None`.
fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let digits = color.strip_prefix('#')?;
    match digits.len() {
        3 => {
            let mut channels = digits.chars().map(|c| {
                c.to_digit(16)
                    .map(|d| u8::try_from(d * 16 + d).unwrap_or(0))
            });
            Some((channels.next()??, channels.next()??, channels.next()??))
        }
        6 => {
            let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
            let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
            let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}
