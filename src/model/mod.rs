//! The nested lower-third configuration tree.
//!
//! `LowerThirdConfig` is the root aggregate. It is fully value-typed:
//! edits produce a new tree, never in-place mutation of a shared instance.
//! The raw model may transiently hold out-of-range values; [`optimized`]
//! (`LowerThirdConfig::optimized`) produces a clamped copy.

mod logo;
mod profile;

pub use logo::{AllianceLogo, LogoConfig, LogoMode, RotationItem, RotationLogo, SimpleLogo};
pub use profile::{DynamicContent, GuestInfo, Palette, Profile, ProfileCategory, SCHEMA_VERSION};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::primitives::{
    AdWidth, Animation, BackgroundStyle, Dimensions, Position, TextStyle, Typography,
};

/// Minimum animation duration after optimization, in milliseconds.
pub const MIN_ANIMATION_MS: u32 = 100;
/// Maximum animation duration after optimization, in milliseconds.
pub const MAX_ANIMATION_MS: u32 = 2000;
/// Maximum animation delay after optimization, in milliseconds.
pub const MAX_DELAY_MS: u32 = 1000;
/// Minimum inter-element stagger after optimization, in milliseconds.
pub const MIN_STAGGER_MS: u32 = 50;

/// Canvas and preset-level layout settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Identifier of the active layout preset.
    pub preset: String,
    /// Keep elements inside broadcast-safe margins.
    pub safe_margins: bool,
    /// Virtual canvas dimensions all positions are authored against.
    pub canvas: Dimensions,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            preset: "classic".to_string(),
            safe_margins: true,
            canvas: Dimensions::new(1920, 1080),
        }
    }
}

/// One of the three structurally identical text slots
/// (main text, secondary text, theme).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextSlot {
    pub content: String,
    pub visible: bool,
    pub position: Position,
    pub typography: Typography,
    pub background: BackgroundStyle,
    pub style: TextStyle,
    pub entry: Animation,
    pub exit: Animation,
}

/// Advertisement banner element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvertisementConfig {
    pub visible: bool,
    pub url: String,
    pub position: Position,
    /// Fixed pixel width or the auto sentinel.
    pub width: AdWidth,
    /// Fixed pixel height.
    pub height: u32,
    pub animation: Animation,
}

impl Default for AdvertisementConfig {
    fn default() -> Self {
        Self {
            visible: false,
            url: String::new(),
            position: Position::new(1460, 940),
            width: AdWidth::Auto,
            height: 90,
            animation: Animation::default(),
        }
    }
}

/// Element sequencing within the display window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequencing {
    /// Animate the logo before the text slots.
    pub logo_first: bool,
    /// Delay between successive elements, in milliseconds.
    /// Clamped to a minimum of [`MIN_STAGGER_MS`] by optimization.
    pub stagger_ms: u32,
}

impl Default for Sequencing {
    fn default() -> Self {
        Self {
            logo_first: true,
            stagger_ms: 150,
        }
    }
}

/// Display-window timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Total on-screen duration, in milliseconds.
    pub display_ms: u32,
    /// Hide the overlay automatically after `display_ms`.
    pub auto_hide: bool,
    pub sequencing: Sequencing,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            display_ms: 8000,
            auto_hide: true,
            sequencing: Sequencing::default(),
        }
    }
}

/// Preset bookkeeping: the active preset plus human descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetsConfig {
    /// Name of the currently active preset.
    pub active: String,
    /// Preset id to human description.
    pub descriptions: BTreeMap<String, String>,
}

impl Default for PresetsConfig {
    fn default() -> Self {
        let mut descriptions = BTreeMap::new();
        descriptions.insert(
            "classic".to_string(),
            "Logo left, two text lines bottom-left".to_string(),
        );
        Self {
            active: "classic".to_string(),
            descriptions,
        }
    }
}

/// The root configuration aggregate for a lower-third overlay.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LowerThirdConfig {
    pub layout: LayoutConfig,
    pub logo: LogoConfig,
    pub main_text: TextSlot,
    pub secondary_text: TextSlot,
    pub theme: TextSlot,
    pub advertisement: AdvertisementConfig,
    pub timing: TimingConfig,
    pub presets: PresetsConfig,
}

impl LowerThirdConfig {
    /// The three text slots with their display names, in render order.
    #[must_use]
    pub fn text_slots(&self) -> [(&'static str, &TextSlot); 3] {
        [
            ("main_text", &self.main_text),
            ("secondary_text", &self.secondary_text),
            ("theme", &self.theme),
        ]
    }

    /// A clamped copy of this configuration.
    ///
    /// Opacity is clamped to [0, 1], animation durations to
    /// [[`MIN_ANIMATION_MS`], [`MAX_ANIMATION_MS`]], delays to
    /// [0, [`MAX_DELAY_MS`]], and the stagger interval to at least
    /// [`MIN_STAGGER_MS`]. Everything else is untouched.
    #[must_use]
    pub fn optimized(&self) -> Self {
        let mut out = self.clone();

        for slot in [&mut out.main_text, &mut out.secondary_text, &mut out.theme] {
            clamp_background(&mut slot.background);
            clamp_animation(&mut slot.entry);
            clamp_animation(&mut slot.exit);
        }

        match &mut out.logo.mode {
            LogoMode::Simple(simple) => {
                clamp_background(&mut simple.background);
                clamp_animation(&mut simple.animation);
            }
            LogoMode::Alliance(_) | LogoMode::Rotation(_) => {}
        }

        clamp_animation(&mut out.advertisement.animation);
        out.timing.sequencing.stagger_ms = out.timing.sequencing.stagger_ms.max(MIN_STAGGER_MS);

        out
    }
}

fn clamp_background(background: &mut BackgroundStyle) {
    background.opacity = background.opacity.clamp(0.0, 1.0);
}

fn clamp_animation(animation: &mut Animation) {
    animation.duration_ms = animation.duration_ms.clamp(MIN_ANIMATION_MS, MAX_ANIMATION_MS);
    animation.delay_ms = animation.delay_ms.min(MAX_DELAY_MS);
}

/// The built-in default preset.
///
/// This is a pure constructor: callers receive a fresh tree each time,
/// never a shared instance.
#[must_use]
pub fn default_config() -> LowerThirdConfig {
    let mut config = LowerThirdConfig::default();

    config.main_text.visible = false;
    config.main_text.position = Position::new(220, 900);
    config.main_text.typography.size = 42;
    config.main_text.typography.weight = crate::primitives::FontWeight::Bold;

    config.secondary_text.visible = false;
    config.secondary_text.position = Position::new(220, 960);
    config.secondary_text.typography.size = 28;

    config.theme.visible = false;
    config.theme.position = Position::new(220, 840);
    config.theme.typography.size = 22;
    config.theme.typography.transform = crate::primitives::TextTransform::Uppercase;

    config.logo.mode = LogoMode::Simple(SimpleLogo {
        position: Position::new(64, 880),
        ..SimpleLogo::default()
    });

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_fresh() {
        let a = default_config();
        let b = default_config();
        assert_eq!(a, b);
        assert_eq!(a.layout.canvas, Dimensions::new(1920, 1080));
    }

    #[test]
    fn test_optimized_clamps_opacity() {
        let mut config = default_config();
        config.main_text.background.opacity = 1.7;
        config.theme.background.opacity = -0.3;

        let optimized = config.optimized();
        assert!((optimized.main_text.background.opacity - 1.0).abs() < f64::EPSILON);
        assert!(optimized.theme.background.opacity.abs() < f64::EPSILON);
        // Raw model keeps the out-of-range value
        assert!((config.main_text.background.opacity - 1.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_optimized_clamps_animation() {
        let mut config = default_config();
        config.main_text.entry.duration_ms = 10;
        config.secondary_text.entry.duration_ms = 9000;
        config.secondary_text.entry.delay_ms = 5000;

        let optimized = config.optimized();
        assert_eq!(optimized.main_text.entry.duration_ms, MIN_ANIMATION_MS);
        assert_eq!(optimized.secondary_text.entry.duration_ms, MAX_ANIMATION_MS);
        assert_eq!(optimized.secondary_text.entry.delay_ms, MAX_DELAY_MS);
    }

    #[test]
    fn test_optimized_clamps_stagger() {
        let mut config = default_config();
        config.timing.sequencing.stagger_ms = 5;
        assert_eq!(config.optimized().timing.sequencing.stagger_ms, MIN_STAGGER_MS);
    }

    #[test]
    fn test_optimized_clamps_logo_animation() {
        let mut config = default_config();
        if let LogoMode::Simple(simple) = &mut config.logo.mode {
            simple.animation.duration_ms = 1;
            simple.background.opacity = 3.0;
        }
        let optimized = config.optimized();
        if let LogoMode::Simple(simple) = &optimized.logo.mode {
            assert_eq!(simple.animation.duration_ms, MIN_ANIMATION_MS);
            assert!((simple.background.opacity - 1.0).abs() < f64::EPSILON);
        } else {
            panic!("expected simple mode");
        }
    }

    #[test]
    fn test_text_slots_order() {
        let config = default_config();
        let names: Vec<&str> = config.text_slots().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["main_text", "secondary_text", "theme"]);
    }
}
