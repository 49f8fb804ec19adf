//! Logo element configuration.
//!
//! The three display modes are a tagged union: only the active variant's
//! payload is carried, so there is no ambiguity about which sub-config
//! applies.

use serde::{Deserialize, Serialize};

use crate::primitives::{Animation, BackgroundStyle, Dimensions, LogoShape, Position};

/// A single station/channel logo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleLogo {
    /// Image URL. Required when the logo is visible.
    pub url: String,
    pub position: Position,
    pub size: Dimensions,
    pub shape: LogoShape,
    pub background: BackgroundStyle,
    pub animation: Animation,
}

impl Default for SimpleLogo {
    fn default() -> Self {
        Self {
            url: String::new(),
            position: Position::new(64, 48),
            size: Dimensions::new(120, 120),
            shape: LogoShape::Circular,
            background: BackgroundStyle {
                opacity: 0.0,
                ..BackgroundStyle::default()
            },
            animation: Animation::default(),
        }
    }
}

/// A co-branded "alliance" logo with descriptive text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllianceLogo {
    pub url: String,
    /// Short description shown alongside the image.
    pub description: String,
    pub position: Position,
    pub size: Dimensions,
}

impl Default for AllianceLogo {
    fn default() -> Self {
        Self {
            url: String::new(),
            description: String::new(),
            position: Position::new(64, 48),
            size: Dimensions::new(200, 80),
        }
    }
}

/// One entry in a rotating logo carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationItem {
    pub url: String,
    pub name: String,
    /// How long this item stays on screen, in milliseconds.
    pub duration_ms: u32,
}

/// A carousel of logos cycled on a timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationLogo {
    /// Ordered list of carousel entries.
    pub items: Vec<RotationItem>,
    /// Restart from the first item after the last.
    pub looped: bool,
    /// Pause the carousel while the pointer hovers it.
    pub pause_on_hover: bool,
    pub position: Position,
    pub size: Dimensions,
}

impl Default for RotationLogo {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            looped: true,
            pause_on_hover: false,
            position: Position::new(64, 48),
            size: Dimensions::new(120, 120),
        }
    }
}

/// Active logo display mode with its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LogoMode {
    Simple(SimpleLogo),
    Alliance(AllianceLogo),
    Rotation(RotationLogo),
}

impl Default for LogoMode {
    fn default() -> Self {
        Self::Simple(SimpleLogo::default())
    }
}

impl LogoMode {
    /// The wire-record tag for this mode.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Simple(_) => "simple",
            Self::Alliance(_) => "alliance",
            Self::Rotation(_) => "rotation",
        }
    }

    /// Anchor position of the active payload.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Simple(s) => s.position,
            Self::Alliance(a) => a.position,
            Self::Rotation(r) => r.position,
        }
    }
}

/// Logo element: visibility plus the active mode.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LogoConfig {
    pub visible: bool,
    #[serde(flatten)]
    pub mode: LogoMode,
}
