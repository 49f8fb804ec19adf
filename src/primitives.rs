//! Geometry and style value objects shared across the configuration tree.
//!
//! Everything here is a plain value type: cloneable, comparable, and
//! serde-serializable. Positions are authored against the virtual canvas
//! with a top-left origin.

use serde::{Deserialize, Serialize};

/// A point on the virtual canvas (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true when both axes are positive.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Per-side padding in pixels.
///
/// Each side is independent; the wire record carries all four fields
/// rather than collapsing them to a single symmetric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Padding {
    #[must_use]
    pub const fn uniform(value: u32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// Font weight, restricted to the weights the renderer ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Light,
    #[default]
    Regular,
    Medium,
    SemiBold,
    Bold,
}

impl FontWeight {
    /// Parse a wire-record string, falling back to `Regular`.
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value {
            "light" => Self::Light,
            "medium" => Self::Medium,
            "semi_bold" => Self::SemiBold,
            "bold" => Self::Bold,
            _ => Self::Regular,
        }
    }

    /// The canonical wire-record string.
    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Regular => "regular",
            Self::Medium => "medium",
            Self::SemiBold => "semi_bold",
            Self::Bold => "bold",
        }
    }
}

/// Font style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl FontStyle {
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value {
            "italic" => Self::Italic,
            _ => Self::Normal,
        }
    }

    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Italic => "italic",
        }
    }
}

/// Text case transform applied at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

impl TextTransform {
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value {
            "uppercase" => Self::Uppercase,
            "lowercase" => Self::Lowercase,
            "capitalize" => Self::Capitalize,
            _ => Self::None,
        }
    }

    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Uppercase => "uppercase",
            Self::Lowercase => "lowercase",
            Self::Capitalize => "capitalize",
        }
    }
}

/// Typography settings for a text slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Typography {
    /// Font family name.
    pub family: String,
    /// Font size in pixels (pre-scaling).
    pub size: u32,
    pub weight: FontWeight,
    pub style: FontStyle,
    pub transform: TextTransform,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            family: "Inter".to_string(),
            size: 24,
            weight: FontWeight::Regular,
            style: FontStyle::Normal,
            transform: TextTransform::None,
        }
    }
}

/// Background plate behind a text slot or logo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundStyle {
    /// Hex color, e.g. "#102030".
    pub color: String,
    /// Opacity in [0, 1]. May transiently hold out-of-range values
    /// until the optimization pass clamps it.
    pub opacity: f64,
    pub padding: Padding,
    /// Corner radius in pixels.
    pub corner_radius: u32,
}

impl Default for BackgroundStyle {
    fn default() -> Self {
        Self {
            color: "#101826".to_string(),
            opacity: 0.85,
            padding: Padding::uniform(8),
            corner_radius: 4,
        }
    }
}

/// Optional drop shadow on rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shadow {
    pub color: String,
    pub blur: u32,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: "#000000".to_string(),
            blur: 4,
            offset_x: 0,
            offset_y: 2,
        }
    }
}

/// Foreground styling for rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Hex color of the text itself.
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: "#FFFFFF".to_string(),
            shadow: None,
        }
    }
}

/// Entry/exit animation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationKind {
    #[default]
    Fade,
    SlideLeft,
    SlideRight,
    SlideUp,
    SlideDown,
    Scale,
}

impl AnimationKind {
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value {
            "slide_left" => Self::SlideLeft,
            "slide_right" => Self::SlideRight,
            "slide_up" => Self::SlideUp,
            "slide_down" => Self::SlideDown,
            "scale" => Self::Scale,
            _ => Self::Fade,
        }
    }

    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Fade => "fade",
            Self::SlideLeft => "slide_left",
            Self::SlideRight => "slide_right",
            Self::SlideUp => "slide_up",
            Self::SlideDown => "slide_down",
            Self::Scale => "scale",
        }
    }
}

/// Easing curve for animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    Ease,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
}

impl Easing {
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value {
            "linear" => Self::Linear,
            "ease" => Self::Ease,
            "ease_in" => Self::EaseIn,
            "ease_in_out" => Self::EaseInOut,
            _ => Self::EaseOut,
        }
    }

    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Ease => "ease",
            Self::EaseIn => "ease_in",
            Self::EaseOut => "ease_out",
            Self::EaseInOut => "ease_in_out",
        }
    }
}

/// An entry or exit animation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animation {
    pub kind: AnimationKind,
    /// Duration in milliseconds. Clamped to [100, 2000] by optimization.
    pub duration_ms: u32,
    /// Delay in milliseconds. Clamped to [0, 1000] by optimization.
    pub delay_ms: u32,
    pub easing: Easing,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            kind: AnimationKind::Fade,
            duration_ms: 400,
            delay_ms: 0,
            easing: Easing::EaseOut,
        }
    }
}

/// Advertisement banner width: a fixed pixel value or the "auto" sentinel,
/// which lets the renderer size the banner from its image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdWidth {
    #[default]
    Auto,
    Px(u32),
}

/// Shape mask applied to a simple-mode logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoShape {
    #[default]
    Circular,
    Square,
    Rounded,
}

impl LogoShape {
    /// Parse a wire-record string; unknown shapes fall back to circular.
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value {
            "square" => Self::Square,
            "rounded" => Self::Rounded,
            _ => Self::Circular,
        }
    }

    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Circular => "circular",
            Self::Square => "square",
            Self::Rounded => "rounded",
        }
    }
}

/// Check whether a string is a valid 3- or 6-digit hex color (`#RGB` or
/// `#RRGGBB`).
///
/// This is a validation-time predicate: invalid colors are representable
/// in the model and merely flagged.
#[must_use]
pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    (digits.len() == 3 || digits.len() == 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_valid() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("#FFFFFF"));
        assert!(is_hex_color("#1a2B3c"));
    }

    #[test]
    fn test_hex_color_invalid() {
        assert!(!is_hex_color("fff"));
        assert!(!is_hex_color("#ffff"));
        assert!(!is_hex_color("#ggg"));
        assert!(!is_hex_color("#12345"));
        assert!(!is_hex_color(""));
    }

    #[test]
    fn test_font_weight_wire_fallback() {
        assert_eq!(FontWeight::from_wire("bold"), FontWeight::Bold);
        assert_eq!(FontWeight::from_wire("chonky"), FontWeight::Regular);
    }

    #[test]
    fn test_logo_shape_wire_fallback() {
        assert_eq!(LogoShape::from_wire("square"), LogoShape::Square);
        assert_eq!(LogoShape::from_wire("hexagon"), LogoShape::Circular);
    }

    #[test]
    fn test_animation_wire_roundtrip() {
        for kind in [
            AnimationKind::Fade,
            AnimationKind::SlideLeft,
            AnimationKind::SlideRight,
            AnimationKind::SlideUp,
            AnimationKind::SlideDown,
            AnimationKind::Scale,
        ] {
            assert_eq!(AnimationKind::from_wire(kind.as_wire()), kind);
        }
        for easing in [
            Easing::Linear,
            Easing::Ease,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
        ] {
            assert_eq!(Easing::from_wire(easing.as_wire()), easing);
        }
    }

    #[test]
    fn test_dimensions_positive() {
        assert!(Dimensions::new(1920, 1080).is_positive());
        assert!(!Dimensions::new(0, 1080).is_positive());
    }

    #[test]
    fn test_uniform_padding() {
        let p = Padding::uniform(6);
        assert_eq!(p.top, 6);
        assert_eq!(p.right, 6);
        assert_eq!(p.bottom, 6);
        assert_eq!(p.left, 6);
    }
}
