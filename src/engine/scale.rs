//! Responsive rescaling of a configuration tree to a new canvas.
//!
//! Positions scale by their axis factor; sizes, font sizes, paddings,
//! and radii scale by the averaged factor. The advertisement width keeps
//! its "auto" sentinel untouched. Every positioned or sized field in the
//! tree must be covered here; skipping one is a defect.

use crate::model::{LogoMode, LowerThirdConfig, TextSlot};
use crate::primitives::{AdWidth, Dimensions, Padding, Position, Shadow};

#[derive(Clone, Copy)]
struct Factors {
    x: f64,
    y: f64,
    avg: f64,
}

/// Rescale a configuration to a new canvas resolution.
///
/// `rescale(config, w, h)` with `w`/`h` equal to the current canvas is
/// the identity; doubling both doubles every position and size field
/// within rounding tolerance.
#[must_use]
pub fn rescale(config: &LowerThirdConfig, target_width: u32, target_height: u32) -> LowerThirdConfig {
    let base = config.layout.canvas;
    let factors = Factors {
        x: f64::from(target_width) / f64::from(base.width),
        y: f64::from(target_height) / f64::from(base.height),
        avg: (f64::from(target_width) / f64::from(base.width)
            + f64::from(target_height) / f64::from(base.height))
            / 2.0,
    };

    let mut out = config.clone();
    out.layout.canvas = Dimensions::new(target_width, target_height);

    match &mut out.logo.mode {
        LogoMode::Simple(simple) => {
            simple.position = scale_position(simple.position, factors);
            simple.size = scale_dimensions(simple.size, factors);
            simple.background.padding = scale_padding(simple.background.padding, factors);
            simple.background.corner_radius = scale_len(simple.background.corner_radius, factors);
        }
        LogoMode::Alliance(alliance) => {
            alliance.position = scale_position(alliance.position, factors);
            alliance.size = scale_dimensions(alliance.size, factors);
        }
        LogoMode::Rotation(rotation) => {
            rotation.position = scale_position(rotation.position, factors);
            rotation.size = scale_dimensions(rotation.size, factors);
        }
    }

    for slot in [&mut out.main_text, &mut out.secondary_text, &mut out.theme] {
        scale_text_slot(slot, factors);
    }

    out.advertisement.position = scale_position(out.advertisement.position, factors);
    out.advertisement.height = scale_len(out.advertisement.height, factors);
    // A fixed width is a size like any other; the auto sentinel stays.
    if let AdWidth::Px(px) = out.advertisement.width {
        out.advertisement.width = AdWidth::Px(scale_len(px, factors));
    }

    out
}

fn scale_text_slot(slot: &mut TextSlot, factors: Factors) {
    slot.position = scale_position(slot.position, factors);
    slot.typography.size = scale_len(slot.typography.size, factors);
    slot.background.padding = scale_padding(slot.background.padding, factors);
    slot.background.corner_radius = scale_len(slot.background.corner_radius, factors);
    if let Some(shadow) = &mut slot.style.shadow {
        scale_shadow(shadow, factors);
    }
}

fn scale_shadow(shadow: &mut Shadow, factors: Factors) {
    shadow.blur = scale_len(shadow.blur, factors);
    shadow.offset_x = round_i32(f64::from(shadow.offset_x) * factors.x);
    shadow.offset_y = round_i32(f64::from(shadow.offset_y) * factors.y);
}

fn scale_position(position: Position, factors: Factors) -> Position {
    Position {
        x: round_i32(f64::from(position.x) * factors.x),
        y: round_i32(f64::from(position.y) * factors.y),
    }
}

fn scale_dimensions(dimensions: Dimensions, factors: Factors) -> Dimensions {
    Dimensions {
        width: scale_len(dimensions.width, factors),
        height: scale_len(dimensions.height, factors),
    }
}

fn scale_padding(padding: Padding, factors: Factors) -> Padding {
    Padding {
        top: scale_len(padding.top, factors),
        right: scale_len(padding.right, factors),
        bottom: scale_len(padding.bottom, factors),
        left: scale_len(padding.left, factors),
    }
}

fn scale_len(value: u32, factors: Factors) -> u32 {
    let scaled = (f64::from(value) * factors.avg).round();
    if scaled <= 0.0 { 0 } else { scaled as u32 }
}

fn round_i32(value: f64) -> i32 {
    let rounded = value.round();
    if rounded >= f64::from(i32::MAX) {
        i32::MAX
    } else if rounded <= f64::from(i32::MIN) {
        i32::MIN
    } else {
        rounded as i32
    }
}
