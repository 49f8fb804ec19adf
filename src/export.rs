//! Downstream export projections.
//!
//! Pure functions of the live configuration, produced on request and
//! never persisted or parsed back: an OBS-style JSON document, a
//! stylesheet for browser-source renderers, and the companion-app web
//! payload.

use chrono::Utc;
use serde_json::{json, Value};

use crate::model::{LogoMode, LowerThirdConfig, Profile, TextSlot, SCHEMA_VERSION};
use crate::primitives::{AdWidth, Dimensions, Position};

/// OBS-style JSON export.
///
/// The envelope key and element layout follow what the compositor side
/// consumes; positions stay in canvas coordinates (top-left origin).
#[must_use]
pub fn obs_export(config: &LowerThirdConfig) -> Value {
    let (logo_source, logo_size) = logo_source_and_size(&config.logo.mode);

    json!({
        "obs_lower_third_config": {
            "version": SCHEMA_VERSION,
            "timestamp": Utc::now().to_rfc3339(),
            "canvas": {
                "width": config.layout.canvas.width,
                "height": config.layout.canvas.height,
            },
            "elements": {
                "logo": {
                    "enabled": config.logo.visible,
                    "source": logo_source,
                    "x": config.logo.mode.position().x,
                    "y": config.logo.mode.position().y,
                    "width": logo_size.width,
                    "height": logo_size.height,
                },
                "main_text": obs_text_element(&config.main_text),
                "secondary_text": obs_text_element(&config.secondary_text),
            },
        }
    })
}

fn obs_text_element(slot: &TextSlot) -> Value {
    json!({
        "enabled": slot.visible,
        "content": slot.content,
        "x": slot.position.x,
        "y": slot.position.y,
        "font_family": slot.typography.family,
        "font_size": slot.typography.size,
        "font_weight": slot.typography.weight.as_wire(),
        "color": slot.style.color,
        "background_color": slot.background.color,
        "background_opacity": slot.background.opacity,
    })
}

/// Stylesheet export for browser-source renderers.
///
/// Vertical coordinates are bottom-anchored (`canvas_height - y`) because
/// the renderer pins the overlay to the bottom edge, while the model is
/// authored top-left-origin like everything else.
#[must_use]
pub fn stylesheet(config: &LowerThirdConfig) -> String {
    let canvas = config.layout.canvas;
    let logo_position = config.logo.mode.position();
    let (_, logo_size) = logo_source_and_size(&config.logo.mode);

    let mut css = String::new();

    css.push_str(&format!(
        ".lower-third-container {{\n\
         \x20 position: relative;\n\
         \x20 width: {}px;\n\
         \x20 height: {}px;\n\
         \x20 overflow: hidden;\n\
         }}\n\n",
        canvas.width, canvas.height
    ));

    css.push_str(&format!(
        ".logo-element {{\n\
         \x20 position: absolute;\n\
         \x20 left: {}px;\n\
         \x20 bottom: {}px;\n\
         \x20 width: {}px;\n\
         \x20 height: {}px;\n\
         \x20 display: {};\n\
         }}\n\n",
        logo_position.x,
        bottom_anchor(canvas, logo_position),
        logo_size.width,
        logo_size.height,
        display_value(config.logo.visible),
    ));

    css.push_str(&slot_rule(".main-text-element", &config.main_text, canvas));
    css.push('\n');
    css.push_str(&slot_rule(".secondary-text-element", &config.secondary_text, canvas));

    css
}

fn slot_rule(selector: &str, slot: &TextSlot, canvas: Dimensions) -> String {
    let padding = slot.background.padding;
    format!(
        "{selector} {{\n\
         \x20 position: absolute;\n\
         \x20 left: {}px;\n\
         \x20 bottom: {}px;\n\
         \x20 font-family: \"{}\";\n\
         \x20 font-size: {}px;\n\
         \x20 font-weight: {};\n\
         \x20 font-style: {};\n\
         \x20 text-transform: {};\n\
         \x20 color: {};\n\
         \x20 background-color: {};\n\
         \x20 opacity: {};\n\
         \x20 padding: {}px {}px {}px {}px;\n\
         \x20 border-radius: {}px;\n\
         \x20 display: {};\n\
         }}\n",
        slot.position.x,
        bottom_anchor(canvas, slot.position),
        slot.typography.family,
        slot.typography.size,
        slot.typography.weight.as_wire(),
        slot.typography.style.as_wire(),
        slot.typography.transform.as_wire(),
        slot.style.color,
        slot.background.color,
        slot.background.opacity,
        padding.top,
        padding.right,
        padding.bottom,
        padding.left,
        slot.background.corner_radius,
        display_value(slot.visible),
    )
}

fn bottom_anchor(canvas: Dimensions, position: Position) -> i64 {
    i64::from(canvas.height) - i64::from(position.y)
}

const fn display_value(visible: bool) -> &'static str {
    if visible { "block" } else { "none" }
}

/// Companion-app web payload: a denormalized one-way projection of a
/// whole profile, including endpoint URLs templated from `base_url`.
#[must_use]
pub fn web_payload(profile: &Profile, base_url: &str) -> Value {
    let config = &profile.config;
    let base = base_url.trim_end_matches('/');
    let (logo_source, logo_size) = logo_source_and_size(&config.logo.mode);
    let ad_width = match config.advertisement.width {
        AdWidth::Auto => json!("auto"),
        AdWidth::Px(px) => json!(px),
    };

    json!({
        "profile": {
            "name": profile.name,
            "category": profile.category.as_wire(),
            "created_at": profile.created_at.to_rfc3339(),
            "schema_version": profile.schema_version,
        },
        "colors": {
            "backgrounds": profile.palette.backgrounds,
            "texts": profile.palette.texts,
        },
        "canvas": {
            "width": config.layout.canvas.width,
            "height": config.layout.canvas.height,
        },
        "elements": {
            "logo": {
                "visible": config.logo.visible,
                "mode": config.logo.mode.tag(),
                "source": logo_source,
                "x": config.logo.mode.position().x,
                "y": config.logo.mode.position().y,
                "width": logo_size.width,
                "height": logo_size.height,
            },
            "main_text": web_text_element(&config.main_text),
            "secondary_text": web_text_element(&config.secondary_text),
            "theme": web_text_element(&config.theme),
            "advertisement": {
                "visible": config.advertisement.visible,
                "url": config.advertisement.url,
                "x": config.advertisement.position.x,
                "y": config.advertisement.position.y,
                "width": ad_width,
                "height": config.advertisement.height,
            },
        },
        "guest": {
            "name": profile.guest.name,
            "role": profile.guest.role,
        },
        "dynamic_content": {
            "enabled": profile.dynamic_content.enabled,
            "items": profile.dynamic_content.items,
        },
        "render": {
            "preset": config.layout.preset,
            "safe_margins": config.layout.safe_margins,
            "display_ms": config.timing.display_ms,
            "auto_hide": config.timing.auto_hide,
            "logo_first": config.timing.sequencing.logo_first,
            "stagger_ms": config.timing.sequencing.stagger_ms,
        },
        "endpoints": {
            "visualization": format!("{base}/view/{}", profile.name),
            "update": format!("{base}/profiles/{}", profile.name),
            "socket": format!("{base}/socket/{}", profile.name),
        },
    })
}

fn web_text_element(slot: &TextSlot) -> Value {
    json!({
        "visible": slot.visible,
        "content": slot.content,
        "x": slot.position.x,
        "y": slot.position.y,
        "font_size": slot.typography.size,
        "color": slot.style.color,
        "background_color": slot.background.color,
    })
}

/// The image source and footprint of the active logo mode. Rotation uses
/// the first carousel entry as its representative source.
fn logo_source_and_size(mode: &LogoMode) -> (String, Dimensions) {
    match mode {
        LogoMode::Simple(simple) => (simple.url.clone(), simple.size),
        LogoMode::Alliance(alliance) => (alliance.url.clone(), alliance.size),
        LogoMode::Rotation(rotation) => (
            rotation
                .items
                .first()
                .map(|item| item.url.clone())
                .unwrap_or_default(),
            rotation.size,
        ),
    }
}
