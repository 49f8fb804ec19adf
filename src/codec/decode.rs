//! Total decoding of wire records into the configuration model.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::wire::{bool_or, f64_or, field, i32_or, str_or, u32_or};
use crate::model::{
    AdvertisementConfig, AllianceLogo, DynamicContent, GuestInfo, LayoutConfig, LogoConfig,
    LogoMode, LowerThirdConfig, Palette, PresetsConfig, Profile, ProfileCategory, RotationItem,
    RotationLogo, Sequencing, SimpleLogo, TextSlot, TimingConfig, SCHEMA_VERSION,
};
use crate::primitives::{
    AdWidth, Animation, AnimationKind, BackgroundStyle, Dimensions, Easing, FontStyle, FontWeight,
    LogoShape, Padding, Position, Shadow, TextStyle, TextTransform, Typography,
};

/// Decode a configuration record.
///
/// Never fails: any missing, mistyped, or unknown-enum input degrades to
/// the hard-coded defaults of the corresponding model type.
#[must_use]
pub fn decode(record: &Value) -> LowerThirdConfig {
    LowerThirdConfig {
        layout: decode_layout(field(record, "layout")),
        logo: decode_logo(field(record, "logo")),
        main_text: decode_text_slot(field(record, "main_text")),
        secondary_text: decode_text_slot(field(record, "secondary_text")),
        theme: decode_text_slot(field(record, "theme")),
        advertisement: decode_advertisement(field(record, "advertisement")),
        timing: decode_timing(field(record, "timing")),
        presets: decode_presets(field(record, "presets")),
    }
}

/// Decode an advanced profile record. Total, like [`decode`].
#[must_use]
pub fn decode_profile(record: &Value) -> Profile {
    let palette = field(record, "palette");
    let guest = field(record, "guest");
    let dynamic = field(record, "dynamic_content");

    Profile {
        name: str_or(record, "name", ""),
        category: ProfileCategory::from_wire(&str_or(record, "category", "")),
        created_at: decode_timestamp(record),
        schema_version: u32_or(record, "schema_version", SCHEMA_VERSION),
        palette: Palette {
            backgrounds: decode_color_triple(palette, "backgrounds", &Palette::default().backgrounds),
            texts: decode_color_triple(palette, "texts", &Palette::default().texts),
        },
        guest: GuestInfo {
            name: str_or(guest, "name", ""),
            role: str_or(guest, "role", ""),
        },
        dynamic_content: DynamicContent {
            enabled: bool_or(dynamic, "enabled", false),
            items: field(dynamic, "items")
                .as_array()
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(ToString::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        },
        config: decode(field(record, "config")),
    }
}

fn decode_timestamp(record: &Value) -> DateTime<Utc> {
    field(record, "created_at")
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map_or(DateTime::UNIX_EPOCH, |dt| dt.with_timezone(&Utc))
}

fn decode_color_triple(palette: &Value, key: &str, defaults: &[String; 3]) -> [String; 3] {
    let items = field(palette, key);
    let mut out = defaults.clone();
    if let Some(list) = items.as_array() {
        for (i, slot) in out.iter_mut().enumerate() {
            if let Some(color) = list.get(i).and_then(Value::as_str) {
                *slot = color.to_string();
            }
        }
    }
    out
}

fn decode_layout(record: &Value) -> LayoutConfig {
    let defaults = LayoutConfig::default();
    let canvas = field(record, "canvas");
    let width = u32_or(canvas, "width", defaults.canvas.width);
    let height = u32_or(canvas, "height", defaults.canvas.height);
    LayoutConfig {
        preset: str_or(record, "preset", &defaults.preset),
        safe_margins: bool_or(record, "safe_margins", defaults.safe_margins),
        // Canvas dimensions must stay positive; zero degrades to default.
        canvas: Dimensions::new(
            if width == 0 { defaults.canvas.width } else { width },
            if height == 0 { defaults.canvas.height } else { height },
        ),
    }
}

fn decode_position(record: &Value, defaults: Position) -> Position {
    Position {
        x: i32_or(record, "x", defaults.x),
        y: i32_or(record, "y", defaults.y),
    }
}

fn decode_dimensions(record: &Value, defaults: Dimensions) -> Dimensions {
    Dimensions {
        width: u32_or(record, "width", defaults.width),
        height: u32_or(record, "height", defaults.height),
    }
}

fn decode_padding(record: &Value, defaults: Padding) -> Padding {
    Padding {
        top: u32_or(record, "top", defaults.top),
        right: u32_or(record, "right", defaults.right),
        bottom: u32_or(record, "bottom", defaults.bottom),
        left: u32_or(record, "left", defaults.left),
    }
}

fn decode_background(record: &Value, defaults: &BackgroundStyle) -> BackgroundStyle {
    BackgroundStyle {
        color: str_or(record, "color", &defaults.color),
        opacity: f64_or(record, "opacity", defaults.opacity),
        padding: decode_padding(field(record, "padding"), defaults.padding),
        corner_radius: u32_or(record, "corner_radius", defaults.corner_radius),
    }
}

fn decode_animation(record: &Value, defaults: &Animation) -> Animation {
    Animation {
        kind: AnimationKind::from_wire(&str_or(record, "kind", defaults.kind.as_wire())),
        duration_ms: u32_or(record, "duration_ms", defaults.duration_ms),
        delay_ms: u32_or(record, "delay_ms", defaults.delay_ms),
        easing: Easing::from_wire(&str_or(record, "easing", defaults.easing.as_wire())),
    }
}

fn decode_text_style(record: &Value) -> TextStyle {
    let defaults = TextStyle::default();
    let shadow = field(record, "shadow");
    TextStyle {
        color: str_or(record, "color", &defaults.color),
        shadow: shadow.is_object().then(|| {
            let d = Shadow::default();
            Shadow {
                color: str_or(shadow, "color", &d.color),
                blur: u32_or(shadow, "blur", d.blur),
                offset_x: i32_or(shadow, "offset_x", d.offset_x),
                offset_y: i32_or(shadow, "offset_y", d.offset_y),
            }
        }),
    }
}

fn decode_typography(record: &Value) -> Typography {
    let defaults = Typography::default();
    Typography {
        family: str_or(record, "family", &defaults.family),
        size: u32_or(record, "size", defaults.size),
        weight: FontWeight::from_wire(&str_or(record, "weight", defaults.weight.as_wire())),
        style: FontStyle::from_wire(&str_or(record, "style", defaults.style.as_wire())),
        transform: TextTransform::from_wire(&str_or(
            record,
            "transform",
            defaults.transform.as_wire(),
        )),
    }
}

fn decode_text_slot(record: &Value) -> TextSlot {
    let defaults = TextSlot::default();
    TextSlot {
        content: str_or(record, "content", ""),
        visible: bool_or(record, "visible", false),
        position: decode_position(field(record, "position"), defaults.position),
        typography: decode_typography(field(record, "typography")),
        background: decode_background(field(record, "background"), &defaults.background),
        style: decode_text_style(field(record, "style")),
        entry: decode_animation(field(record, "entry"), &defaults.entry),
        exit: decode_animation(field(record, "exit"), &defaults.exit),
    }
}

fn decode_logo(record: &Value) -> LogoConfig {
    // Unknown mode tags degrade to simple with its defaults.
    let mode = match str_or(record, "mode", "simple").as_str() {
        "alliance" => LogoMode::Alliance(decode_alliance(field(record, "alliance"))),
        "rotation" => LogoMode::Rotation(decode_rotation(field(record, "rotation"))),
        _ => LogoMode::Simple(decode_simple(field(record, "simple"))),
    };
    LogoConfig {
        visible: bool_or(record, "visible", false),
        mode,
    }
}

fn decode_simple(record: &Value) -> SimpleLogo {
    let defaults = SimpleLogo::default();
    SimpleLogo {
        url: str_or(record, "url", ""),
        position: decode_position(field(record, "position"), defaults.position),
        size: decode_dimensions(field(record, "size"), defaults.size),
        shape: LogoShape::from_wire(&str_or(record, "shape", defaults.shape.as_wire())),
        background: decode_background(field(record, "background"), &defaults.background),
        animation: decode_animation(field(record, "animation"), &defaults.animation),
    }
}

fn decode_alliance(record: &Value) -> AllianceLogo {
    let defaults = AllianceLogo::default();
    AllianceLogo {
        url: str_or(record, "url", ""),
        description: str_or(record, "description", ""),
        position: decode_position(field(record, "position"), defaults.position),
        size: decode_dimensions(field(record, "size"), defaults.size),
    }
}

fn decode_rotation(record: &Value) -> RotationLogo {
    let defaults = RotationLogo::default();
    RotationLogo {
        items: field(record, "items")
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .map(|item| RotationItem {
                        url: str_or(item, "url", ""),
                        name: str_or(item, "name", ""),
                        duration_ms: u32_or(item, "duration_ms", 3000),
                    })
                    .collect()
            })
            .unwrap_or_default(),
        looped: bool_or(record, "looped", defaults.looped),
        pause_on_hover: bool_or(record, "pause_on_hover", defaults.pause_on_hover),
        position: decode_position(field(record, "position"), defaults.position),
        size: decode_dimensions(field(record, "size"), defaults.size),
    }
}

fn decode_advertisement(record: &Value) -> AdvertisementConfig {
    let defaults = AdvertisementConfig::default();
    let width = match field(record, "width") {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map_or(AdWidth::Auto, AdWidth::Px),
        _ => AdWidth::Auto,
    };
    AdvertisementConfig {
        visible: bool_or(record, "visible", defaults.visible),
        url: str_or(record, "url", ""),
        position: decode_position(field(record, "position"), defaults.position),
        width,
        height: u32_or(record, "height", defaults.height),
        animation: decode_animation(field(record, "animation"), &defaults.animation),
    }
}

fn decode_timing(record: &Value) -> TimingConfig {
    let defaults = TimingConfig::default();
    let sequencing = field(record, "sequencing");
    TimingConfig {
        display_ms: u32_or(record, "display_ms", defaults.display_ms),
        auto_hide: bool_or(record, "auto_hide", defaults.auto_hide),
        sequencing: Sequencing {
            logo_first: bool_or(sequencing, "logo_first", defaults.sequencing.logo_first),
            stagger_ms: u32_or(sequencing, "stagger_ms", defaults.sequencing.stagger_ms),
        },
    }
}

fn decode_presets(record: &Value) -> PresetsConfig {
    let defaults = PresetsConfig::default();
    let descriptions = field(record, "descriptions").as_object().map_or_else(
        || defaults.descriptions.clone(),
        |map| {
            map.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        },
    );
    PresetsConfig {
        active: str_or(record, "active", &defaults.active),
        descriptions,
    }
}
