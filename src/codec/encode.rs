//! Encoding of the configuration model into wire records.
//!
//! Field layout is explicit: every field the model defines is written,
//! so `decode` can reconstruct the tree exactly.

use serde_json::{json, Map, Value};

use crate::model::{
    AdvertisementConfig, AllianceLogo, LayoutConfig, LogoConfig, LogoMode, LowerThirdConfig,
    PresetsConfig, Profile, RotationLogo, SimpleLogo, TextSlot, TimingConfig,
};
use crate::primitives::{AdWidth, Animation, BackgroundStyle, Dimensions, Padding, Position, TextStyle, Typography};

/// Encode a configuration into its wire record.
#[must_use]
pub fn encode(config: &LowerThirdConfig) -> Value {
    json!({
        "layout": encode_layout(&config.layout),
        "logo": encode_logo(&config.logo),
        "main_text": encode_text_slot(&config.main_text),
        "secondary_text": encode_text_slot(&config.secondary_text),
        "theme": encode_text_slot(&config.theme),
        "advertisement": encode_advertisement(&config.advertisement),
        "timing": encode_timing(&config.timing),
        "presets": encode_presets(&config.presets),
    })
}

/// Encode an advanced profile record.
#[must_use]
pub fn encode_profile(profile: &Profile) -> Value {
    json!({
        "name": profile.name,
        "category": profile.category.as_wire(),
        "created_at": profile.created_at.to_rfc3339(),
        "schema_version": profile.schema_version,
        "palette": {
            "backgrounds": profile.palette.backgrounds,
            "texts": profile.palette.texts,
        },
        "guest": {
            "name": profile.guest.name,
            "role": profile.guest.role,
        },
        "dynamic_content": {
            "enabled": profile.dynamic_content.enabled,
            "items": profile.dynamic_content.items,
        },
        "config": encode(&profile.config),
    })
}

fn encode_layout(layout: &LayoutConfig) -> Value {
    json!({
        "preset": layout.preset,
        "safe_margins": layout.safe_margins,
        "canvas": encode_dimensions(layout.canvas),
    })
}

fn encode_position(position: Position) -> Value {
    json!({"x": position.x, "y": position.y})
}

fn encode_dimensions(dimensions: Dimensions) -> Value {
    json!({"width": dimensions.width, "height": dimensions.height})
}

fn encode_padding(padding: Padding) -> Value {
    // Per-side padding is first-class; never collapsed to one value.
    json!({
        "top": padding.top,
        "right": padding.right,
        "bottom": padding.bottom,
        "left": padding.left,
    })
}

fn encode_background(background: &BackgroundStyle) -> Value {
    json!({
        "color": background.color,
        "opacity": background.opacity,
        "padding": encode_padding(background.padding),
        "corner_radius": background.corner_radius,
    })
}

fn encode_animation(animation: &Animation) -> Value {
    json!({
        "kind": animation.kind.as_wire(),
        "duration_ms": animation.duration_ms,
        "delay_ms": animation.delay_ms,
        "easing": animation.easing.as_wire(),
    })
}

fn encode_text_style(style: &TextStyle) -> Value {
    let mut out = Map::new();
    out.insert("color".to_string(), json!(style.color));
    if let Some(shadow) = &style.shadow {
        out.insert(
            "shadow".to_string(),
            json!({
                "color": shadow.color,
                "blur": shadow.blur,
                "offset_x": shadow.offset_x,
                "offset_y": shadow.offset_y,
            }),
        );
    }
    Value::Object(out)
}

fn encode_typography(typography: &Typography) -> Value {
    json!({
        "family": typography.family,
        "size": typography.size,
        "weight": typography.weight.as_wire(),
        "style": typography.style.as_wire(),
        "transform": typography.transform.as_wire(),
    })
}

fn encode_text_slot(slot: &TextSlot) -> Value {
    json!({
        "content": slot.content,
        "visible": slot.visible,
        "position": encode_position(slot.position),
        "typography": encode_typography(&slot.typography),
        "background": encode_background(&slot.background),
        "style": encode_text_style(&slot.style),
        "entry": encode_animation(&slot.entry),
        "exit": encode_animation(&slot.exit),
    })
}

fn encode_logo(logo: &LogoConfig) -> Value {
    let mut out = Map::new();
    out.insert("visible".to_string(), json!(logo.visible));
    out.insert("mode".to_string(), json!(logo.mode.tag()));
    // Only the active variant's payload is written.
    let payload = match &logo.mode {
        LogoMode::Simple(simple) => encode_simple(simple),
        LogoMode::Alliance(alliance) => encode_alliance(alliance),
        LogoMode::Rotation(rotation) => encode_rotation(rotation),
    };
    out.insert(logo.mode.tag().to_string(), payload);
    Value::Object(out)
}

fn encode_simple(simple: &SimpleLogo) -> Value {
    json!({
        "url": simple.url,
        "position": encode_position(simple.position),
        "size": encode_dimensions(simple.size),
        "shape": simple.shape.as_wire(),
        "background": encode_background(&simple.background),
        "animation": encode_animation(&simple.animation),
    })
}

fn encode_alliance(alliance: &AllianceLogo) -> Value {
    json!({
        "url": alliance.url,
        "description": alliance.description,
        "position": encode_position(alliance.position),
        "size": encode_dimensions(alliance.size),
    })
}

fn encode_rotation(rotation: &RotationLogo) -> Value {
    json!({
        "items": rotation
            .items
            .iter()
            .map(|item| json!({
                "url": item.url,
                "name": item.name,
                "duration_ms": item.duration_ms,
            }))
            .collect::<Vec<_>>(),
        "looped": rotation.looped,
        "pause_on_hover": rotation.pause_on_hover,
        "position": encode_position(rotation.position),
        "size": encode_dimensions(rotation.size),
    })
}

fn encode_advertisement(ad: &AdvertisementConfig) -> Value {
    let width = match ad.width {
        AdWidth::Auto => json!("auto"),
        AdWidth::Px(px) => json!(px),
    };
    json!({
        "visible": ad.visible,
        "url": ad.url,
        "position": encode_position(ad.position),
        "width": width,
        "height": ad.height,
        "animation": encode_animation(&ad.animation),
    })
}

fn encode_timing(timing: &TimingConfig) -> Value {
    json!({
        "display_ms": timing.display_ms,
        "auto_hide": timing.auto_hide,
        "sequencing": {
            "logo_first": timing.sequencing.logo_first,
            "stagger_ms": timing.sequencing.stagger_ms,
        },
    })
}

fn encode_presets(presets: &PresetsConfig) -> Value {
    json!({
        "active": presets.active,
        "descriptions": presets.descriptions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, decode_profile};
    use crate::model::{default_config, RotationItem};
    use crate::primitives::{AnimationKind, Easing, FontWeight, LogoShape, Shadow, TextTransform};

    fn busy_config() -> LowerThirdConfig {
        let mut config = default_config();
        config.layout.preset = "breaking".to_string();
        config.main_text.content = "Titular principal".to_string();
        config.main_text.visible = true;
        config.main_text.style.shadow = Some(Shadow::default());
        config.main_text.typography.weight = FontWeight::SemiBold;
        config.main_text.typography.transform = TextTransform::Uppercase;
        config.secondary_text.content = "Baja secundaria".to_string();
        config.secondary_text.entry.kind = AnimationKind::SlideLeft;
        config.secondary_text.entry.easing = Easing::EaseInOut;
        config.theme.content = "ELECCIONES".to_string();
        config.advertisement.visible = true;
        config.advertisement.url = "https://cdn.example/spot.png".to_string();
        config.advertisement.width = AdWidth::Px(480);
        config.presets
            .descriptions
            .insert("breaking".to_string(), "Full-width breaking bar".to_string());
        config
    }

    #[test]
    fn test_roundtrip_default() {
        let config = default_config();
        assert_eq!(decode(&encode(&config)), config);
    }

    #[test]
    fn test_roundtrip_busy() {
        let config = busy_config();
        assert_eq!(decode(&encode(&config)), config);
    }

    #[test]
    fn test_roundtrip_alliance_mode() {
        let mut config = default_config();
        config.logo.visible = true;
        config.logo.mode = LogoMode::Alliance(AllianceLogo {
            url: "https://x/alliance.png".to_string(),
            description: "Con la Universidad".to_string(),
            ..AllianceLogo::default()
        });
        assert_eq!(decode(&encode(&config)), config);
    }

    #[test]
    fn test_roundtrip_rotation_mode() {
        let mut config = default_config();
        config.logo.mode = LogoMode::Rotation(RotationLogo {
            items: vec![
                RotationItem {
                    url: "https://x/a.png".to_string(),
                    name: "Canal A".to_string(),
                    duration_ms: 2000,
                },
                RotationItem {
                    url: "https://x/b.png".to_string(),
                    name: "Canal B".to_string(),
                    duration_ms: 4000,
                },
            ],
            looped: false,
            pause_on_hover: true,
            ..RotationLogo::default()
        });
        assert_eq!(decode(&encode(&config)), config);
    }

    #[test]
    fn test_roundtrip_logo_shape() {
        let mut config = default_config();
        if let LogoMode::Simple(simple) = &mut config.logo.mode {
            simple.shape = LogoShape::Rounded;
            simple.url = "https://x/logo.png".to_string();
        }
        assert_eq!(decode(&encode(&config)), config);
    }

    #[test]
    fn test_encode_only_active_logo_payload() {
        let config = default_config();
        let record = encode(&config);
        let logo = record.get("logo").unwrap();
        assert!(logo.get("simple").is_some());
        assert!(logo.get("alliance").is_none());
        assert!(logo.get("rotation").is_none());
    }

    #[test]
    fn test_roundtrip_profile() {
        let mut profile = Profile::with_defaults("Noticias 9PM");
        profile.guest.name = "Ana".to_string();
        profile.guest.role = "Economista".to_string();
        profile.dynamic_content.enabled = true;
        profile.dynamic_content.items = vec!["Dato 1".to_string(), "Dato 2".to_string()];
        profile.config = busy_config();
        assert_eq!(decode_profile(&encode_profile(&profile)), profile);
    }

    #[test]
    fn test_encode_padding_per_side() {
        let mut config = default_config();
        config.main_text.background.padding = Padding {
            top: 1,
            right: 2,
            bottom: 3,
            left: 4,
        };
        let record = encode(&config);
        let padding = &record["main_text"]["background"]["padding"];
        assert_eq!(padding["top"], 1);
        assert_eq!(padding["right"], 2);
        assert_eq!(padding["bottom"], 3);
        assert_eq!(padding["left"], 4);
        assert_eq!(decode(&record), config);
    }
}
