//! Game tuning
//!
//! Loaded from JSON; every field is optional and falls back to the default
//! course. Values are validated before a run is built from them.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::SkierParams;

/// Errors from loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("malformed settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Skier tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkierSettings {
    pub forward_speed: f32,
    pub lateral_speed: f32,
    /// Track half-width
    pub max_lateral: f32,
    pub start: Vec3,
    pub scale: Vec3,
}

impl Default for SkierSettings {
    fn default() -> Self {
        Self {
            forward_speed: 15.0,
            lateral_speed: 8.0,
            max_lateral: 25.0,
            start: Vec3::new(0.0, 0.2, 8.0),
            scale: Vec3::new(0.7, 1.3, 0.7),
        }
    }
}

impl SkierSettings {
    pub fn params(&self) -> SkierParams {
        SkierParams {
            forward_speed: self.forward_speed,
            lateral_speed: self.lateral_speed,
            max_lateral: self.max_lateral,
        }
    }
}

/// Course layout tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseSettings {
    pub gate_count: usize,
    pub first_gate_z: f32,
    /// Depth between consecutive gates (negative: further down-slope)
    pub gate_step_z: f32,
    pub gate_half_width: f32,
    /// Amplitude of the gate centerline's lateral sway
    pub gate_sway: f32,
    pub gate_sway_frequency: f32,
    pub pole_y: f32,
    pub pole_height: f32,
    pub pole_thickness: f32,

    pub tree_count: usize,
    pub tree_first_z: f32,
    pub tree_step_z: f32,
    /// Minimum distance of a tree from the centerline
    pub tree_min_offset: f32,
    pub tree_offset_jitter: f32,
    pub tree_min_height: f32,
    pub tree_height_jitter: f32,
    pub tree_y: f32,
    pub tree_thickness: f32,
}

impl Default for CourseSettings {
    fn default() -> Self {
        Self {
            gate_count: 12,
            first_gate_z: -40.0,
            gate_step_z: -35.0,
            gate_half_width: 1.8,
            gate_sway: 8.0,
            gate_sway_frequency: 0.6,
            pole_y: -0.4,
            pole_height: 2.2,
            pole_thickness: 0.12,

            tree_count: 40,
            tree_first_z: -20.0,
            tree_step_z: -15.0,
            tree_min_offset: 18.0,
            tree_offset_jitter: 8.0,
            tree_min_height: 3.0,
            tree_height_jitter: 3.0,
            tree_y: -0.5,
            tree_thickness: 0.9,
        }
    }
}

/// All tunable values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub skier: SkierSettings,
    pub course: CourseSettings,
    /// Course seed; a fresh one is picked per session when absent
    pub seed: Option<u64>,
}

fn ensure(ok: bool, field: &'static str, reason: &'static str) -> Result<(), SettingsError> {
    if ok {
        Ok(())
    } else {
        Err(SettingsError::Invalid { field, reason })
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse settings, falling back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let skier = &self.skier;
        let course = &self.course;

        ensure(skier.forward_speed > 0.0, "skier.forward_speed", "must be positive")?;
        ensure(skier.lateral_speed >= 0.0, "skier.lateral_speed", "must not be negative")?;
        ensure(skier.max_lateral > 0.0, "skier.max_lateral", "must be positive")?;
        ensure(skier.start.is_finite(), "skier.start", "must be finite")?;
        ensure(skier.scale.min_element() > 0.0, "skier.scale", "must be positive")?;

        ensure(course.gate_step_z < 0.0, "course.gate_step_z", "gates must descend")?;
        ensure(course.gate_half_width > 0.0, "course.gate_half_width", "must be positive")?;
        ensure(course.pole_height > 0.0, "course.pole_height", "must be positive")?;
        ensure(course.pole_thickness > 0.0, "course.pole_thickness", "must be positive")?;
        ensure(course.tree_min_height > 0.0, "course.tree_min_height", "must be positive")?;
        ensure(course.tree_thickness > 0.0, "course.tree_thickness", "must be positive")?;
        ensure(course.tree_offset_jitter >= 0.0, "course.tree_offset_jitter", "must not be negative")?;
        ensure(course.tree_height_jitter >= 0.0, "course.tree_height_jitter", "must not be negative")?;
        Ok(())
    }

    /// Element holding optional settings JSON in the page
    #[allow(dead_code)]
    const ELEMENT_ID: &'static str = "ski-settings";

    /// Load settings from the page's `<script id="ski-settings">` element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) if !json.trim().is_empty() => Self::from_json_or_default(&json),
            _ => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from a JSON file (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Cannot read {}: {e}; using default settings", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.course.gate_count, 12);
        assert_eq!(settings.skier.params(), SkierParams::default());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "skier": { "lateral_speed": 10.0 }, "seed": 7 }"#)
            .unwrap();
        assert_eq!(settings.skier.lateral_speed, 10.0);
        assert_eq!(settings.skier.forward_speed, 15.0);
        assert_eq!(settings.course.tree_count, 40);
        assert_eq!(settings.seed, Some(7));
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = Settings::from_json(r#"{ "skier": { "forward_speed": 0.0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "skier.forward_speed",
                ..
            }
        ));

        let err = Settings::from_json(r#"{ "course": { "gate_step_z": 35.0 } }"#).unwrap_err();
        assert!(err.to_string().contains("course.gate_step_z"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[test]
    fn test_fallback_to_default() {
        let settings = Settings::from_json_or_default(r#"{ "skier": { "max_lateral": -1 } }"#);
        assert_eq!(settings.skier.max_lateral, 25.0);
    }

    #[test]
    fn test_json_roundtrip_keeps_seed() {
        let mut settings = Settings::default();
        settings.seed = Some(42);
        let json = settings.to_json().unwrap();
        let back = Settings::from_json(&json).unwrap();
        assert_eq!(back.seed, Some(42));
    }
}
