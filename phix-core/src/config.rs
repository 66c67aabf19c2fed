//! Settings file parsing.
//!
//! The format is one `key = value` per line. Blank lines and lines starting
//! with `#` are ignored, and trailing `# comments` are stripped. Keys that
//! do not appear keep their defaults.
//!
//! ```text
//! gravity = 0.3
//! top_barrier = true
//! arena.width = 1600
//! water.rest_density = 5.0
//! ```

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::settings::{Arena, Settings, SettingsField};
use std::fmt::Write;
use thiserror::Error;

/// Settings file error. Lines are 1-based.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("expected 'key = value', found '{text}'")]
    MalformedLine { line: usize, text: String },

    #[error("unknown setting '{key}'")]
    UnknownKey { line: usize, key: String },

    #[error("'{value}' is not a number for '{key}'")]
    InvalidNumber {
        line: usize,
        key: String,
        value: String,
    },

    #[error("'{value}' is not true/false for '{key}'")]
    InvalidBool {
        line: usize,
        key: String,
        value: String,
    },

    #[error("'{key}' must be a finite positive number, got {value}")]
    NotPositive { line: usize, key: String, value: f32 },
}

impl ConfigError {
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MalformedLine { line, .. }
            | Self::UnknownKey { line, .. }
            | Self::InvalidNumber { line, .. }
            | Self::InvalidBool { line, .. }
            | Self::NotPositive { line, .. } => Some(*line),
        }
    }
}

/// Contents of a settings file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsFile {
    pub settings: Settings,
    pub arena: Arena,
}

/// Parse a settings file without range checks
pub fn parse_settings(source: &str) -> Result<SettingsFile, ConfigError> {
    let mut file = SettingsFile::default();

    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let text = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        }
        .trim();
        if text.is_empty() {
            continue;
        }

        let (key, value) = text.split_once('=').ok_or_else(|| ConfigError::MalformedLine {
            line,
            text: text.to_string(),
        })?;
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            return Err(ConfigError::MalformedLine {
                line,
                text: text.to_string(),
            });
        }

        apply_entry(&mut file, key, value, line)?;
    }

    Ok(file)
}

/// Parse a settings file, pulling out-of-range values into bounds.
///
/// Each clamped field is reported as a warning.
pub fn load_settings(source: &str) -> Result<(SettingsFile, Diagnostics), ConfigError> {
    let mut file = parse_settings(source)?;
    let mut diagnostics = Diagnostics::new();

    for field in file.settings.out_of_range() {
        let before = file.settings.get(field);
        file.settings.set(field, before);
        diagnostics.push(Diagnostic::warning(
            format!(
                "{} = {} is out of range, using {}",
                field.label(),
                before,
                file.settings.get(field)
            ),
            find_key_line(source, field_key(field)),
        ));
    }

    Ok((file, diagnostics))
}

fn find_key_line(source: &str, key: &str) -> Option<usize> {
    source
        .lines()
        .enumerate()
        .filter(|(_, l)| {
            l.split_once('=')
                .map(|(k, _)| k.trim() == key)
                .unwrap_or(false)
        })
        .map(|(i, _)| i + 1)
        .last()
}

/// Key used for a field in settings files
pub fn field_key(field: SettingsField) -> &'static str {
    match field {
        SettingsField::Gravity => "gravity",
        SettingsField::MaxSpeed => "max_speed",
        SettingsField::MoveAwayDistance => "move_away_distance",
        SettingsField::MoveAwayStrength => "move_away_strength",
        SettingsField::MoveAttractDistance => "move_attract_distance",
        SettingsField::MoveAttractStrength => "move_attract_strength",
        SettingsField::GroundRestitution => "ground_restitution",
        SettingsField::CollisionRestitution => "collision_restitution",
        SettingsField::AirDrag => "air_drag",
        SettingsField::GroundFriction => "ground_friction",
        SettingsField::TopBarrier => "top_barrier",
    }
}

fn apply_entry(
    file: &mut SettingsFile,
    key: &str,
    value: &str,
    line: usize,
) -> Result<(), ConfigError> {
    if key == "top_barrier" {
        file.settings.has_top_barrier = parse_bool(key, value, line)?;
        return Ok(());
    }

    if let Some(field) = SettingsField::ALL
        .into_iter()
        .find(|&f| f != SettingsField::TopBarrier && field_key(f) == key)
    {
        let v = parse_number(key, value, line)?;
        // Range problems are reported by `load_settings`, so write raw
        match field {
            SettingsField::Gravity => file.settings.gravity = v,
            SettingsField::MaxSpeed => file.settings.max_speed = v,
            SettingsField::MoveAwayDistance => file.settings.move_away_distance = v,
            SettingsField::MoveAwayStrength => file.settings.move_away_strength = v,
            SettingsField::MoveAttractDistance => file.settings.move_attract_distance = v,
            SettingsField::MoveAttractStrength => file.settings.move_attract_strength = v,
            SettingsField::GroundRestitution => file.settings.ground_restitution = v,
            SettingsField::CollisionRestitution => file.settings.collision_restitution = v,
            SettingsField::AirDrag => file.settings.air_drag = v,
            SettingsField::GroundFriction => file.settings.ground_friction = v,
            SettingsField::TopBarrier => {}
        }
        return Ok(());
    }

    let water = &mut file.settings.water;
    let gas = &mut file.settings.gas;
    let arena = &mut file.arena;
    let slot = match key {
        "arena.width" => &mut arena.width,
        "arena.height" => &mut arena.height,
        "arena.padding" => &mut arena.padding,
        "water.rest_distance" => &mut water.rest_distance,
        "water.rest_density" => &mut water.rest_density,
        "water.pressure_stiffness" => &mut water.pressure_stiffness,
        "water.near_stiffness" => &mut water.near_stiffness,
        "water.viscosity" => &mut water.viscosity,
        "water.boundary_push" => &mut water.boundary_push,
        "water.boundary_drag" => &mut water.boundary_drag,
        "gas.rest_distance" => &mut gas.rest_distance,
        "gas.pressure" => &mut gas.pressure,
        "gas.viscosity" => &mut gas.viscosity,
        "gas.buoyancy" => &mut gas.buoyancy,
        "gas.drag" => &mut gas.drag,
        "gas.boundary_push" => &mut gas.boundary_push,
        "gas.boundary_drag" => &mut gas.boundary_drag,
        _ => {
            return Err(ConfigError::UnknownKey {
                line,
                key: key.to_string(),
            })
        }
    };

    let v = parse_number(key, value, line)?;
    // Grid sizes and the arena are derived from these
    let must_be_positive = matches!(
        key,
        "arena.width" | "arena.height" | "water.rest_distance" | "gas.rest_distance"
    );
    if must_be_positive && v <= 0.0 {
        return Err(ConfigError::NotPositive {
            line,
            key: key.to_string(),
            value: v,
        });
    }
    *slot = v;
    Ok(())
}

fn parse_number(key: &str, value: &str, line: usize) -> Result<f32, ConfigError> {
    value
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfigError::InvalidNumber {
            line,
            key: key.to_string(),
            value: value.to_string(),
        })
}

fn parse_bool(key: &str, value: &str, line: usize) -> Result<bool, ConfigError> {
    match value {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            line,
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Render settings in the file format, every key spelled out
pub fn render_settings(settings: &Settings, arena: &Arena) -> String {
    let mut out = String::from("# phix settings\n");
    for field in SettingsField::ALL {
        if field == SettingsField::TopBarrier {
            let _ = writeln!(out, "top_barrier = {}", settings.has_top_barrier);
        } else {
            let _ = writeln!(out, "{} = {}", field_key(field), settings.get(field));
        }
    }

    let _ = writeln!(out, "\narena.width = {}", arena.width);
    let _ = writeln!(out, "arena.height = {}", arena.height);
    let _ = writeln!(out, "arena.padding = {}", arena.padding);

    let w = &settings.water;
    let _ = writeln!(out, "\nwater.rest_distance = {}", w.rest_distance);
    let _ = writeln!(out, "water.rest_density = {}", w.rest_density);
    let _ = writeln!(out, "water.pressure_stiffness = {}", w.pressure_stiffness);
    let _ = writeln!(out, "water.near_stiffness = {}", w.near_stiffness);
    let _ = writeln!(out, "water.viscosity = {}", w.viscosity);
    let _ = writeln!(out, "water.boundary_push = {}", w.boundary_push);
    let _ = writeln!(out, "water.boundary_drag = {}", w.boundary_drag);

    let g = &settings.gas;
    let _ = writeln!(out, "\ngas.rest_distance = {}", g.rest_distance);
    let _ = writeln!(out, "gas.pressure = {}", g.pressure);
    let _ = writeln!(out, "gas.viscosity = {}", g.viscosity);
    let _ = writeln!(out, "gas.buoyancy = {}", g.buoyancy);
    let _ = writeln!(out, "gas.drag = {}", g.drag);
    let _ = writeln!(out, "gas.boundary_push = {}", g.boundary_push);
    let _ = writeln!(out, "gas.boundary_drag = {}", g.boundary_drag);
    out
}
