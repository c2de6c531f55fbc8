//! Game settings and the values that change as the player levels up.
//!
//! `Settings` is what a config file describes. `Config` wraps it together with
//! the dynamic values (speeds, points, fleet direction) the simulation mutates.

use std::path::Path;

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

/// An 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Horizontal direction shared by every invader in the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FleetDirection {
    Left,
    #[default]
    Right,
}

impl FleetDirection {
    /// `+1.0` for right, `-1.0` for left.
    pub fn sign(self) -> f32 {
        match self {
            FleetDirection::Left => -1.0,
            FleetDirection::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            FleetDirection::Left => FleetDirection::Right,
            FleetDirection::Right => FleetDirection::Left,
        }
    }
}

/// Static game settings plus the base values for everything that scales per level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub bg_color: Rgb,

    // === Ship ===
    pub ship_width: f32,
    pub ship_height: f32,
    pub ship_speed: f32,
    pub ship_limit: u32,
    /// Keep the ship inside the screen horizontally. Off by default: the
    /// classic game lets it slide out of view.
    pub clamp_ship: bool,

    // === Bullets ===
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,
    pub bullet_color: Rgb,
    pub bullets_allowed: usize,

    // === Aliens ===
    pub alien_width: f32,
    pub alien_height: f32,
    pub alien_speed: f32,
    pub alien_points: u32,
    pub fleet_drop_speed: f32,

    // === Progression ===
    /// Multiplier applied to every speed on wave clear
    pub speedup_scale: f32,
    /// Multiplier applied to alien points on wave clear
    pub score_scale: f32,

    // === Pacing ===
    pub respawn_pause_ms: u64,
    pub target_fps: u32,

    // === Play button ===
    pub button_width: f32,
    pub button_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 1200.0,
            screen_height: 800.0,
            bg_color: Rgb(230, 230, 230),

            ship_width: 60.0,
            ship_height: 48.0,
            ship_speed: 1.5,
            ship_limit: 3,
            clamp_ship: false,

            bullet_width: 3.0,
            bullet_height: 15.0,
            bullet_speed: 2.5,
            bullet_color: Rgb(60, 60, 60),
            bullets_allowed: 3,

            alien_width: 40.0,
            alien_height: 30.0,
            alien_speed: 1.0,
            alien_points: 50,
            fleet_drop_speed: 10.0,

            speedup_scale: 1.1,
            score_scale: 1.5,

            respawn_pause_ms: 500,
            target_fps: 60,

            button_width: 200.0,
            button_height: 50.0,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file. Missing fields fall back to defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&json)
            .with_context(|| format!("parsing settings in {}", path.display()))?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.screen_width > 0.0 && self.screen_height > 0.0,
            "screen size must be positive, got {}x{}",
            self.screen_width,
            self.screen_height
        );
        for (name, w, h) in [
            ("ship", self.ship_width, self.ship_height),
            ("bullet", self.bullet_width, self.bullet_height),
            ("alien", self.alien_width, self.alien_height),
            ("button", self.button_width, self.button_height),
        ] {
            ensure!(w > 0.0 && h > 0.0, "{name} size must be positive, got {w}x{h}");
        }
        for (name, speed) in [
            ("ship_speed", self.ship_speed),
            ("bullet_speed", self.bullet_speed),
            ("alien_speed", self.alien_speed),
        ] {
            ensure!(speed > 0.0, "{name} must be positive, got {speed}");
        }
        ensure!(self.fleet_drop_speed >= 0.0, "fleet_drop_speed must not be negative");
        ensure!(self.speedup_scale >= 1.0, "speedup_scale must be at least 1.0");
        ensure!(self.score_scale >= 1.0, "score_scale must be at least 1.0");
        ensure!(self.target_fps > 0, "target_fps must be positive");
        Ok(())
    }
}

/// Values that change during play and are restored on a new game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dynamic {
    pub ship_speed: f32,
    pub bullet_speed: f32,
    pub alien_speed: f32,
    pub alien_points: u32,
    pub fleet_direction: FleetDirection,
}

impl Dynamic {
    fn base(settings: &Settings) -> Self {
        Self {
            ship_speed: settings.ship_speed,
            bullet_speed: settings.bullet_speed,
            alien_speed: settings.alien_speed,
            alien_points: settings.alien_points,
            fleet_direction: FleetDirection::Right,
        }
    }
}

/// Settings plus the dynamic values derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub settings: Settings,
    pub dynamic: Dynamic,
}

impl Config {
    pub fn new(settings: Settings) -> Self {
        let dynamic = Dynamic::base(&settings);
        Self { settings, dynamic }
    }

    /// Restore speeds, points and fleet direction to their base values.
    pub fn reset_dynamic(&mut self) {
        self.dynamic = Dynamic::base(&self.settings);
    }

    /// Speed everything up for the next wave.
    pub fn increase_speed(&mut self) {
        let scale = self.settings.speedup_scale;
        self.dynamic.ship_speed *= scale;
        self.dynamic.bullet_speed *= scale;
        self.dynamic.alien_speed *= scale;
        self.dynamic.alien_points =
            (self.dynamic.alien_points as f32 * self.settings.score_scale) as u32;
        log::debug!(
            "Speeds now ship={:.2} bullet={:.2} alien={:.2}, alien worth {}",
            self.dynamic.ship_speed,
            self.dynamic.bullet_speed,
            self.dynamic.alien_speed,
            self.dynamic.alien_points
        );
    }

    pub fn change_fleet_direction(&mut self) {
        self.dynamic.fleet_direction = self.dynamic.fleet_direction.flipped();
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_sign_is_unit() {
        assert_eq!(FleetDirection::Right.sign(), 1.0);
        assert_eq!(FleetDirection::Left.sign(), -1.0);
        assert_eq!(FleetDirection::Left.flipped(), FleetDirection::Right);
    }

    #[test]
    fn default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }
}
