//! Recall ability configuration resource.
//!
//! Tunables for the rewind, its cooldown, the coupled time-stop and the
//! trigger effect, loaded from an INI file. Defaults allow a safe startup
//! without any file present.
//!
//! # Configuration File Format
//!
//! ```ini
//! [recall]
//! record_duration = 3.0
//! recall_duration = 0.5
//! cooldown = 10.0
//!
//! [timestop]
//! duration = 0.5
//! time_scale = 0.05
//! radius = 100.0
//! groups = enemy,projectile
//!
//! [effect]
//! duration = 0.5
//! color = 1.0,1.0,1.0,1.0
//!
//! [player]
//! max_health = 10
//! invincibility = 1.5
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

const DEFAULT_RECORD_DURATION: f32 = 3.0;
const DEFAULT_RECALL_DURATION: f32 = 0.5;
const DEFAULT_COOLDOWN: f32 = 10.0;
const DEFAULT_TIMESTOP_DURATION: f32 = 0.5;
const DEFAULT_TIMESTOP_SCALE: f32 = 0.05;
const DEFAULT_TIMESTOP_RADIUS: f32 = 100.0;
const DEFAULT_TIMESTOP_GROUPS: &[&str] = &["enemy", "projectile"];
const DEFAULT_EFFECT_DURATION: f32 = 0.5;
const DEFAULT_EFFECT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const DEFAULT_MAX_HEALTH: i32 = 10;
const DEFAULT_INVINCIBILITY: f32 = 1.5;
const DEFAULT_CONFIG_PATH: &str = "./recall.ini";

/// Recall ability configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RecallConfig {
    /// Length of the history window, and how far back a recall reaches.
    pub record_duration: f32,
    /// Length of the interpolated playback.
    pub recall_duration: f32,
    /// Lockout after a successful trigger.
    pub cooldown: f32,
    /// Real-time length of the time-stop.
    pub timestop_duration: f32,
    /// Global rate while the time-stop is active.
    pub timestop_scale: f32,
    /// Radius around the player in which bodies are pinned.
    pub timestop_radius: f32,
    /// Groups whose bodies are pinned.
    pub timestop_groups: Vec<String>,
    /// How long the trigger effect plays.
    pub effect_duration: f32,
    /// RGBA tint of the trigger effect.
    pub effect_color: [f32; 4],
    /// Player hit point cap.
    pub max_health: i32,
    /// Player invincibility window after a hit.
    pub invincibility: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for RecallConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RecallConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            record_duration: DEFAULT_RECORD_DURATION,
            recall_duration: DEFAULT_RECALL_DURATION,
            cooldown: DEFAULT_COOLDOWN,
            timestop_duration: DEFAULT_TIMESTOP_DURATION,
            timestop_scale: DEFAULT_TIMESTOP_SCALE,
            timestop_radius: DEFAULT_TIMESTOP_RADIUS,
            timestop_groups: DEFAULT_TIMESTOP_GROUPS
                .iter()
                .map(|g| g.to_string())
                .collect(),
            effect_duration: DEFAULT_EFFECT_DURATION,
            effect_color: DEFAULT_EFFECT_COLOR,
            max_health: DEFAULT_MAX_HEALTH,
            invincibility: DEFAULT_INVINCIBILITY,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config)?;

        info!(
            "Loaded recall config: window={}s, recall={}s, cooldown={}s, timestop={}s@{}x r={} groups={:?}",
            self.record_duration,
            self.recall_duration,
            self.cooldown,
            self.timestop_duration,
            self.timestop_scale,
            self.timestop_radius,
            self.timestop_groups
        );

        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config)
    }

    fn apply_ini(&mut self, config: &Ini) -> Result<(), String> {
        let float = |section: &str, key: &str| -> Result<Option<f32>, String> {
            config
                .getfloat(section, key)
                .map(|v| v.map(|f| f as f32))
                .map_err(|e| format!("[{}] {}: {}", section, key, e))
        };
        // Nothing is applied unless every key parses.
        let mut next = self.clone();

        // [recall] section
        if let Some(v) = float("recall", "record_duration")? {
            next.record_duration = v;
        }
        if let Some(v) = float("recall", "recall_duration")? {
            next.recall_duration = v;
        }
        if let Some(v) = float("recall", "cooldown")? {
            next.cooldown = v;
        }

        // [timestop] section
        if let Some(v) = float("timestop", "duration")? {
            next.timestop_duration = v;
        }
        if let Some(v) = float("timestop", "time_scale")? {
            next.timestop_scale = v;
        }
        if let Some(v) = float("timestop", "radius")? {
            next.timestop_radius = v;
        }
        if let Some(groups) = config.get("timestop", "groups") {
            next.timestop_groups = parse_list(&groups);
        }

        // [effect] section
        if let Some(v) = float("effect", "duration")? {
            next.effect_duration = v;
        }
        if let Some(color) = config.get("effect", "color") {
            next.effect_color = parse_color(&color)?;
        }

        // [player] section
        if let Some(v) = config
            .getint("player", "max_health")
            .map_err(|e| format!("[player] max_health: {}", e))?
        {
            next.max_health = i32::try_from(v)
                .map_err(|_| format!("[player] max_health: {} is out of range", v))?;
        }
        if let Some(v) = float("player", "invincibility")? {
            next.invincibility = v;
        }

        *self = next;
        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        self.to_ini()
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved recall config to {:?}", self.config_path);

        Ok(())
    }

    fn to_ini(&self) -> Ini {
        let mut config = Ini::new();

        config.set("recall", "record_duration", Some(self.record_duration.to_string()));
        config.set("recall", "recall_duration", Some(self.recall_duration.to_string()));
        config.set("recall", "cooldown", Some(self.cooldown.to_string()));

        config.set("timestop", "duration", Some(self.timestop_duration.to_string()));
        config.set("timestop", "time_scale", Some(self.timestop_scale.to_string()));
        config.set("timestop", "radius", Some(self.timestop_radius.to_string()));
        config.set("timestop", "groups", Some(self.timestop_groups.join(",")));

        config.set("effect", "duration", Some(self.effect_duration.to_string()));
        let color: Vec<String> = self.effect_color.iter().map(|c| c.to_string()).collect();
        config.set("effect", "color", Some(color.join(",")));

        config.set("player", "max_health", Some(self.max_health.to_string()));
        config.set("player", "invincibility", Some(self.invincibility.to_string()));

        config
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_color(value: &str) -> Result<[f32; 4], String> {
    let parts: Vec<f32> = value
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("[effect] color: {}", e))?;
    match parts.as_slice() {
        [r, g, b] => Ok([*r, *g, *b, 1.0]),
        [r, g, b, a] => Ok([*r, *g, *b, *a]),
        _ => Err(format!(
            "[effect] color: expected 3 or 4 components, got {}",
            parts.len()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_safe_startup() {
        let config = RecallConfig::new();
        assert_eq!(config.record_duration, 3.0);
        assert_eq!(config.recall_duration, 0.5);
        assert_eq!(config.cooldown, 10.0);
        assert_eq!(config.timestop_scale, 0.05);
        assert_eq!(config.timestop_groups, vec!["enemy", "projectile"]);
        assert_eq!(config.max_health, 10);
    }

    #[test]
    fn test_load_from_str_overrides_present_keys_only() {
        let mut config = RecallConfig::new();
        config
            .load_from_str(
                "[recall]\nrecord_duration = 5.0\n\n[timestop]\ngroups = enemy, turret\n\n[player]\nmax_health = 20\n",
            )
            .unwrap();
        assert_eq!(config.record_duration, 5.0);
        assert_eq!(config.recall_duration, 0.5);
        assert_eq!(config.timestop_groups, vec!["enemy", "turret"]);
        assert_eq!(config.max_health, 20);
    }

    #[test]
    fn test_bad_float_is_an_error() {
        let mut config = RecallConfig::new();
        let result = config.load_from_str("[recall]\nrecord_duration = 9.0\ncooldown = soon\n");
        assert!(result.is_err());
        // Keys parsed before the bad one are not kept either.
        assert_eq!(config, RecallConfig::new());
    }

    #[test]
    fn test_bad_color_leaves_config_untouched() {
        let mut config = RecallConfig::new();
        let result = config.load_from_str(
            "[timestop]\ngroups = turret\n\n[effect]\ncolor = red\n",
        );
        assert!(result.is_err());
        assert_eq!(config.timestop_groups, vec!["enemy", "projectile"]);
    }

    #[test]
    fn test_out_of_range_max_health_is_an_error() {
        let mut config = RecallConfig::new();
        let result = config.load_from_str("[player]\nmax_health = 4294967306\n");
        assert!(result.is_err());
        assert_eq!(config.max_health, 10);
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("1,0.5,0").unwrap(), [1.0, 0.5, 0.0, 1.0]);
        assert_eq!(parse_color("0.1, 0.2, 0.3, 0.4").unwrap(), [0.1, 0.2, 0.3, 0.4]);
        assert!(parse_color("1,2").is_err());
        assert!(parse_color("a,b,c").is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut config = RecallConfig::with_path("/nonexistent/recall.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config, RecallConfig::with_path("/nonexistent/recall.ini"));
    }

    #[test]
    fn test_save_then_load_file() {
        let path = std::env::temp_dir().join(format!("rewindengine-{}.ini", std::process::id()));
        let mut config = RecallConfig::with_path(&path);
        config.cooldown = 4.0;
        config.timestop_groups = vec!["projectile".to_string()];
        config.save_to_file().unwrap();

        let mut loaded = RecallConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.cooldown, 4.0);
        assert_eq!(loaded.timestop_groups, vec!["projectile"]);
    }
}
