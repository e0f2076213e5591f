use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Simulation tuning loaded from `thingy.toml`.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PetTuning {
    pub motion: MotionTuning,
    pub happiness: HappinessTuning,
    pub hunger: HungerTuning,
    pub clips: ClipNames,
}

/// How the pet walks toward its target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionTuning {
    /// Distance covered per millisecond of tick time.
    pub speed_px_per_ms: f32,
    /// Closer than this to the target counts as arrived.
    pub arrive_epsilon: f32,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            speed_px_per_ms: 0.03,
            arrive_epsilon: 1.0,
        }
    }
}

/// Happiness rates (per millisecond) and mood band edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HappinessTuning {
    /// Size of the comfort rectangle relative to the viewport, about its centre.
    pub comfort_fraction: f32,
    pub outside_decay_per_ms: f32,
    pub inside_recovery_per_ms: f32,
    /// Extra decay while hunger is below `hunger.starving_below`.
    pub starving_decay_per_ms: f32,
    /// Extra decay otherwise.
    pub fed_decay_per_ms: f32,
    /// Happiness below this is the low (angry) band.
    pub low_band: f32,
    /// Happiness above this is the high (happy) band.
    pub high_band: f32,
}

impl Default for HappinessTuning {
    fn default() -> Self {
        Self {
            comfort_fraction: 1.0,
            outside_decay_per_ms: 0.01,
            inside_recovery_per_ms: 0.002,
            starving_decay_per_ms: 0.003,
            fed_decay_per_ms: 0.000_01,
            low_band: 0.25,
            high_band: 0.75,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HungerTuning {
    pub decay_per_ms: f32,
    /// Hunger below this accelerates unhappiness.
    pub starving_below: f32,
    /// Added to hunger when a feeding sequence completes.
    pub feed_bonus: f32,
}

impl Default for HungerTuning {
    fn default() -> Self {
        Self {
            decay_per_ms: 0.000_02,
            starving_below: 0.2,
            feed_bonus: 0.2,
        }
    }
}

/// Sheet tag names the pet relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClipNames {
    /// Idle clips are named `{idle_prefix}_{left|right}[_happy|_angry]`.
    pub idle_prefix: String,
    pub eat: String,
}

impl Default for ClipNames {
    fn default() -> Self {
        Self {
            idle_prefix: "bounce".to_string(),
            eat: "eat".to_string(),
        }
    }
}

impl PetTuning {
    /// Parse and validate tuning TOML.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let tuning: Self = toml::from_str(input).context("failed to parse tuning TOML")?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate tuning from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read tuning file at {}", path.display()))?;

        Self::from_toml_str(&raw)
            .with_context(|| format!("invalid tuning file at {}", path.display()))
    }

    /// Validate ranges and names.
    pub fn validate(&self) -> Result<()> {
        validate_positive("motion.speed_px_per_ms", self.motion.speed_px_per_ms)?;
        validate_positive("motion.arrive_epsilon", self.motion.arrive_epsilon)?;

        let h = &self.happiness;
        validate_positive("happiness.comfort_fraction", h.comfort_fraction)?;
        validate_rate("happiness.outside_decay_per_ms", h.outside_decay_per_ms)?;
        validate_rate("happiness.inside_recovery_per_ms", h.inside_recovery_per_ms)?;
        validate_rate("happiness.starving_decay_per_ms", h.starving_decay_per_ms)?;
        validate_rate("happiness.fed_decay_per_ms", h.fed_decay_per_ms)?;
        if !(h.low_band > 0.0 && h.low_band < h.high_band && h.high_band < 1.0) {
            bail!(
                "happiness bands must satisfy 0 < low_band < high_band < 1 (got {} and {})",
                h.low_band,
                h.high_band
            );
        }

        validate_rate("hunger.decay_per_ms", self.hunger.decay_per_ms)?;
        if !(0.0..=1.0).contains(&self.hunger.starving_below) {
            bail!(
                "hunger.starving_below must be within [0, 1] (got {})",
                self.hunger.starving_below
            );
        }
        if !(self.hunger.feed_bonus > 0.0 && self.hunger.feed_bonus <= 1.0) {
            bail!(
                "hunger.feed_bonus must be within (0, 1] (got {})",
                self.hunger.feed_bonus
            );
        }

        validate_name("clips.idle_prefix", &self.clips.idle_prefix)?;
        validate_name("clips.eat", &self.clips.eat)?;

        Ok(())
    }
}

fn validate_rate(field: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        bail!("{field} must be a finite, non-negative number (got {value})");
    }
    Ok(())
}

fn validate_positive(field: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        bail!("{field} must be a finite, positive number (got {value})");
    }
    Ok(())
}

fn validate_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        bail!("{field} must not be empty");
    }
    if value.trim() != value {
        bail!("{field} {:?} has leading/trailing whitespace", value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
[motion]
speed_px_per_ms = 0.05
arrive_epsilon = 2.0

[happiness]
comfort_fraction = 0.8
outside_decay_per_ms = 0.004
inside_recovery_per_ms = 0.001
starving_decay_per_ms = 0.002
fed_decay_per_ms = 0.0
low_band = 0.3
high_band = 0.7

[hunger]
decay_per_ms = 0.0001
starving_below = 0.1
feed_bonus = 0.5

[clips]
idle_prefix = "hop"
eat = "munch"
"#;

    #[test]
    fn empty_file_yields_defaults() {
        let tuning = PetTuning::from_toml_str("").unwrap();
        assert_eq!(tuning, PetTuning::default());
        assert_eq!(tuning.clips.idle_prefix, "bounce");
        assert_eq!(tuning.hunger.feed_bonus, 0.2);
    }

    #[test]
    fn parses_full_file() {
        let tuning = PetTuning::from_toml_str(FULL).unwrap();
        assert_eq!(tuning.motion.speed_px_per_ms, 0.05);
        assert_eq!(tuning.happiness.low_band, 0.3);
        assert_eq!(tuning.hunger.feed_bonus, 0.5);
        assert_eq!(tuning.clips.eat, "munch");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let tuning = PetTuning::from_toml_str("[hunger]\nfeed_bonus = 0.4\n").unwrap();
        assert_eq!(tuning.hunger.feed_bonus, 0.4);
        assert_eq!(tuning.hunger.starving_below, 0.2);
        assert_eq!(tuning.motion, MotionTuning::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = PetTuning::from_toml_str("[motion]\nwarp = 9\n")
            .unwrap_err()
            .to_string();
        assert!(err.contains("failed to parse tuning TOML"));
    }

    #[test]
    fn inverted_bands_are_rejected() {
        let raw = FULL.replace("low_band = 0.3", "low_band = 0.9");
        let err = PetTuning::from_toml_str(&raw).unwrap_err().to_string();
        assert!(err.contains("0 < low_band < high_band < 1"));
    }

    #[test]
    fn negative_rate_is_rejected() {
        let raw = FULL.replace("decay_per_ms = 0.0001", "decay_per_ms = -1.0");
        let err = PetTuning::from_toml_str(&raw).unwrap_err().to_string();
        assert!(err.contains("hunger.decay_per_ms"));
    }

    #[test]
    fn zero_speed_is_rejected() {
        let raw = FULL.replace("speed_px_per_ms = 0.05", "speed_px_per_ms = 0.0");
        let err = PetTuning::from_toml_str(&raw).unwrap_err().to_string();
        assert!(err.contains("motion.speed_px_per_ms"));
    }

    #[test]
    fn padded_clip_name_is_rejected() {
        let raw = FULL.replace("eat = \"munch\"", "eat = \" munch\"");
        let err = PetTuning::from_toml_str(&raw).unwrap_err().to_string();
        assert!(err.contains("clips.eat"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = PetTuning::from_path(Path::new("/no/such/thingy.toml"))
            .unwrap_err()
            .to_string();
        assert!(err.contains("/no/such/thingy.toml"));
    }
}
