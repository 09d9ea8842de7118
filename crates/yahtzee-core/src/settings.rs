use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DiceColor {
    #[default]
    White,
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

/// How long dice take to settle after a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DiceVelocity {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl DiceVelocity {
    pub fn settle_delay(&self) -> Duration {
        match self {
            DiceVelocity::Slow => Duration::from_millis(1000),
            DiceVelocity::Medium => Duration::from_millis(500),
            DiceVelocity::Fast => Duration::ZERO,
        }
    }

    /// Only slow dice get the full three-dimensional treatment.
    pub fn fast_dice(&self) -> bool {
        *self != DiceVelocity::Slow
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub dark_theme: bool,
    pub sound_enabled: bool,
    pub dice_color: DiceColor,
    pub dice_velocity: DiceVelocity,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_theme: false,
            sound_enabled: true,
            dice_color: DiceColor::default(),
            dice_velocity: DiceVelocity::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseSettingError {
    kind: &'static str,
    value: String,
}

impl FromStr for DiceColor {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "white" => Ok(DiceColor::White),
            "red" => Ok(DiceColor::Red),
            "blue" => Ok(DiceColor::Blue),
            "green" => Ok(DiceColor::Green),
            "yellow" => Ok(DiceColor::Yellow),
            "purple" => Ok(DiceColor::Purple),
            _ => Err(ParseSettingError {
                kind: "dice color",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for DiceVelocity {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "slow" => Ok(DiceVelocity::Slow),
            "medium" => Ok(DiceVelocity::Medium),
            "fast" => Ok(DiceVelocity::Fast),
            _ => Err(ParseSettingError {
                kind: "dice velocity",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(!settings.dark_theme);
        assert!(settings.sound_enabled);
        assert_eq!(settings.dice_color, DiceColor::White);
        assert_eq!(settings.dice_velocity, DiceVelocity::Medium);
    }

    #[test]
    fn test_velocity_delays() {
        assert_eq!(DiceVelocity::Slow.settle_delay(), Duration::from_millis(1000));
        assert_eq!(DiceVelocity::Medium.settle_delay(), Duration::from_millis(500));
        assert_eq!(DiceVelocity::Fast.settle_delay(), Duration::ZERO);
        assert!(!DiceVelocity::Slow.fast_dice());
        assert!(DiceVelocity::Fast.fast_dice());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Blue".parse::<DiceColor>().unwrap(), DiceColor::Blue);
        assert_eq!("fast".parse::<DiceVelocity>().unwrap(), DiceVelocity::Fast);
        assert!("teal".parse::<DiceColor>().is_err());
        assert!("warp".parse::<DiceVelocity>().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"dark_theme":true}"#).unwrap();
        assert!(settings.dark_theme);
        assert!(settings.sound_enabled);
        assert_eq!(settings.dice_velocity, DiceVelocity::Medium);
    }

    #[test]
    fn test_settings_round_trip() {
        let settings = Settings {
            dark_theme: true,
            sound_enabled: false,
            dice_color: DiceColor::Purple,
            dice_velocity: DiceVelocity::Slow,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
