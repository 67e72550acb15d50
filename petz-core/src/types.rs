//! Core type definitions for the PETZ engine.
//!
//! [`PetState`] is the canonical, fully-bounded companion snapshot.
//! [`RawState`] is the tolerant partial record that arrives from storage or
//! from another process; it never fails to deserialize.
//! [`FinalizedState`] is what every public engine operation returns.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

// ---------------------------------------------------------------------------
// Bounds & baseline
// ---------------------------------------------------------------------------

/// Lower bound of every bounded stat.
pub const STAT_MIN: f64 = 0.0;
/// Upper bound of every bounded stat.
pub const STAT_MAX: f64 = 100.0;

/// Clamp a stat into `[STAT_MIN, STAT_MAX]`.
#[must_use]
pub fn clamp_stat(value: f64) -> f64 {
    value.clamp(STAT_MIN, STAT_MAX)
}

/// Baseline satiation for a fresh companion.
pub const DEFAULT_SATIATION: f64 = 80.0;
/// Baseline mood.
pub const DEFAULT_MOOD: f64 = 70.0;
/// Baseline cleanliness.
pub const DEFAULT_CLEANLINESS: f64 = 90.0;
/// Baseline energy.
pub const DEFAULT_ENERGY: f64 = 85.0;
/// Baseline health.
pub const DEFAULT_HEALTH: f64 = 95.0;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Activity status of the companion. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetStatus {
    /// Idle; needs decay every tick.
    #[default]
    Normal,
    /// Eating a meal for `eating_duration` ticks.
    Eating,
    /// Playing for `playing_progress` ticks.
    Playing,
    /// Asleep; recovers energy until the wake threshold.
    Sleeping,
    /// Looking for food on its own until satiation recovers.
    Foraging,
}

impl PetStatus {
    /// Every status, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Normal,
        Self::Eating,
        Self::Playing,
        Self::Sleeping,
        Self::Foraging,
    ];

    /// Wire name of the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Eating => "eating",
            Self::Playing => "playing",
            Self::Sleeping => "sleeping",
            Self::Foraging => "foraging",
        }
    }

    /// Parse a wire name. Returns `None` for anything that is not an exact match.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

impl fmt::Display for PetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Horizontal facing direction, owned by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Facing left.
    Left,
    /// Facing right.
    #[default]
    Right,
}

impl Direction {
    /// Wire name of the direction.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Parse a wire name. Returns `None` for anything other than `left` / `right`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Qualitative mood derived from satiation and energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodLabel {
    /// Very well fed and full of energy.
    Ecstatic,
    /// Well fed and energetic.
    Joyful,
    /// Nothing notable.
    Neutral,
    /// Hungry but still has energy to fidget.
    Restless,
    /// Very hungry and low on energy.
    Anxious,
    /// Out of energy.
    Exhausted,
}

impl MoodLabel {
    /// Wire name of the label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ecstatic => "ecstatic",
            Self::Joyful => "joyful",
            Self::Neutral => "neutral",
            Self::Restless => "restless",
            Self::Anxious => "anxious",
            Self::Exhausted => "exhausted",
        }
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Canonical state
// ---------------------------------------------------------------------------

/// The canonical companion snapshot.
///
/// Values of this type are always in range when produced by the engine.
/// The engine never mutates a caller's value; every operation returns a
/// successor.
///
/// `satiation` is "more fed = higher": it falls over time and rises when fed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetState {
    /// How fed the companion is, `[0, 100]`.
    pub satiation: f64,
    /// Numeric mood, `[0, 100]`.
    pub mood: f64,
    /// Cleanliness, `[0, 100]`.
    pub cleanliness: f64,
    /// Energy, `[0, 100]`.
    pub energy: f64,
    /// Health, `[0, 100]`.
    pub health: f64,
    /// Experience towards the next level, `>= 0`.
    pub exp: f64,
    /// Current level, `>= 1`.
    pub level: u32,
    /// Current activity status.
    pub status: PetStatus,
    /// Facing direction.
    pub direction: Direction,
    /// Whether the window lets mouse events through. Caller-owned.
    pub pass_through: bool,
    /// Remaining digestion after a meal, `[0, 100]`.
    pub feeding_progress: f64,
    /// Remaining play ticks.
    pub playing_progress: u32,
    /// Remaining eating ticks.
    pub eating_duration: u32,
}

impl Default for PetState {
    fn default() -> Self {
        Self {
            satiation: DEFAULT_SATIATION,
            mood: DEFAULT_MOOD,
            cleanliness: DEFAULT_CLEANLINESS,
            energy: DEFAULT_ENERGY,
            health: DEFAULT_HEALTH,
            exp: 0.0,
            level: 1,
            status: PetStatus::Normal,
            direction: Direction::Right,
            pass_through: false,
            feeding_progress: 0.0,
            playing_progress: 0,
            eating_duration: 0,
        }
    }
}

/// A canonical state with a freshly derived mood label attached.
///
/// Serializes as the flat state record plus a `derivedMood` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizedState {
    /// The canonical state.
    #[serde(flatten)]
    pub state: PetState,
    /// Mood label computed from `state`.
    pub derived_mood: MoodLabel,
}

impl FinalizedState {
    /// Drop the derived label and keep the canonical state.
    #[must_use]
    pub fn into_state(self) -> PetState {
        self.state
    }

    /// Encode as a single JSON object.
    ///
    /// # Errors
    /// Returns `PetzError::Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// ---------------------------------------------------------------------------
// Raw (partial) state
// ---------------------------------------------------------------------------

/// A partial, possibly malformed state record.
///
/// Every field is optional. Deserialization accepts any JSON value and
/// never fails: wrong-typed fields simply read as missing. `passThrough`
/// follows loose truthiness (`0`, `""`, `null` and `false` are false,
/// everything else is true). The legacy key `hunger` is read as
/// `satiation` when `satiation` is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawState {
    /// Satiation, if present and numeric.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub satiation: Option<f64>,
    /// Mood, if present and numeric.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<f64>,
    /// Cleanliness, if present and numeric.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanliness: Option<f64>,
    /// Energy, if present and numeric.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    /// Health, if present and numeric.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<f64>,
    /// Experience, if present and numeric.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<f64>,
    /// Level, if present and numeric.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<f64>,
    /// Status name, if present and a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Direction name, if present and a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    /// Pass-through flag after truthiness coercion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_through: Option<bool>,
    /// Feeding progress, if present and numeric.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feeding_progress: Option<f64>,
    /// Playing progress, if present and numeric.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playing_progress: Option<f64>,
    /// Eating duration, if present and numeric.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eating_duration: Option<f64>,
}

impl RawState {
    /// Read a raw record out of an arbitrary JSON value.
    ///
    /// Non-object values yield an empty record.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };

        Self {
            satiation: number(map, "satiation").or_else(|| {
                if map.contains_key("satiation") {
                    None
                } else {
                    number(map, "hunger")
                }
            }),
            mood: number(map, "mood"),
            cleanliness: number(map, "cleanliness"),
            energy: number(map, "energy"),
            health: number(map, "health"),
            exp: number(map, "exp"),
            level: number(map, "level"),
            status: string(map, "status"),
            direction: string(map, "direction"),
            pass_through: map.get("passThrough").map(truthy),
            feeding_progress: number(map, "feedingProgress"),
            playing_progress: number(map, "playingProgress"),
            eating_duration: number(map, "eatingDuration"),
        }
    }

    /// Parse a raw record from JSON text.
    ///
    /// # Errors
    /// Returns `PetzError::Serialization` only if `json` is not valid JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value))
    }
}

impl<'de> Deserialize<'de> for RawState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

impl From<&PetState> for RawState {
    fn from(s: &PetState) -> Self {
        Self {
            satiation: Some(s.satiation),
            mood: Some(s.mood),
            cleanliness: Some(s.cleanliness),
            energy: Some(s.energy),
            health: Some(s.health),
            exp: Some(s.exp),
            level: Some(f64::from(s.level)),
            status: Some(s.status.as_str().to_string()),
            direction: Some(s.direction.as_str().to_string()),
            pass_through: Some(s.pass_through),
            feeding_progress: Some(s.feeding_progress),
            playing_progress: Some(f64::from(s.playing_progress)),
            eating_duration: Some(f64::from(s.eating_duration)),
        }
    }
}

impl From<PetState> for RawState {
    fn from(s: PetState) -> Self {
        Self::from(&s)
    }
}

impl From<&FinalizedState> for RawState {
    fn from(f: &FinalizedState) -> Self {
        Self::from(&f.state)
    }
}

fn number(map: &Map<String, Value>, key: &str) -> Option<f64> {
    map.get(key).and_then(Value::as_f64)
}

fn string(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn baseline_matches_documented_defaults() {
        let s = PetState::default();
        assert_eq!(s.satiation, 80.0);
        assert_eq!(s.mood, 70.0);
        assert_eq!(s.cleanliness, 90.0);
        assert_eq!(s.energy, 85.0);
        assert_eq!(s.health, 95.0);
        assert_eq!(s.level, 1);
        assert_eq!(s.status, PetStatus::Normal);
        assert_eq!(s.direction, Direction::Right);
        assert!(!s.pass_through);
    }

    #[test]
    fn raw_state_ignores_wrong_types() {
        let raw = RawState::from_value(&json!({
            "satiation": "lots",
            "mood": 12,
            "status": 7,
            "direction": "left",
        }));
        assert_eq!(raw.satiation, None);
        assert_eq!(raw.mood, Some(12.0));
        assert_eq!(raw.status, None);
        assert_eq!(raw.direction.as_deref(), Some("left"));
    }

    #[test]
    fn raw_state_from_non_object_is_empty() {
        assert_eq!(RawState::from_value(&json!([1, 2, 3])), RawState::default());
        assert_eq!(RawState::from_value(&Value::Null), RawState::default());
    }

    #[test]
    fn legacy_hunger_key_fills_satiation() {
        let raw = RawState::from_value(&json!({ "hunger": 33 }));
        assert_eq!(raw.satiation, Some(33.0));

        let both = RawState::from_value(&json!({ "hunger": 33, "satiation": 60 }));
        assert_eq!(both.satiation, Some(60.0));

        // A present-but-broken satiation does not fall back to hunger.
        let broken = RawState::from_value(&json!({ "hunger": 33, "satiation": null }));
        assert_eq!(broken.satiation, None);
    }

    #[test]
    fn pass_through_truthiness() {
        let cases = [
            (json!(true), true),
            (json!(false), false),
            (json!(0), false),
            (json!(1), true),
            (json!(""), false),
            (json!("false"), true),
            (json!(null), false),
            (json!({}), true),
        ];
        for (value, expected) in cases {
            let raw = RawState::from_value(&json!({ "passThrough": value }));
            assert_eq!(raw.pass_through, Some(expected), "value {value}");
        }
    }

    #[test]
    fn raw_state_deserialize_never_fails() {
        let raw: RawState = serde_json::from_str(r#""just a string""#).expect("deserialize");
        assert_eq!(raw, RawState::default());
        assert!(RawState::from_json("{not json").is_err());
    }

    #[test]
    fn finalized_state_serializes_flat_camel_case() {
        let f = FinalizedState {
            state: PetState::default(),
            derived_mood: MoodLabel::Joyful,
        };
        let value = serde_json::to_value(&f).expect("serialize");
        assert_eq!(value["satiation"], json!(80.0));
        assert_eq!(value["passThrough"], json!(false));
        assert_eq!(value["feedingProgress"], json!(0.0));
        assert_eq!(value["status"], json!("normal"));
        assert_eq!(value["derivedMood"], json!("joyful"));
        assert!(value.get("state").is_none());
    }

    #[test]
    fn status_parse_is_exact() {
        for status in PetStatus::ALL {
            assert_eq!(PetStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(PetStatus::parse("Sleeping"), None);
        assert_eq!(PetStatus::parse("dancing"), None);
    }
}
