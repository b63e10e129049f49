//! Analysis result types

use crate::features::onset::OnsetSet;
use crate::features::tempo::{TempoEstimate, TempoStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

// Position k on the numerical wheel holds these pitch classes (up a fifth per step)
const WHEEL_MAJOR: [u32; 12] = [0, 7, 2, 9, 4, 11, 6, 1, 8, 3, 10, 5];
const WHEEL_MINOR: [u32; 12] = [9, 4, 11, 6, 1, 8, 3, 10, 5, 0, 7, 2];

/// Tonal mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Major mode
    Major,
    /// Minor mode
    Minor,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Major => f.write_str("major"),
            Mode::Minor => f.write_str("minor"),
        }
    }
}

/// Musical key: tonic pitch class (0 = C, 1 = C#, ..., 11 = B) and mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Major key
    Major(u32),
    /// Minor key
    Minor(u32),
}

impl Key {
    /// Build a key from a tonic pitch class (taken modulo 12) and a mode
    pub fn new(tonic: u32, mode: Mode) -> Self {
        match mode {
            Mode::Major => Key::Major(tonic % 12),
            Mode::Minor => Key::Minor(tonic % 12),
        }
    }

    /// Tonic pitch class, 0 = C
    pub fn tonic(&self) -> u32 {
        match self {
            Key::Major(i) | Key::Minor(i) => i % 12,
        }
    }

    /// Major or minor
    pub fn mode(&self) -> Mode {
        match self {
            Key::Major(_) => Mode::Major,
            Key::Minor(_) => Mode::Minor,
        }
    }

    /// Name of the tonic note (e.g. "C", "F#")
    pub fn tonic_name(&self) -> &'static str {
        NOTE_NAMES[self.tonic() as usize]
    }

    /// Short key name: note for major, note + "m" for minor
    ///
    /// # Example
    ///
    /// ```
    /// use composer_dsp::analysis::result::Key;
    ///
    /// assert_eq!(Key::Major(6).name(), "F#");
    /// assert_eq!(Key::Minor(9).name(), "Am");
    /// ```
    pub fn name(&self) -> String {
        match self.mode() {
            Mode::Major => self.tonic_name().to_string(),
            Mode::Minor => format!("{}m", self.tonic_name()),
        }
    }

    /// Wheel notation used by DJ software: "1A".."12A" for major, "1B".."12B" for minor
    ///
    /// Neighbouring numbers are a fifth apart; equal numbers are relative keys.
    ///
    /// ```
    /// use composer_dsp::analysis::result::Key;
    ///
    /// assert_eq!(Key::Major(0).numerical(), "1A");
    /// assert_eq!(Key::Minor(9).numerical(), "1B");
    /// ```
    pub fn numerical(&self) -> String {
        let (wheel, suffix) = match self.mode() {
            Mode::Major => (&WHEEL_MAJOR, 'A'),
            Mode::Minor => (&WHEEL_MINOR, 'B'),
        };
        let tonic = self.tonic();
        let position = wheel.iter().position(|&pc| pc == tonic).unwrap_or(0);
        format!("{}{}", position + 1, suffix)
    }

    /// Parse wheel notation back into a key; `None` for anything malformed
    pub fn from_numerical(notation: &str) -> Option<Self> {
        let suffix = notation.chars().last()?;
        let number: usize = notation[..notation.len() - suffix.len_utf8()].parse().ok()?;
        if !(1..=12).contains(&number) {
            return None;
        }
        match suffix {
            'A' => Some(Key::Major(WHEEL_MAJOR[number - 1])),
            'B' => Some(Key::Minor(WHEEL_MINOR[number - 1])),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic_name(), self.mode())
    }
}

/// Output of the tempo facade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TempoAnalysis {
    /// Estimated tempo
    pub bpm: TempoEstimate,

    /// Strategy that produced the estimate
    pub strategy: TempoStrategy,

    /// Onsets the estimate was computed from
    pub onset_times: OnsetSet,
}

/// Combined tempo and key analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Tempo estimate
    pub bpm: TempoEstimate,

    /// Detected key
    pub key: Key,

    /// Key confidence: best correlation score / 12 × 100 (not clamped)
    pub key_confidence: f32,

    /// Detected onsets in seconds
    pub onset_times: OnsetSet,

    /// Analysis metadata
    pub metadata: AnalysisMetadata,
}

/// Analysis metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Audio duration in seconds
    pub duration_seconds: f32,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Processing time in milliseconds
    pub processing_time_ms: f32,

    /// Crate version that produced the result
    pub algorithm_version: String,

    /// Tempo strategy used
    pub tempo_strategy: TempoStrategy,

    /// Number of detected onsets
    pub onset_count: usize,
}
