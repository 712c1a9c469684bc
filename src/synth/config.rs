use std::error::Error;
use std::fmt;

/// Full parameter set for one generation run. Built once at startup from the
/// command line; nothing here changes while audio is being produced.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Tempo in beats per minute; the engine counts 4 beats per measure.
    pub bpm: f64,
    /// Carrier frequency of the first voice; voice `i` plays at
    /// `(i + 1) * base_frequency`.
    pub base_frequency: f64,
    /// Geometric volume reduction applied across successive voices.
    pub falloff: f64,
    /// Envelope decay rate, as the fraction of amplitude removed per second.
    pub decay: f64,
    /// Volume of the first voice.
    pub volume: f64,
    /// Modulator output level (FM depth).
    pub modulation: f64,
    /// Step count per measure for each voice slot. A zero entry disables its
    /// slot while later slots keep their positions (and so their pitches).
    pub divisions: Vec<u32>,
}

impl EngineConfig {
    /// The bright preset: first carrier at 200 Hz.
    pub fn classic() -> Self {
        Self {
            sample_rate: 48_000,
            bpm: 100.0,
            base_frequency: 200.0,
            falloff: 0.6,
            decay: 150.0,
            volume: 0.5,
            modulation: 0.2,
            divisions: Vec::new(),
        }
    }

    /// The lower-pitched preset: first carrier at 120 Hz, otherwise identical
    /// to `classic`.
    pub fn soft() -> Self {
        Self {
            base_frequency: 120.0,
            ..Self::classic()
        }
    }

    /// Rejects configurations the generation loop is not prepared to handle.
    /// Called once before any audio starts; the render path itself has no
    /// failure modes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 {
            return Err(ConfigError::InvalidSampleRate);
        }
        if !(self.bpm > 0.0) {
            return Err(ConfigError::InvalidBpm);
        }
        if !self.divisions.iter().any(|&d| d != 0) {
            return Err(ConfigError::NoDivisions);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::classic()
    }
}

/// Startup-time configuration failures. Reported once to the user; the
/// process exits non-zero before any generation begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidSampleRate,
    InvalidBpm,
    NoDivisions,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSampleRate => write!(f, "sample rate must be greater than zero"),
            ConfigError::InvalidBpm => write!(f, "bpm must be greater than zero"),
            ConfigError::NoDivisions => {
                write!(f, "at least one non-zero division is required")
            }
        }
    }
}

impl Error for ConfigError {}
