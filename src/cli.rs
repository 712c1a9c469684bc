//! Command-line argument parsing.

use clap::{Parser, ValueEnum};

use crate::synth::EngineConfig;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "polymetronome")]
#[command(
    about = "Plays one or more metronome voices at the given divisions of the measure",
    long_about = None
)]
pub struct Args {
    /// Steps per measure, one metronome voice per entry. An entry that does
    /// not parse as a positive integer disables its slot.
    #[arg(value_name = "DIVISION", required = true)]
    pub divisions: Vec<String>,

    /// Sample rate in Hz
    #[arg(short = 'r', long, value_name = "HZ")]
    pub sample_rate: Option<u32>,

    /// Tempo in beats per minute (4 beats per measure)
    #[arg(short, long)]
    pub bpm: Option<f64>,

    /// Carrier frequency of the first voice in Hz
    #[arg(short = 'f', long, value_name = "HZ")]
    pub base_freq: Option<f64>,

    /// Per-voice volume falloff factor
    #[arg(short = 'a', long)]
    pub falloff: Option<f64>,

    /// Envelope decay rate (fraction of amplitude removed per second)
    #[arg(short, long)]
    pub decay: Option<f64>,

    /// Volume of the first voice
    #[arg(short, long)]
    pub volume: Option<f64>,

    /// Modulation depth
    #[arg(short, long)]
    pub modulation: Option<f64>,

    /// Parameter preset; individual flags override its values
    #[arg(short, long, value_enum, default_value_t = Preset::Classic)]
    pub preset: Preset,

    /// Where the samples go: a live output device, or raw little-endian f32
    /// frames on stdout
    #[arg(short, long, value_enum, default_value_t = OutputMode::Play)]
    pub output: OutputMode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// First carrier at 200 Hz
    Classic,
    /// First carrier at 120 Hz
    Soft,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Low-latency playback on the default audio device
    Play,
    /// Raw sample stream on stdout
    Stream,
}

impl Args {
    /// Resolves the preset plus any overriding flags into an engine
    /// configuration. Division entries are validated here; the engine
    /// validates everything else.
    pub fn engine_config(&self) -> EngineConfig {
        let mut config = match self.preset {
            Preset::Classic => EngineConfig::classic(),
            Preset::Soft => EngineConfig::soft(),
        };

        if let Some(sample_rate) = self.sample_rate {
            config.sample_rate = sample_rate;
        }
        if let Some(bpm) = self.bpm {
            config.bpm = bpm;
        }
        if let Some(base_freq) = self.base_freq {
            config.base_frequency = base_freq;
        }
        if let Some(falloff) = self.falloff {
            config.falloff = falloff;
        }
        if let Some(decay) = self.decay {
            config.decay = decay;
        }
        if let Some(volume) = self.volume {
            config.volume = volume;
        }
        if let Some(modulation) = self.modulation {
            config.modulation = modulation;
        }
        config.divisions = self.parse_divisions();
        config
    }

    /// Maps each division entry to a step count, turning unparseable entries
    /// into disabled slots so the remaining voices keep their positions.
    fn parse_divisions(&self) -> Vec<u32> {
        self.divisions
            .iter()
            .map(|entry| match entry.parse::<u32>() {
                Ok(steps) => steps,
                Err(_) => {
                    eprintln!("warning: skipping division '{}': not a whole number", entry);
                    0
                }
            })
            .collect()
    }
}
