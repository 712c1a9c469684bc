use super::config::{ConfigError, EngineConfig};
use super::operator::Operator;
use super::sequencer::Sequencer;
use super::voice::Voice;

/// Modulator frequency relative to its carrier. Slightly inharmonic on
/// purpose: it gives the click its metallic edge.
const MODULATOR_RATIO: f64 = 1.583;

/// The mixer/clock at the root of the synthesis core. Owns every sequencer,
/// advances the shared measure phase once per sample, sums the voices and
/// clamps the result to [-1, 1].
///
/// State is mutated only by `render`; the engine assumes exactly one caller
/// at a time (the output adapters uphold this, either by owning the engine
/// outright or behind a mutex).
pub struct Engine {
    sequencers: Vec<Sequencer>,
    measure_phase: f64,
    phase_increment: f64,
    sample_rate: u32,
}

impl Engine {
    /// Builds the sequencer bank from a validated configuration.
    ///
    /// Voice slot `i` gets a carrier at `(i + 1) * base_frequency` and a
    /// modulator at that frequency times `MODULATOR_RATIO`, decaying twice as
    /// fast as the carrier. A zero division entry disables its slot but keeps
    /// later slots at their positions, so their pitches do not shift. The
    /// running volume is reduced by `falloff` after each voice actually
    /// created.
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut volume = config.volume;
        let mut sequencers = Vec::with_capacity(config.divisions.len());
        for (i, &divisions) in config.divisions.iter().enumerate() {
            if divisions == 0 {
                continue;
            }
            let carrier_frequency = (i + 1) as f64 * config.base_frequency;
            let voice = Voice::new(
                Operator::new(
                    carrier_frequency * MODULATOR_RATIO,
                    config.modulation,
                    config.decay * 2.0,
                ),
                Operator::new(carrier_frequency, volume, config.decay),
            );
            sequencers.push(Sequencer::new(divisions, voice));
            volume *= config.falloff;
        }

        // 4 beats per measure: one measure spans 240 / bpm seconds.
        let phase_increment = (config.bpm / 240.0) / f64::from(config.sample_rate);

        Ok(Self {
            sequencers,
            measure_phase: 0.0,
            phase_increment,
            sample_rate: config.sample_rate,
        })
    }

    /// Fills `output` with the next run of mono samples. Every sequencer is
    /// ticked at the current measure phase before the phase advances, so the
    /// produced stream is independent of how the host chunks its requests.
    ///
    /// Allocation-free and infallible: safe to call from an audio callback.
    pub fn render(&mut self, output: &mut [f32]) {
        let sample_rate = f64::from(self.sample_rate);
        for sample in output.iter_mut() {
            let mut out = 0.0;
            for sequencer in self.sequencers.iter_mut() {
                out += sequencer.tick(self.measure_phase, sample_rate);
            }
            *sample = out.clamp(-1.0, 1.0) as f32;
            self.measure_phase = (self.measure_phase + self.phase_increment).fract();
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Position within the current measure, always in [0, 1).
    pub fn measure_phase(&self) -> f64 {
        self.measure_phase
    }

    pub fn sequencers(&self) -> &[Sequencer] {
        &self.sequencers
    }
}
