use std::f64::consts::TAU;

/// A phase-accumulating sine oscillator with an exponentially decaying
/// amplitude envelope. Two of these wired together form a `Voice`.
///
/// State advances in f64: phase error in single precision becomes audible as
/// pitch drift once a stream runs for more than a few minutes.
#[derive(Debug, Clone)]
pub struct Operator {
    /// Oscillation rate in Hz.
    pub frequency: f64,
    /// Static output scaling applied on top of the envelope.
    pub level: f64,
    /// Envelope decay rate, expressed as the fraction of amplitude removed
    /// per second and applied multiplicatively each sample.
    pub decay: f64,
    phase: f64,
    amplitude: f64,
}

impl Operator {
    /// Creates a silent operator. The envelope starts at zero, so nothing is
    /// heard until the first `trigger`.
    pub fn new(frequency: f64, level: f64, decay: f64) -> Self {
        Self {
            frequency,
            level,
            decay,
            phase: 0.0,
            amplitude: 0.0,
        }
    }

    /// Produces one sample and advances the oscillator state.
    ///
    /// `offset` is added to the phase argument before the sine is taken,
    /// which is how a modulator bends this operator's output. The returned
    /// sample is computed from the state *before* the envelope decay and
    /// phase increment are applied.
    ///
    /// `sample_rate` must be positive; the engine validates it once at
    /// configuration time.
    pub fn tick(&mut self, offset: f64, sample_rate: f64) -> f64 {
        let out = self.level * self.amplitude * (TAU * (self.phase + offset)).sin();
        self.amplitude *= 1.0 - self.decay / sample_rate;
        self.phase = (self.phase + self.frequency / sample_rate).fract();
        out
    }

    /// Restarts the envelope and phase for a fresh click.
    pub fn trigger(&mut self) {
        self.amplitude = 1.0;
        self.phase = 0.0;
    }

    /// Current fractional position in the cycle, always in [0, 1).
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Current envelope value. Non-increasing between triggers.
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f64 = 48_000.0;

    #[test]
    fn silent_until_triggered() {
        let mut op = Operator::new(440.0, 1.0, 150.0);
        for _ in 0..64 {
            assert_eq!(op.tick(0.0, SAMPLE_RATE), 0.0);
        }
    }

    #[test]
    fn trigger_resets_envelope_and_phase() {
        let mut op = Operator::new(440.0, 1.0, 150.0);
        op.trigger();
        for _ in 0..1000 {
            op.tick(0.0, SAMPLE_RATE);
        }
        op.trigger();
        assert_eq!(op.amplitude(), 1.0);
        assert_eq!(op.phase(), 0.0);
    }

    #[test]
    fn first_sample_uses_pre_decay_state() {
        let mut op = Operator::new(440.0, 0.8, 150.0);
        op.trigger();
        // phase 0, amplitude 1.0: the sample is level * sin(0) = 0, and the
        // decay only shows up from the second sample on.
        assert_eq!(op.tick(0.0, SAMPLE_RATE), 0.0);
        assert_eq!(op.amplitude(), 1.0 - 150.0 / SAMPLE_RATE);
    }

    #[test]
    fn phase_stays_in_unit_interval() {
        let mut op = Operator::new(12_345.6, 1.0, 0.0);
        op.trigger();
        for _ in 0..100_000 {
            op.tick(0.0, SAMPLE_RATE);
            assert!(op.phase() >= 0.0 && op.phase() < 1.0, "phase {}", op.phase());
        }
    }

    #[test]
    fn amplitude_non_increasing_between_triggers() {
        let mut op = Operator::new(200.0, 1.0, 150.0);
        op.trigger();
        let mut previous = op.amplitude();
        for _ in 0..48_000 {
            op.tick(0.0, SAMPLE_RATE);
            assert!(op.amplitude() <= previous);
            previous = op.amplitude();
        }
    }

    #[test]
    fn decay_approximates_continuous_exponential() {
        // (1 - 150/48000)^48000 lands within an order of magnitude of e^-150:
        // after one second the click is silent for all practical purposes.
        let mut op = Operator::new(200.0, 1.0, 150.0);
        op.trigger();
        for _ in 0..48_000 {
            op.tick(0.0, SAMPLE_RATE);
        }
        assert!(op.amplitude() > 0.0);
        assert!(op.amplitude() < 1e-60);
    }
}
