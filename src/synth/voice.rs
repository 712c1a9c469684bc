use super::operator::Operator;

/// A modulator/carrier operator pair in a fixed FM topology: the modulator's
/// instantaneous output shifts the carrier's phase argument before the sine
/// is evaluated.
#[derive(Debug, Clone)]
pub struct Voice {
    pub modulator: Operator,
    pub carrier: Operator,
}

impl Voice {
    pub fn new(modulator: Operator, carrier: Operator) -> Self {
        Self { modulator, carrier }
    }

    /// Produces one sample: ticks the modulator with no external offset, then
    /// ticks the carrier with the modulator's output as its phase offset.
    pub fn tick(&mut self, sample_rate: f64) -> f64 {
        let modulation = self.modulator.tick(0.0, sample_rate);
        self.carrier.tick(modulation, sample_rate)
    }

    /// Retriggers both operators as one logical event; the next `tick` sees
    /// both envelopes at 1.0 and both phases at zero.
    pub fn trigger(&mut self) {
        self.carrier.trigger();
        self.modulator.trigger();
    }
}
