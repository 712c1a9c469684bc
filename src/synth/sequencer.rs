use super::voice::Voice;

/// A rhythmic gate bound to one voice. The gate divides the shared measure
/// phase into `divisions` equal steps, open for the first half of each step,
/// and retriggers the voice on every rising edge.
#[derive(Debug, Clone)]
pub struct Sequencer {
    divisions: f64,
    gate_open: bool,
    voice: Voice,
}

impl Sequencer {
    /// `divisions` must be non-zero; the engine drops zero entries at
    /// configuration time so a degenerate gate can never reach here.
    pub fn new(divisions: u32, voice: Voice) -> Self {
        debug_assert!(divisions > 0);
        Self {
            divisions: f64::from(divisions),
            gate_open: false,
            voice,
        }
    }

    /// Evaluates the gate against the shared measure phase, retriggering the
    /// voice on a rising edge, then produces one voice sample. Exactly one
    /// trigger fires per edge: a gate that stays open does not retrigger.
    pub fn tick(&mut self, measure_phase: f64, sample_rate: f64) -> f64 {
        let gate = (measure_phase * self.divisions).fract() < 0.5;
        if gate && !self.gate_open {
            self.voice.trigger();
        }
        self.gate_open = gate;
        self.voice.tick(sample_rate)
    }

    pub fn divisions(&self) -> f64 {
        self.divisions
    }

    pub fn voice(&self) -> &Voice {
        &self.voice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::operator::Operator;

    const SAMPLE_RATE: f64 = 48_000.0;

    fn test_sequencer(divisions: u32) -> Sequencer {
        Sequencer::new(
            divisions,
            Voice::new(
                Operator::new(316.6, 0.2, 300.0),
                Operator::new(200.0, 0.5, 150.0),
            ),
        )
    }

    /// Sweeps one full measure and records the sample indices where the
    /// voice was retriggered, observed as the carrier envelope jumping back
    /// up to full scale.
    fn trigger_indices(seq: &mut Sequencer, samples: usize) -> Vec<usize> {
        let mut indices = Vec::new();
        let mut previous = seq.voice().carrier.amplitude();
        for k in 0..samples {
            let phase = k as f64 / samples as f64;
            seq.tick(phase, SAMPLE_RATE);
            let amplitude = seq.voice().carrier.amplitude();
            if amplitude > previous {
                indices.push(k);
            }
            previous = amplitude;
        }
        indices
    }

    #[test]
    fn one_rising_edge_per_step() {
        for divisions in [1u32, 2, 3, 4, 5, 7, 16] {
            let mut seq = test_sequencer(divisions);
            let samples = 48_000;
            let edges = trigger_indices(&mut seq, samples);
            assert_eq!(
                edges.len(),
                divisions as usize,
                "divisions = {divisions}, edges at {edges:?}"
            );
            // Each edge sits at measure phase k / divisions.
            for (k, &edge) in edges.iter().enumerate() {
                let expected = k * samples / divisions as usize;
                assert!(
                    edge.abs_diff(expected) <= 1,
                    "divisions = {divisions}: edge {k} at {edge}, expected {expected}"
                );
            }
        }
    }

    #[test]
    fn open_gate_does_not_retrigger() {
        let mut seq = test_sequencer(1);
        seq.tick(0.0, SAMPLE_RATE);
        let after_first = seq.voice().carrier.amplitude();
        // Still inside the first half-step: the gate is open the whole time.
        seq.tick(0.1, SAMPLE_RATE);
        seq.tick(0.2, SAMPLE_RATE);
        assert!(seq.voice().carrier.amplitude() < after_first);
    }

    #[test]
    fn gate_reopens_after_half_step() {
        let mut seq = test_sequencer(2);
        seq.tick(0.0, SAMPLE_RATE); // trigger at step 0
        seq.tick(0.3, SAMPLE_RATE); // second half of step 0: gate closed
        let decayed = seq.voice().carrier.amplitude();
        seq.tick(0.5, SAMPLE_RATE); // step 1 opens: retrigger
        assert!(seq.voice().carrier.amplitude() > decayed);
    }
}
