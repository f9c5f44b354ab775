//! Quadrature transition decoder.
//!
//! A rotary encoder drives its two output lines through the Gray ring
//! `(0,0) -> (0,1) -> (1,1) -> (1,0) -> (0,0)` when turned one way and
//! through the reverse ring when turned the other way. Only one line changes
//! per legitimate step, so comparing the pair sampled at each line-change
//! event against the previously sampled pair recovers the direction.
//!
//! The two lines change asynchronously relative to each other and to the
//! event-service latency, so an observation can show no change at all (the
//! event raced with an earlier re-read) or both bits flipped (an
//! intermediate state was missed). Neither is a countable step.

/// Snapshot of the two encoder signal lines.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineState {
    pub a: bool,
    pub b: bool,
}

impl LineState {
    pub fn new(a: bool, b: bool) -> Self {
        Self { a, b }
    }

    /// Position of this pair on the forward Gray ring, 0..=3.
    fn ring_index(self) -> u8 {
        match (self.a, self.b) {
            (false, false) => 0,
            (false, true) => 1,
            (true, true) => 2,
            (true, false) => 3,
        }
    }
}

/// Direction of a single decoded step.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Count delta carried by one step in this direction.
    pub fn delta(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Tracks the last observed line pair and classifies each new observation.
pub struct Decoder {
    last: LineState,
}

impl Decoder {
    /// `initial` must be sampled from the live lines. Seeding with anything
    /// else makes the first event look like a jump and lose a step.
    pub fn new(initial: LineState) -> Self {
        Self { last: initial }
    }

    /// Feed the pair sampled after a line-change event.
    ///
    /// Returns the direction of the step, or `None` when the observation is
    /// not a single ring step (no change, or a diagonal where both bits
    /// flipped). The remembered pair still resyncs to `seen` in every case,
    /// so a missed edge costs at most one step and cannot snowball into a
    /// runaway miscount.
    pub fn update(&mut self, seen: LineState) -> Option<Direction> {
        let from = self.last.ring_index();
        let to = seen.ring_index();
        self.last = seen;
        match (4 + to - from) % 4 {
            1 => Some(Direction::Forward),
            3 => Some(Direction::Backward),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The forward ring in order, starting at rest.
    const RING: [LineState; 4] = [
        LineState { a: false, b: false },
        LineState { a: false, b: true },
        LineState { a: true, b: true },
        LineState { a: true, b: false },
    ];

    fn delta_of(from: LineState, to: LineState) -> i32 {
        let mut decoder = Decoder::new(from);
        decoder.update(to).map(Direction::delta).unwrap_or(0)
    }

    #[test]
    fn forward_sequence_from_rest() {
        let mut decoder = Decoder::new(RING[0]);
        let mut count = 0;
        for seen in [RING[1], RING[2], RING[3], RING[0]] {
            count += decoder.update(seen).map(Direction::delta).unwrap_or(0);
        }
        assert_eq!(count, 4);
    }

    #[test]
    fn backward_sequence_from_rest() {
        let mut decoder = Decoder::new(RING[0]);
        let mut count = 0;
        for seen in [RING[3], RING[2], RING[1], RING[0]] {
            count += decoder.update(seen).map(Direction::delta).unwrap_or(0);
        }
        assert_eq!(count, -4);
    }

    #[test]
    fn first_edges_decode_both_directions() {
        assert_eq!(
            Decoder::new(RING[0]).update(RING[1]),
            Some(Direction::Forward)
        );
        assert_eq!(
            Decoder::new(RING[0]).update(RING[3]),
            Some(Direction::Backward)
        );
    }

    #[test]
    fn every_transition_steps_at_most_one() {
        for from in RING {
            for to in RING {
                let delta = delta_of(from, to);
                assert!((-1..=1).contains(&delta), "{from:?} -> {to:?}: {delta}");

                let diagonal = from.a != to.a && from.b != to.b;
                if from == to || diagonal {
                    assert_eq!(delta, 0, "{from:?} -> {to:?} must not count");
                } else {
                    assert_ne!(delta, 0, "{from:?} -> {to:?} must count");
                }
            }
        }
    }

    #[test]
    fn diagonal_jump_resyncs_without_counting() {
        let mut decoder = Decoder::new(LineState::new(false, false));
        assert_eq!(decoder.update(LineState::new(true, true)), None);
        // The remembered pair is now (1,1), so the next single edge decodes
        // from there rather than from the stale (0,0).
        assert_eq!(
            decoder.update(LineState::new(true, false)),
            Some(Direction::Forward)
        );
    }

    #[test]
    fn repeated_observation_does_not_count() {
        let mut decoder = Decoder::new(RING[2]);
        assert_eq!(decoder.update(RING[2]), None);
        assert_eq!(decoder.update(RING[2]), None);
    }

    #[test]
    fn missed_edge_costs_at_most_one_step() {
        // Forward turn where the (1,1) observation was never serviced: the
        // decoder sees (0,1) then jumps to (1,0). The jump itself is ignored
        // but the following edge counts again.
        let mut decoder = Decoder::new(RING[0]);
        assert_eq!(decoder.update(RING[1]), Some(Direction::Forward));
        assert_eq!(decoder.update(RING[3]), None);
        assert_eq!(decoder.update(RING[0]), Some(Direction::Forward));
    }
}
