use crate::config::Config;

/// Messages shown while a prediction is in flight
pub const PREDICT_STEPS: [&str; 5] = [
    "Fetching gold spot price…",
    "Fetching Fed funds rate…",
    "Fetching USD/INR rate…",
    "Building feature vectors…",
    "Running model inference…",
];

/// Cyclic cursor over a fixed list of status messages.
///
/// Holds no timer: the caller drives `advance` from whatever clock it owns,
/// so message order can be tested without one.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusTicker {
    steps: &'static [&'static str],
    index: usize,
}

impl StatusTicker {
    pub fn new(steps: &'static [&'static str]) -> Self {
        Self { steps, index: 0 }
    }

    pub fn current(&self) -> &'static str {
        self.steps.get(self.index).copied().unwrap_or_default()
    }

    /// Moves to the next message, wrapping after the last.
    pub fn advance(&mut self) -> &'static str {
        if !self.steps.is_empty() {
            self.index = (self.index + 1) % self.steps.len();
        }
        self.current()
    }
}

impl Default for StatusTicker {
    fn default() -> Self {
        Self::new(&PREDICT_STEPS)
    }
}

/// Entrance delay for the card at `index`
pub fn card_reveal_delay_ms(index: usize) -> u32 {
    u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(Config::CARD_STAGGER_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_cycles_and_wraps() {
        let mut ticker = StatusTicker::default();
        assert_eq!(ticker.current(), "Fetching gold spot price…");

        let seen: Vec<_> = (0..5).map(|_| ticker.advance()).collect();
        assert_eq!(seen[0], "Fetching Fed funds rate…");
        assert_eq!(seen[3], "Running model inference…");
        assert_eq!(seen[4], "Fetching gold spot price…");
    }

    #[test]
    fn test_empty_ticker() {
        let mut ticker = StatusTicker::new(&[]);
        assert_eq!(ticker.advance(), "");
    }

    #[test]
    fn test_card_reveal_delay_is_proportional() {
        assert_eq!(card_reveal_delay_ms(0), 0);
        assert_eq!(card_reveal_delay_ms(3), 240);
    }
}
