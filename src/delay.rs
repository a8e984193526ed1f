//! Synthetic "typing" delay shown before a bot reply appears

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const BASE_DELAY_MS: u64 = 600;
pub const PER_CHAR_DELAY_MS: u64 = 15;
pub const MAX_DELAY_MS: u64 = 3000;

/// `min(base + per_char * len, max)` pacing for the typing indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingDelay {
    pub base_ms: u64,
    pub per_char_ms: u64,
    pub max_ms: u64,
}

impl Default for TypingDelay {
    fn default() -> Self {
        Self {
            base_ms: BASE_DELAY_MS,
            per_char_ms: PER_CHAR_DELAY_MS,
            max_ms: MAX_DELAY_MS,
        }
    }
}

impl TypingDelay {
    /// Length is counted in UTF-16 code units, so an emoji weighs two.
    pub fn delay_ms(&self, response: &str) -> u64 {
        let len = response.encode_utf16().count() as u64;
        self.per_char_ms
            .saturating_mul(len)
            .saturating_add(self.base_ms)
            .min(self.max_ms)
    }

    pub fn duration(&self, response: &str) -> Duration {
        Duration::from_millis(self.delay_ms(response))
    }
}

/// Delay in milliseconds using the default constants
pub fn simulate_typing_delay(response: &str) -> u64 {
    TypingDelay::default().delay_ms(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_base() {
        assert_eq!(simulate_typing_delay(""), 600);
    }

    #[test]
    fn test_linear_below_cap() {
        assert_eq!(simulate_typing_delay("hello"), 600 + 5 * 15);
        assert_eq!(simulate_typing_delay(&"x".repeat(160)), 3000);
        assert_eq!(simulate_typing_delay(&"x".repeat(159)), 600 + 159 * 15);
    }

    #[test]
    fn test_clamped_at_max() {
        assert_eq!(simulate_typing_delay(&"a".repeat(200)), 3000);
        assert_eq!(simulate_typing_delay(&"a".repeat(1_000_000)), 3000);
    }

    #[test]
    fn test_counts_utf16_units() {
        assert_eq!(simulate_typing_delay("🚀"), 600 + 2 * 15);
        assert_eq!(simulate_typing_delay("é"), 600 + 15);
    }

    #[test]
    fn test_custom_config_saturates() {
        let delay = TypingDelay {
            base_ms: u64::MAX,
            per_char_ms: u64::MAX,
            max_ms: 10,
        };
        assert_eq!(delay.delay_ms("abc"), 10);
        assert_eq!(TypingDelay::default().duration(""), Duration::from_millis(600));
    }
}
