//! Pulse-count encoding for ceiling-limited burst generators.
//!
//! A generator emits at most `ceiling` pulses per primary run, then re-arms
//! itself `repeat_count` times, emitting `tail_count` pulses on the last
//! cycle. Any positive pulse count maps onto one such configuration.

use crate::error::{ArgumentError, Result};

/// Pulse ceiling of the reference burst generator.
pub const DEFAULT_CEILING: u32 = 256;

/// One burst-generator programming.
///
/// Running it to exhaustion emits `primary + repeat * ceiling + tail` pulses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BurstConfig {
    /// Pulses in the primary run (1..=ceiling once encoded).
    pub primary_count: u32,
    /// Automatic re-arms after the primary run.
    pub repeat_count: u32,
    /// Pulses emitted on the final repeat (0..ceiling).
    pub tail_count: u32,
}

impl BurstConfig {
    /// Total pulses emitted for a given ceiling.
    #[inline]
    pub fn total_pulses(&self, ceiling: u32) -> u64 {
        u64::from(self.primary_count)
            + u64::from(self.repeat_count) * u64::from(ceiling)
            + u64::from(self.tail_count)
    }
}

/// Encode `total` pulses for a generator limited to `ceiling` pulses per run.
///
/// Counts above the ceiling become a full primary run plus
/// `total / ceiling - 1` repeats and a tail of `total % ceiling`. An exact
/// multiple of the ceiling keeps a zero-pulse tail.
///
/// # Errors
///
/// `InvalidArgument` if either input is zero or the repeat count does not fit
/// the generator's 32-bit repeat register.
pub fn encode(total: u64, ceiling: u32) -> Result<BurstConfig> {
    if ceiling == 0 {
        return Err(ArgumentError::ZeroCeiling.into());
    }
    if total == 0 {
        return Err(ArgumentError::ZeroPulseCount.into());
    }

    let ceiling_wide = u64::from(ceiling);
    if total <= ceiling_wide {
        return Ok(BurstConfig {
            primary_count: total as u32,
            repeat_count: 0,
            tail_count: 0,
        });
    }

    let repeat_count = u32::try_from(total / ceiling_wide - 1)
        .map_err(|_| ArgumentError::PulseCountOverflow(total))?;

    Ok(BurstConfig {
        primary_count: ceiling,
        repeat_count,
        tail_count: (total % ceiling_wide) as u32,
    })
}

/// Encoder bound to one generator's ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseBurstEncoder {
    ceiling: u32,
}

impl PulseBurstEncoder {
    /// Create an encoder for the given ceiling.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `ceiling` is zero.
    pub fn new(ceiling: u32) -> Result<Self> {
        if ceiling == 0 {
            return Err(ArgumentError::ZeroCeiling.into());
        }
        Ok(Self { ceiling })
    }

    /// Pulses per primary run.
    #[inline]
    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    /// Encode a pulse count.
    pub fn encode(&self, total: u64) -> Result<BurstConfig> {
        encode(total, self.ceiling)
    }

    /// Pulse count a configuration emits on this encoder's generator.
    #[inline]
    pub fn decode(&self, burst: &BurstConfig) -> u64 {
        burst.total_pulses(self.ceiling)
    }
}

impl Default for PulseBurstEncoder {
    fn default() -> Self {
        Self {
            ceiling: DEFAULT_CEILING,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use proptest::prelude::*;

    fn burst(primary_count: u32, repeat_count: u32, tail_count: u32) -> BurstConfig {
        BurstConfig {
            primary_count,
            repeat_count,
            tail_count,
        }
    }

    #[test]
    fn test_counts_within_ceiling_fit_primary() {
        for total in 1..=256u64 {
            assert_eq!(encode(total, 256).unwrap(), burst(total as u32, 0, 0));
        }
    }

    #[test]
    fn test_just_above_ceiling() {
        assert_eq!(encode(257, 256).unwrap(), burst(256, 0, 1));
        assert_eq!(encode(300, 256).unwrap(), burst(256, 0, 44));
    }

    #[test]
    fn test_thousand_pulses() {
        let config = encode(1000, 256).unwrap();
        assert_eq!(config, burst(256, 2, 232));
        assert_eq!(config.total_pulses(256), 1000);
    }

    #[test]
    fn test_exact_multiple_keeps_zero_tail() {
        let config = encode(512, 256).unwrap();
        assert_eq!(config, burst(256, 1, 0));
        assert_eq!(config.total_pulses(256), 512);

        let config = encode(1024, 256).unwrap();
        assert_eq!(config, burst(256, 3, 0));
    }

    #[test]
    fn test_matches_shift_and_mask_for_256() {
        for total in [257u64, 511, 513, 4096, 65_535, 1_000_000] {
            let config = encode(total, 256).unwrap();
            assert_eq!(u64::from(config.repeat_count), (total >> 8) - 1);
            assert_eq!(u64::from(config.tail_count), total & 0xFF);
        }
    }

    #[test]
    fn test_other_ceiling() {
        let config = encode(250, 100).unwrap();
        assert_eq!(config, burst(100, 1, 50));
        assert_eq!(config.total_pulses(100), 250);
    }

    #[test]
    fn test_zero_inputs_rejected() {
        assert_eq!(
            encode(0, 256),
            Err(Error::InvalidArgument(ArgumentError::ZeroPulseCount))
        );
        assert_eq!(
            encode(10, 0),
            Err(Error::InvalidArgument(ArgumentError::ZeroCeiling))
        );
        assert!(PulseBurstEncoder::new(0).is_err());
    }

    #[test]
    fn test_repeat_overflow_rejected() {
        let total = u64::MAX;
        assert_eq!(
            encode(total, 256),
            Err(Error::InvalidArgument(ArgumentError::PulseCountOverflow(total)))
        );
    }

    #[test]
    fn test_default_encoder_ceiling() {
        let encoder = PulseBurstEncoder::default();
        assert_eq!(encoder.ceiling(), DEFAULT_CEILING);
        let config = encoder.encode(300).unwrap();
        assert_eq!(encoder.decode(&config), 300);
    }

    proptest! {
        #[test]
        fn prop_encoded_burst_emits_requested_count(
            total in 1u64..50_000_000,
            ceiling in 1u32..=1024,
        ) {
            let config = encode(total, ceiling).unwrap();
            prop_assert!(config.primary_count >= 1 && config.primary_count <= ceiling);
            prop_assert!(config.tail_count < ceiling);
            prop_assert_eq!(config.total_pulses(ceiling), total);
        }
    }
}
