//! Property-based tests for board configuration math.
//! Verifies invariants hold for ALL inputs, not just the badge constants.

#![allow(clippy::arithmetic_side_effects)]

use platform::board_config::{I2cBusConfig, I2sConfig, SlotMode, APB_CYCLES_PER_US};
use platform::CardInfo;

proptest::proptest! {
    /// timeout_cycles never panics and is exact whenever it fits in u32.
    #[test]
    fn i2c_timeout_cycles_saturate(us in proptest::num::u32::ANY) {
        let cfg = I2cBusConfig { timeout_us: us, ..I2cBusConfig::badge() };
        let cycles = cfg.timeout_cycles();
        match us.checked_mul(APB_CYCLES_PER_US) {
            Some(exact) => assert_eq!(cycles, exact),
            None => assert_eq!(cycles, u32::MAX),
        }
    }

    /// Stereo doubles the bit clock of mono at the same rate and width.
    #[test]
    fn stereo_bclk_is_twice_mono(rate in 8_000u32..=192_000, bits in proptest::sample::select(vec![8u8, 16, 24, 32])) {
        let mono = I2sConfig { sample_rate_hz: rate, data_bits: bits, slot_mode: SlotMode::Mono, ..I2sConfig::badge() };
        let stereo = I2sConfig { slot_mode: SlotMode::Stereo, ..mono };
        assert_eq!(stereo.bclk_hz(), mono.bclk_hz() * 2);
    }

    /// Card capacity in MiB never exceeds the byte capacity and never panics.
    #[test]
    fn card_capacity_never_panics(sectors in proptest::num::u64::ANY, size in proptest::sample::select(vec![512u32, 1024, 2048, 4096])) {
        let card = CardInfo {
            name: heapless::String::new(),
            sector_count: sectors,
            sector_size: size,
            max_freq_khz: 20_000,
            mount_point: "/sdcard",
        };
        assert!(card.capacity_mib() <= card.capacity_bytes());
    }
}
