//! Board wiring and peripheral parameters for the badge.
//!
//! Every pin number, clock rate, bus address and mount parameter used during
//! bring-up lives here. Bring-up code reads these tables; it never hardcodes a
//! pin.
//!
//! # Pin Assignments
//!
//! | Function          | GPIO | Bus        |
//! |-------------------|------|------------|
//! | I2C SDA           | 6    | I2C0       |
//! | I2C SCL           | 7    | I2C0       |
//! | I2S BCLK          | 23   | I2S        |
//! | I2S WS            | 17   | I2S        |
//! | I2S DOUT          | 22   | I2S        |
//! | Amplifier enable  | 1    | —          |
//! | SPI MOSI          | 19   | SPI2       |
//! | SPI MISO          | 20   | SPI2       |
//! | SPI SCLK          | 21   | SPI2       |
//! | E-paper CS        | 8    | SPI2       |
//! | E-paper D/C       | 5    | SPI2       |
//! | E-paper RESET     | 16   | SPI2       |
//! | E-paper BUSY      | 10   | SPI2       |
//! | SD card CS        | 18   | SPI2       |
//!
//! # I2C Devices
//!
//! | Bus  | Peripheral      | Address | Speed   |
//! |------|-----------------|---------|---------|
//! | I2C0 | DRV2605 haptic  | 0x5A    | 400 kHz |

/// GPIO number on the SoC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Gpio(pub u8);

impl Gpio {
    /// Raw pin number.
    pub const fn num(self) -> u8 {
        self.0
    }
}

/// GPIO direction/capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Pin disconnected.
    Disabled,
    /// Input only.
    Input,
    /// Output only.
    Output,
    /// Output with input buffer enabled, so the driven level can be read back.
    InputOutput,
}

/// I2C controller port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cPort {
    /// Port 0.
    I2c0,
    /// Port 1.
    I2c1,
}

/// SPI host controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiHost {
    /// General-purpose SPI2.
    Spi2,
    /// General-purpose SPI3.
    Spi3,
}

/// Largest single SPI transaction the controller can queue without DMA chaining.
pub const SPI_MAX_TRANSFER_SIZE: u32 = 64;

/// APB clock cycles per microsecond, used to convert the I2C timeout.
pub const APB_CYCLES_PER_US: u32 = 80;

// ── I2C ──────────────────────────────────────────────────────────────────────

/// I2C master bus parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cBusConfig {
    /// Controller port.
    pub port: I2cPort,
    /// Data line.
    pub sda: Gpio,
    /// Clock line.
    pub scl: Gpio,
    /// SCL frequency in Hz.
    pub clock_hz: u32,
    /// Enable internal pull-up on SDA.
    pub sda_pullup: bool,
    /// Enable internal pull-up on SCL.
    pub scl_pullup: bool,
    /// Bus timeout in microseconds.
    pub timeout_us: u32,
}

impl I2cBusConfig {
    /// Badge I2C0: 400 kHz, external pull-ups, 250 µs timeout.
    pub const fn badge() -> Self {
        Self {
            port: I2cPort::I2c0,
            sda: Gpio(6),
            scl: Gpio(7),
            clock_hz: 400_000,
            sda_pullup: false,
            scl_pullup: false,
            timeout_us: 250,
        }
    }

    /// Timeout expressed in APB clock cycles, the unit the controller takes.
    pub const fn timeout_cycles(&self) -> u32 {
        self.timeout_us.saturating_mul(APB_CYCLES_PER_US)
    }
}

// ── I2S ──────────────────────────────────────────────────────────────────────

/// Slot layout for standard-mode I2S.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotMode {
    /// One slot per frame.
    Mono,
    /// Two slots per frame.
    Stereo,
}

/// Standard-mode frame format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotFormat {
    /// Philips I2S (data delayed one BCLK after WS edge).
    Philips,
    /// MSB-justified (data aligned with WS edge).
    Msb,
    /// PCM short frame sync.
    PcmShort,
}

/// I2S transmit channel parameters (master role, standard mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2sConfig {
    /// Sample rate in Hz.
    pub sample_rate_hz: u32,
    /// Bits per sample.
    pub data_bits: u8,
    /// Slot layout.
    pub slot_mode: SlotMode,
    /// Frame format.
    pub slot_format: SlotFormat,
    /// Master clock output, if routed.
    pub mclk: Option<Gpio>,
    /// Bit clock.
    pub bclk: Gpio,
    /// Word select (LRCK).
    pub ws: Gpio,
    /// Serial data out.
    pub dout: Gpio,
    /// Serial data in, if routed.
    pub din: Option<Gpio>,
}

impl I2sConfig {
    /// Badge audio path: 16 kHz, 16-bit stereo, MSB-justified, no MCLK.
    pub const fn badge() -> Self {
        Self {
            sample_rate_hz: 16_000,
            data_bits: 16,
            slot_mode: SlotMode::Stereo,
            slot_format: SlotFormat::Msb,
            mclk: None,
            bclk: Gpio(23),
            ws: Gpio(17),
            dout: Gpio(22),
            din: None,
        }
    }

    /// Bit clock in Hz: `data_bits × slots × sample_rate`.
    pub const fn bclk_hz(&self) -> u32 {
        let slots: u32 = match self.slot_mode {
            SlotMode::Mono => 1,
            SlotMode::Stereo => 2,
        };
        (self.data_bits as u32)
            .saturating_mul(slots)
            .saturating_mul(self.sample_rate_hz)
    }
}

// ── GPIO ─────────────────────────────────────────────────────────────────────

/// Amplifier power-gate output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AmpPowerConfig {
    /// Gate pin.
    pub pin: Gpio,
    /// Mode the pin is configured with.
    pub mode: PinMode,
    /// Level that powers the amplifier.
    pub enable_level: bool,
}

impl AmpPowerConfig {
    /// Badge amplifier gate: GPIO1, active high, read-back enabled.
    pub const fn badge() -> Self {
        Self {
            pin: Gpio(1),
            mode: PinMode::InputOutput,
            enable_level: true,
        }
    }
}

// ── SPI ──────────────────────────────────────────────────────────────────────

/// SPI bus parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiBusConfig {
    /// Host controller.
    pub host: SpiHost,
    /// Master out.
    pub mosi: Gpio,
    /// Master in.
    pub miso: Gpio,
    /// Clock.
    pub sclk: Gpio,
    /// Quad-mode WP line, if routed.
    pub quadwp: Option<Gpio>,
    /// Quad-mode HD line, if routed.
    pub quadhd: Option<Gpio>,
    /// Maximum transfer size in bytes.
    pub max_transfer_size: u32,
    /// Let the driver pick a DMA channel.
    pub dma_auto: bool,
}

impl SpiBusConfig {
    /// Badge SPI2: shared by the e-paper panel and the SD card slot.
    pub const fn badge() -> Self {
        Self {
            host: SpiHost::Spi2,
            mosi: Gpio(19),
            miso: Gpio(20),
            sclk: Gpio(21),
            quadwp: None,
            quadhd: None,
            max_transfer_size: SPI_MAX_TRANSFER_SIZE,
            dma_auto: true,
        }
    }
}

// ── Devices ──────────────────────────────────────────────────────────────────

/// Width of the e-paper panel in pixels.
pub const EPAPER_WIDTH: u32 = 152;

/// Height of the e-paper panel in pixels.
pub const EPAPER_HEIGHT: u32 = 152;

/// E-paper panel wiring and timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EpaperConfig {
    /// SPI host the panel sits on.
    pub host: SpiHost,
    /// Chip select.
    pub cs: Gpio,
    /// Data/command select.
    pub dc: Gpio,
    /// Reset (active low).
    pub reset: Gpio,
    /// Busy input (high while the controller is working).
    pub busy: Gpio,
    /// SPI clock for the panel device in Hz.
    pub spi_speed_hz: u32,
    /// Maximum transfer size in bytes.
    pub max_transfer_size: u32,
    /// Panel width in pixels.
    pub width: u32,
    /// Panel height in pixels.
    pub height: u32,
}

impl EpaperConfig {
    /// Badge 1.54" tri-colour panel at 10 MHz.
    pub const fn badge() -> Self {
        Self {
            host: SpiHost::Spi2,
            cs: Gpio(8),
            dc: Gpio(5),
            reset: Gpio(16),
            busy: Gpio(10),
            spi_speed_hz: 10_000_000,
            max_transfer_size: SPI_MAX_TRANSFER_SIZE,
            width: EPAPER_WIDTH,
            height: EPAPER_HEIGHT,
        }
    }
}

/// DRV2605 default 7-bit I2C address.
pub const DRV2605_ADDR: u8 = 0x5A;

/// Haptic driver parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HapticConfig {
    /// Bus the driver is on.
    pub port: I2cPort,
    /// 7-bit address.
    pub address: u8,
}

impl HapticConfig {
    /// DRV2605 on I2C0.
    pub const fn badge() -> Self {
        Self {
            port: I2cPort::I2c0,
            address: DRV2605_ADDR,
        }
    }
}

/// SD card mount parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MountConfig {
    /// SPI host the slot sits on.
    pub host: SpiHost,
    /// Card chip select.
    pub cs: Gpio,
    /// VFS mount point.
    pub mount_point: &'static str,
    /// Format the card when the filesystem cannot be mounted.
    pub format_if_mount_failed: bool,
    /// Size of the open-file pool.
    pub max_files: u8,
    /// FAT allocation unit in bytes.
    pub allocation_unit_size: u32,
}

impl MountConfig {
    /// Badge SD slot: never formats, 5 open files, 16 KiB clusters.
    pub const fn badge() -> Self {
        Self {
            host: SpiHost::Spi2,
            cs: Gpio(18),
            mount_point: "/sdcard",
            format_if_mount_failed: false,
            max_files: 5,
            allocation_unit_size: 16 * 1024,
        }
    }
}

// ── Board ────────────────────────────────────────────────────────────────────

/// Complete parameter set for one board revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    /// I2C bus.
    pub i2c: I2cBusConfig,
    /// I2S transmit channel.
    pub i2s: I2sConfig,
    /// Amplifier power gate.
    pub amp_power: AmpPowerConfig,
    /// SPI bus.
    pub spi: SpiBusConfig,
    /// E-paper panel.
    pub epaper: EpaperConfig,
    /// Haptic driver.
    pub haptic: HapticConfig,
    /// SD card.
    pub mount: MountConfig,
}

impl BoardConfig {
    /// The production badge.
    pub const fn badge() -> Self {
        Self {
            i2c: I2cBusConfig::badge(),
            i2s: I2sConfig::badge(),
            amp_power: AmpPowerConfig::badge(),
            spi: SpiBusConfig::badge(),
            epaper: EpaperConfig::badge(),
            haptic: HapticConfig::badge(),
            mount: MountConfig::badge(),
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::badge()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;

    #[test]
    fn i2c_timeout_is_250us_at_80mhz() {
        assert_eq!(I2cBusConfig::badge().timeout_cycles(), 20_000);
    }

    #[test]
    fn i2s_bclk_16k_stereo_16bit() {
        // 16 bits × 2 slots × 16 kHz = 512 kHz
        assert_eq!(I2sConfig::badge().bclk_hz(), 512_000);
    }

    #[test]
    fn display_and_sd_share_the_spi_host() {
        let board = BoardConfig::badge();
        assert_eq!(board.epaper.host, board.spi.host);
        assert_eq!(board.mount.host, board.spi.host);
        assert_ne!(board.epaper.cs, board.mount.cs, "each SPI device needs its own CS");
    }

    #[test]
    fn haptic_is_on_the_configured_i2c_port() {
        let board = BoardConfig::badge();
        assert_eq!(board.haptic.port, board.i2c.port);
        assert_eq!(board.haptic.address, 0x5A);
    }

    #[test]
    fn sd_mount_never_formats() {
        let mount = MountConfig::badge();
        assert!(!mount.format_if_mount_failed);
        assert_eq!(mount.max_files, 5);
        assert_eq!(mount.allocation_unit_size, 16_384);
    }

    #[test]
    fn no_pin_is_assigned_twice() {
        let b = BoardConfig::badge();
        let mut pins = [
            b.i2c.sda,
            b.i2c.scl,
            b.i2s.bclk,
            b.i2s.ws,
            b.i2s.dout,
            b.amp_power.pin,
            b.spi.mosi,
            b.spi.miso,
            b.spi.sclk,
            b.epaper.cs,
            b.epaper.dc,
            b.epaper.reset,
            b.epaper.busy,
            b.mount.cs,
        ];
        pins.sort();
        for pair in pins.windows(2) {
            assert_ne!(pair[0], pair[1], "GPIO{} assigned twice", pair[0].num());
        }
    }
}
