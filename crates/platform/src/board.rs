//! The full set of drivers one board provides for bring-up.

use crate::{
    AudioEmulator, ConfigStore, EpaperPanel, GpioController, HapticDriver, I2cController,
    I2sController, SpiController, StorageDriver,
};

/// Driver bundle for one board.
///
/// Bring-up borrows one driver at a time through these accessors; no two are
/// ever borrowed together. A hardware target implements this over its HAL
/// drivers; host tests use [`SimBoard`](crate::mocks::SimBoard).
pub trait Board {
    /// Non-volatile store driver.
    type Store: ConfigStore;
    /// I2C controller.
    type I2c: I2cController;
    /// I2S controller.
    type I2s: I2sController;
    /// GPIO matrix.
    type Gpio: GpioController;
    /// SPI controller.
    type Spi: SpiController;
    /// E-paper panel driver.
    type Display: EpaperPanel;
    /// Haptic driver.
    type Haptic: HapticDriver;
    /// SD card mounter.
    type Storage: StorageDriver;
    /// Audio-chip emulator.
    type Audio: AudioEmulator;

    /// Store driver.
    fn config_store(&mut self) -> &mut Self::Store;
    /// I2C controller.
    fn i2c(&mut self) -> &mut Self::I2c;
    /// I2S controller.
    fn i2s(&mut self) -> &mut Self::I2s;
    /// GPIO matrix.
    fn gpio(&mut self) -> &mut Self::Gpio;
    /// SPI controller.
    fn spi(&mut self) -> &mut Self::Spi;
    /// E-paper panel driver.
    fn display(&mut self) -> &mut Self::Display;
    /// Haptic driver.
    fn haptic(&mut self) -> &mut Self::Haptic;
    /// SD card mounter.
    fn storage(&mut self) -> &mut Self::Storage;
    /// Audio-chip emulator.
    fn audio(&mut self) -> &mut Self::Audio;
}
