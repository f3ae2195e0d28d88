//! GPIO contract and an `embedded-hal` adapter for single-pin power gates.

use embedded_hal::digital::OutputPin;

use crate::board_config::{Gpio, PinMode};
use crate::error::DriverError;

/// GPIO matrix controller.
pub trait GpioController {
    /// Configure `pin` direction. Pulls and interrupts are left disabled.
    fn configure(&mut self, pin: Gpio, mode: PinMode) -> Result<(), DriverError>;

    /// Latch an output level on `pin`.
    ///
    /// The level is held in the output register even before the pin is
    /// configured as an output, and appears on the pad once it is.
    fn set_level(&mut self, pin: Gpio, high: bool);
}

/// [`GpioController`] over a single `embedded-hal` output pin.
///
/// Lets a HAL that hands out typed pins (already in output mode) stand in for
/// the GPIO matrix during bring-up. Only the wrapped pin can be addressed.
pub struct SinglePinGpio<P: OutputPin> {
    gpio: Gpio,
    pin: P,
    level: bool,
    configured: Option<PinMode>,
    last_error: Option<DriverError>,
}

impl<P: OutputPin> SinglePinGpio<P> {
    /// Wrap `pin`, which is wired to SoC pad `gpio`.
    pub fn new(gpio: Gpio, pin: P) -> Self {
        Self {
            gpio,
            pin,
            level: false,
            configured: None,
            last_error: None,
        }
    }

    /// Last level requested through [`GpioController::set_level`].
    pub fn level(&self) -> bool {
        self.level
    }

    /// Mode applied by the last successful [`GpioController::configure`].
    pub fn mode(&self) -> Option<PinMode> {
        self.configured
    }

    /// Failure of the most recent pin drive from [`GpioController::set_level`].
    ///
    /// `set_level` cannot report errors, so a failed drive is kept here
    /// until the next drive attempt.
    pub fn last_error(&self) -> Option<DriverError> {
        self.last_error
    }

    /// Release the wrapped pin.
    pub fn release(self) -> P {
        self.pin
    }

    fn drive(&mut self) -> Result<(), DriverError> {
        let res = if self.level {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        res.map_err(|_| DriverError::Io)
    }
}

impl<P: OutputPin> GpioController for SinglePinGpio<P> {
    fn configure(&mut self, pin: Gpio, mode: PinMode) -> Result<(), DriverError> {
        if pin != self.gpio {
            return Err(DriverError::InvalidArgument);
        }
        match mode {
            PinMode::Output | PinMode::InputOutput => {
                // Push the latched level out now that the pad is an output.
                self.drive()?;
                self.configured = Some(mode);
                Ok(())
            }
            PinMode::Disabled | PinMode::Input => Err(DriverError::NotSupported),
        }
    }

    fn set_level(&mut self, pin: Gpio, high: bool) {
        if pin != self.gpio {
            return;
        }
        self.level = high;
        if self.configured.is_some() {
            self.last_error = self.drive().err();
        }
    }
}
