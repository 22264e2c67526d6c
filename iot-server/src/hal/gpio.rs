// GPIO Controller für den Raspberry Pi
//
// Hält pro Pin-Nummer genau ein rppal-Handle. Handles werden beim ersten
// open_pin() angelegt und bleiben bis close_pin() bzw. Drop des Controllers
// offen. rppal setzt den Pin beim Drop auf den Ausgangszustand zurück.

use std::collections::BTreeMap;

use iot_core::{GpioController, GpioError, PinMode, PinNumber, PinNumberingScheme, PinValue};
use rppal::gpio::{Gpio, IoPin, Mode};
use tracing::{debug, warn};

/// rppal-basierter [`GpioController`] mit Pin-Cache
pub struct RppalGpioController {
    gpio: Gpio,
    numbering: PinNumberingScheme,
    pins: BTreeMap<PinNumber, IoPin>,
}

impl RppalGpioController {
    /// Erstellt einen Controller; Pin-Nummern werden im Schema `numbering` interpretiert
    pub fn new(gpio: Gpio, numbering: PinNumberingScheme) -> Self {
        Self {
            gpio,
            numbering,
            pins: BTreeMap::new(),
        }
    }
}

impl GpioController for RppalGpioController {
    fn open_pin(&mut self, pin: PinNumber, mode: PinMode) -> Result<(), GpioError> {
        let bcm = iot_core::to_logical(pin, self.numbering).ok_or(GpioError::InvalidPin(pin))?;

        let raw = self.gpio.get(bcm).map_err(|e| {
            warn!("GPIO: Pin {} (BCM {}) nicht verfügbar: {}", pin, bcm, e);
            GpioError::Unavailable(pin)
        })?;

        let handle = match mode {
            PinMode::Input => raw.into_io(Mode::Input),
            PinMode::Output => {
                let mut output = raw.into_io(Mode::Output);
                output.set_low();
                output
            }
        };

        debug!("GPIO: Pin {} (BCM {}) geöffnet als {:?}", pin, bcm, mode);
        self.pins.insert(pin, handle);
        Ok(())
    }

    fn close_pin(&mut self, pin: PinNumber) {
        if self.pins.remove(&pin).is_some() {
            debug!("GPIO: Pin {} geschlossen", pin);
        }
    }

    fn is_pin_open(&self, pin: PinNumber) -> bool {
        self.pins.contains_key(&pin)
    }

    fn write(&mut self, pin: PinNumber, value: PinValue) -> Result<(), GpioError> {
        match self.pins.get_mut(&pin) {
            Some(io) if io.mode() == Mode::Output => {
                match value {
                    PinValue::Low => io.set_low(),
                    PinValue::High => io.set_high(),
                }
                Ok(())
            }
            _ => Err(GpioError::NotOpen(pin)),
        }
    }
}
