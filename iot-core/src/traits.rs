//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

use core::fmt;

use crate::types::{PinMode, PinNumber, PinValue, SensorSample};

/// Fehler-Typ für GPIO-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// Pin-Nummer existiert im gewählten Nummerierungsschema nicht
    /// (oder ist Versorgung/Masse)
    InvalidPin(PinNumber),
    /// Pin konnte nicht geöffnet werden (belegt, keine Berechtigung, ...)
    Unavailable(PinNumber),
    /// Schreibzugriff auf einen Pin, der nicht als Ausgang geöffnet ist
    NotOpen(PinNumber),
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpioError::InvalidPin(pin) => write!(f, "invalid pin {}", pin),
            GpioError::Unavailable(pin) => write!(f, "pin {} is unavailable", pin),
            GpioError::NotOpen(pin) => write!(f, "pin {} is not open for output", pin),
        }
    }
}

impl core::error::Error for GpioError {}

/// Trait für GPIO-Controller
///
/// Abstrahiert den Zugriff auf die Pins des Boards.
///
/// # Implementierungen
/// - **Production:** RppalGpioController (Raspberry Pi, Pin-Cache pro Pin-Nummer)
/// - **Testing:** MockGpio (in-memory Mock)
pub trait GpioController {
    /// Öffnet einen Pin in der gegebenen Betriebsart
    fn open_pin(&mut self, pin: PinNumber, mode: PinMode) -> Result<(), GpioError>;

    /// Gibt einen Pin wieder frei (no-op wenn nicht geöffnet)
    fn close_pin(&mut self, pin: PinNumber);

    /// Prüft ob ein Pin bereits geöffnet ist
    fn is_pin_open(&self, pin: PinNumber) -> bool;

    /// Setzt den Pegel eines geöffneten Ausgangs-Pins
    ///
    /// # Fehlerbehandlung
    /// Gibt `GpioError::NotOpen` zurück wenn der Pin nicht geöffnet ist
    fn write(&mut self, pin: PinNumber, value: PinValue) -> Result<(), GpioError>;
}

/// Trait für Temperatur-/Feuchte-Sensoren (z.B. DHT22)
///
/// Liefert immer einen [`SensorSample`]; ob der letzte Leseversuch gültig war
/// steht in `last_read_successful`.
pub trait HumitureSensor {
    fn read(&mut self) -> SensorSample;
}
