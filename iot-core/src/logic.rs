//! Pure Business Logic Functions
//!
//! Funktionen ohne Hardware-Dependencies (testbar!). Hardware-Zugriff läuft
//! ausschließlich über die Traits aus [`crate::traits`].

use core::fmt;

use crate::traits::{GpioController, GpioError, HumitureSensor};
use crate::types::{
    Color, HumitureReading, LedPins, OffAliases, PinMode, PinNumber, PinValue,
};
use crate::weather;

/// Farbname konnte nicht aufgelöst werden
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedColorError;

impl fmt::Display for UnsupportedColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unsupported color")
    }
}

impl core::error::Error for UnsupportedColorError {}

/// Fehler-Typ für [`LedColorSetter::set_color`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedError {
    UnsupportedColor,
    Gpio(GpioError),
}

impl From<GpioError> for LedError {
    fn from(error: GpioError) -> Self {
        LedError::Gpio(error)
    }
}

impl From<UnsupportedColorError> for LedError {
    fn from(_: UnsupportedColorError) -> Self {
        LedError::UnsupportedColor
    }
}

impl fmt::Display for LedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedError::UnsupportedColor => fmt::Display::fmt(&UnsupportedColorError, f),
            LedError::Gpio(error) => write!(f, "gpio: {}", error),
        }
    }
}

impl core::error::Error for LedError {}

/// Fehler-Typ für [`read_humiture`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumitureError {
    /// Letzter Leseversuch des Sensors ist fehlgeschlagen
    SensorTimeout,
}

impl fmt::Display for HumitureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HumitureError::SensorTimeout => f.write_str("sensor read timed out"),
        }
    }
}

impl core::error::Error for HumitureError {}

/// Löst einen Farbnamen (case-insensitive) auf
///
/// Reihenfolge: red, green, blue, Aus-Alias bzw. fehlend/leer → [`Color::Off`],
/// alles andere → [`UnsupportedColorError`].
///
/// # Beispiele
///
/// ```
/// # use iot_core::{resolve_color, Color, OffAliases};
/// assert_eq!(resolve_color(Some("RED"), OffAliases::BlackOnly), Ok(Color::Red));
/// assert_eq!(resolve_color(None, OffAliases::BlackOnly), Ok(Color::Off));
/// assert!(resolve_color(Some("purple"), OffAliases::BlackOnly).is_err());
/// ```
pub fn resolve_color(
    name: Option<&str>,
    off_aliases: OffAliases,
) -> Result<Color, UnsupportedColorError> {
    let Some(name) = name else {
        return Ok(Color::Off);
    };

    if name.is_empty() || off_aliases.matches(name) {
        return Ok(Color::Off);
    }

    Color::LIT
        .into_iter()
        .find(|color| name.eq_ignore_ascii_case(color.as_str()))
        .ok_or(UnsupportedColorError)
}

/// Idempotentes Setzen eines Ausgangs-Pins
///
/// Öffnet den Pin nur wenn er noch nicht offen ist und schreibt dann den Pegel.
pub fn set_pin<G: GpioController + ?Sized>(
    gpio: &mut G,
    pin: PinNumber,
    value: PinValue,
) -> Result<(), GpioError> {
    if !gpio.is_pin_open(pin) {
        gpio.open_pin(pin, PinMode::Output)?;
    }

    gpio.write(pin, value)
}

/// Setzt die RGB LED auf eine Farbe
///
/// Nach jedem Aufruf ist höchstens ein Pin high.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedColorSetter {
    pins: LedPins,
    off_aliases: OffAliases,
}

impl LedColorSetter {
    pub const fn new(pins: LedPins, off_aliases: OffAliases) -> Self {
        Self { pins, off_aliases }
    }

    /// Schaltet alle drei Pins aus und danach (falls aufgelöst) den Pin der Farbe ein
    ///
    /// Die Pins werden vor der Namensauflösung ausgeschaltet; ein unbekannter
    /// Name hinterlässt die LED also aus.
    pub fn set_color<G: GpioController + ?Sized>(
        &self,
        gpio: &mut G,
        name: Option<&str>,
    ) -> Result<Color, LedError> {
        self.turn_off(gpio)?;

        let color = resolve_color(name, self.off_aliases)?;

        if let Some(pin) = self.pins.pin_for(color) {
            set_pin(gpio, pin, PinValue::High)?;
        }

        Ok(color)
    }

    /// Zieht alle drei Pins auf low
    pub fn turn_off<G: GpioController + ?Sized>(&self, gpio: &mut G) -> Result<(), GpioError> {
        for pin in self.pins.all() {
            set_pin(gpio, pin, PinValue::Low)?;
        }
        Ok(())
    }

    /// Schaltet die LED aus und gibt alle drei Pins frei
    pub fn release<G: GpioController + ?Sized>(&self, gpio: &mut G) -> Result<(), GpioError> {
        let result = self.turn_off(gpio);
        for pin in self.pins.all() {
            gpio.close_pin(pin);
        }
        result
    }
}

/// Liest den Sensor genau einmal und bereitet den Messwert auf
///
/// Hitzeindex und absolute Feuchte werden aus den ungerundeten Werten
/// berechnet, erst das Ergebnis wird gerundet.
pub fn read_humiture<S: HumitureSensor + ?Sized>(
    sensor: &mut S,
) -> Result<HumitureReading, HumitureError> {
    let sample = sensor.read();
    if !sample.last_read_successful {
        return Err(HumitureError::SensorTimeout);
    }

    let t = sample.temperature_celsius;
    let rh = sample.humidity_percent;

    Ok(HumitureReading {
        temperature: round2(t),
        humidity: round2(rh),
        heat_index: round2(weather::heat_index_celsius(t, rh)),
        absolute_humidity: round2(weather::absolute_humidity(t, rh)),
    })
}

/// Rundet auf 2 Nachkommastellen (Banker's Rounding bei exakten Halbwerten)
pub fn round2(value: f64) -> f64 {
    libm::rint(value * 100.0) / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_color_case_insensitive() {
        for name in ["red", "RED", "Red", "rEd"] {
            assert_eq!(resolve_color(Some(name), OffAliases::BlackOnly), Ok(Color::Red));
        }
        assert_eq!(
            resolve_color(Some("Green"), OffAliases::BlackOnly),
            Ok(Color::Green)
        );
        assert_eq!(
            resolve_color(Some("BLUE"), OffAliases::BlackOnly),
            Ok(Color::Blue)
        );
    }

    #[test]
    fn test_resolve_color_off() {
        assert_eq!(resolve_color(None, OffAliases::BlackOnly), Ok(Color::Off));
        assert_eq!(resolve_color(Some(""), OffAliases::BlackOnly), Ok(Color::Off));
        assert_eq!(
            resolve_color(Some("Black"), OffAliases::BlackOnly),
            Ok(Color::Off)
        );
    }

    #[test]
    fn test_resolve_color_blank_depends_on_aliases() {
        assert_eq!(
            resolve_color(Some("blank"), OffAliases::BlackOnly),
            Err(UnsupportedColorError)
        );
        assert_eq!(
            resolve_color(Some("BLANK"), OffAliases::BlackOrBlank),
            Ok(Color::Off)
        );
    }

    #[test]
    fn test_resolve_color_unsupported() {
        assert_eq!(
            resolve_color(Some("purple"), OffAliases::BlackOrBlank),
            Err(UnsupportedColorError)
        );
        // "off" ist kein Alias, nur ein Name für die Anzeige
        assert_eq!(
            resolve_color(Some("off"), OffAliases::BlackOrBlank),
            Err(UnsupportedColorError)
        );
        assert_eq!(
            resolve_color(Some(" red"), OffAliases::BlackOnly),
            Err(UnsupportedColorError)
        );
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(22.456), 22.46);
        assert_eq!(round2(55.231), 55.23);
        assert_eq!(round2(-3.14159), -3.14);
        assert_eq!(round2(10.0), 10.0);
    }

    #[test]
    fn test_round2_ties_to_even() {
        // 0.125 und 0.375 sind exakt darstellbar
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
    }

    #[test]
    fn test_led_error_from_gpio() {
        let err: LedError = GpioError::NotOpen(36).into();
        assert_eq!(err, LedError::Gpio(GpioError::NotOpen(36)));
    }
}
