//! Core Types für LED-Steuerung und Humiture-Sensor
//!
//! Datenstrukturen ohne Hardware-Dependencies

/// Pin-Nummer einer GPIO-Leitung (Bedeutung hängt vom [`PinNumberingScheme`] ab)
pub type PinNumber = u8;

/// Logischer Pegel eines Ausgangs-Pins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinValue {
    Low,
    High,
}

/// Betriebsart beim Öffnen eines Pins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Input,
    Output,
}

/// Adressierung der Pins
///
/// - `Board`: physische Position auf der 40-Pin-Stiftleiste (1..=40)
/// - `Logical`: GPIO-Nummer des SoC (BCM-Nummerierung beim Raspberry Pi)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinNumberingScheme {
    Board,
    Logical,
}

/// Welche Farbnamen als "aus" gelten
///
/// Die LED-only Variante kennt nur `black`, die Variante mit Sensor
/// zusätzlich `blank`. Fehlender oder leerer Name ist in beiden Fällen "aus".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffAliases {
    BlackOnly,
    BlackOrBlank,
}

impl OffAliases {
    /// Prüft (case-insensitive) ob `name` ein Aus-Alias ist
    pub fn matches(self, name: &str) -> bool {
        match self {
            OffAliases::BlackOnly => name.eq_ignore_ascii_case("black"),
            OffAliases::BlackOrBlank => {
                name.eq_ignore_ascii_case("black") || name.eq_ignore_ascii_case("blank")
            }
        }
    }
}

/// Farbe der RGB LED
///
/// Jede Farbe entspricht genau einem Pin, `Off` keinem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Blue,
    Off,
}

impl Color {
    /// Alle Farben, die einen Pin einschalten
    pub const LIT: [Color; 3] = [Color::Red, Color::Green, Color::Blue];

    pub fn as_str(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Off => "off",
        }
    }
}

/// Pin-Belegung der RGB LED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedPins {
    pub red: PinNumber,
    pub green: PinNumber,
    pub blue: PinNumber,
}

impl LedPins {
    /// Standard-Verdrahtung (Board-Nummerierung): Rot 36, Grün 37, Blau 38
    pub const BOARD_DEFAULT: LedPins = LedPins {
        red: 36,
        green: 37,
        blue: 38,
    };

    /// Alle drei Pins in der Reihenfolge Rot, Grün, Blau
    pub fn all(&self) -> [PinNumber; 3] {
        [self.red, self.green, self.blue]
    }

    /// Pin, der für `color` eingeschaltet wird (`None` bei [`Color::Off`])
    pub fn pin_for(&self, color: Color) -> Option<PinNumber> {
        match color {
            Color::Red => Some(self.red),
            Color::Green => Some(self.green),
            Color::Blue => Some(self.blue),
            Color::Off => None,
        }
    }
}

/// Rohwert des Sensor-Treibers
///
/// Entspricht dem zuletzt gelesenen Stand; `last_read_successful` ist false
/// wenn der letzte Leseversuch fehlschlug (Checksumme, Timing, keine Antwort).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSample {
    pub temperature_celsius: f64,
    pub humidity_percent: f64,
    pub last_read_successful: bool,
}

impl SensorSample {
    pub const fn success(temperature_celsius: f64, humidity_percent: f64) -> Self {
        Self {
            temperature_celsius,
            humidity_percent,
            last_read_successful: true,
        }
    }

    pub const fn failed() -> Self {
        Self {
            temperature_celsius: 0.0,
            humidity_percent: 0.0,
            last_read_successful: false,
        }
    }
}

/// Aufbereiteter Messwert für die HTTP-Antwort
///
/// Alle Werte auf 2 Nachkommastellen gerundet. Die Feldnamen auf dem Draht
/// sind PascalCase (`Temperature`, `Humidity`, `HeatIndex`, `AbsoluteHumidity`).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct HumitureReading {
    /// Temperatur in °C
    pub temperature: f64,
    /// Relative Luftfeuchte in %
    pub humidity: f64,
    /// Hitzeindex in °C
    pub heat_index: f64,
    /// Absolute Luftfeuchte in g/m³
    pub absolute_humidity: f64,
}
