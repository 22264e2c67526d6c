// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen

use std::time::Duration;

use iot_core::{LedPins, OffAliases, PinNumber, PinNumberingScheme};
use tracing::Level;

// ============================================================================
// GPIO Konfiguration
// ============================================================================

/// Nummerierungsschema für alle Pin-Konstanten in dieser Datei
/// Board = physische Position auf der 40-Pin-Stiftleiste
pub const PIN_NUMBERING: PinNumberingScheme = PinNumberingScheme::Board;

/// Pins der RGB LED (Rot 36, Grün 37, Blau 38)
pub const LED_PINS: LedPins = LedPins::BOARD_DEFAULT;

/// Datenleitung des DHT22
pub const SENSOR_PIN: PinNumber = 7;

/// Farbnamen, die die LED ausschalten
/// Variante mit Sensor: "black" und "blank"
pub const OFF_ALIASES: OffAliases = OffAliases::BlackOrBlank;

// ============================================================================
// DHT22 Konfiguration
// ============================================================================

/// Dauer des Startsignals (Leitung low), Datenblatt: mindestens 1 ms
pub const DHT_START_SIGNAL: Duration = Duration::from_micros(1_100);

/// Maximale Wartezeit auf eine Flanke
/// Längster regulärer Puls ist ~80 µs, Reserve für Scheduler-Jitter
pub const DHT_EDGE_TIMEOUT: Duration = Duration::from_micros(500);

/// Schwelle zwischen 0-Bit (~27 µs high) und 1-Bit (~70 µs high)
pub const DHT_BIT_THRESHOLD_US: u32 = 48;

/// Mindestabstand zwischen zwei physischen Messungen
/// Schnellere Aufrufe bekommen den zuletzt gelesenen Wert
pub const DHT_MIN_READ_INTERVAL: Duration = Duration::from_secs(2);

// ============================================================================
// HTTP Server Konfiguration
// ============================================================================

/// Bind-Adresse des HTTP-Servers
/// Kann zur Build-Zeit über HTTP_BIND_ADDR in .env überschrieben werden
pub const HTTP_BIND_ADDR: &str = match option_env!("HTTP_BIND_ADDR") {
    Some(addr) => addr,
    None => "0.0.0.0",
};

/// HTTP Port
/// Kann zur Build-Zeit über HTTP_PORT in .env überschrieben werden
pub const HTTP_PORT: u16 = match option_env!("HTTP_PORT") {
    Some(port) => parse_port(port),
    None => 8080,
};

/// HTTP Buffer-Größe in Bytes (pro Connection)
/// Für HTTP Request/Response Headers und Body
pub const HTTP_BUFFER_SIZE: usize = 2048;

/// Timeout bis zum ersten Byte eines Requests
pub const HTTP_START_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout zwischen zwei Requests auf einer Keep-Alive Connection
pub const HTTP_PERSISTENT_START_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout für das Lesen des restlichen Requests
pub const HTTP_READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Timeout für das Schreiben der Response
pub const HTTP_WRITE_TIMEOUT: Duration = Duration::from_secs(1);

/// JSON Serialisierungs-Buffer für /api/humiture
/// Für {"Temperature":..,"Humidity":..,"HeatIndex":..,"AbsoluteHumidity":..}
pub const JSON_HUMITURE_BUFFER_SIZE: usize = 160;

/// Maximale Länge des zurückgegebenen Farbnamens im 400-Body
/// Längere Werte werden gekürzt
pub const MAX_COLOR_NAME_LEN: usize = 32;

/// Buffer für Fehlertexte (plain text Body)
pub const ERROR_BODY_BUFFER_SIZE: usize = 96;

// ============================================================================
// Logging
// ============================================================================

/// Maximales Log-Level
pub const LOG_LEVEL: Level = Level::INFO;

/// Parst eine Portnummer zur Compile-Zeit
const fn parse_port(value: &str) -> u16 {
    let bytes = value.as_bytes();
    assert!(!bytes.is_empty(), "HTTP_PORT ist leer");

    let mut port: u32 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let digit = bytes[i];
        assert!(digit.is_ascii_digit(), "HTTP_PORT muss eine Zahl sein");
        port = port * 10 + (digit - b'0') as u32;
        assert!(port <= u16::MAX as u32, "HTTP_PORT ist zu groß");
        i += 1;
    }
    port as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("80"), 80);
        assert_eq!(parse_port("65535"), 65535);
    }

    #[test]
    fn test_pins_are_on_header() {
        for pin in LED_PINS.all().into_iter().chain([SENSOR_PIN]) {
            assert!(iot_core::to_logical(pin, PIN_NUMBERING).is_some(), "pin {pin}");
        }
    }

    #[test]
    fn test_pins_are_distinct() {
        let [red, green, blue] = LED_PINS.all();
        let pins = [red, green, blue, SENSOR_PIN];
        for (i, a) in pins.iter().enumerate() {
            for b in &pins[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_dht_timing() {
        assert!(DHT_START_SIGNAL >= Duration::from_millis(1));
        assert!(u128::from(DHT_BIT_THRESHOLD_US) < DHT_EDGE_TIMEOUT.as_micros());
    }
}
