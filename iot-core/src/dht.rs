//! DHT22 (AM2302) Frame-Dekodierung
//!
//! Der Sensor sendet 40 Bit: 16 Bit Feuchte, 16 Bit Temperatur, 8 Bit
//! Prüfsumme. Jedes Bit beginnt mit ~50 µs low; die Länge des folgenden
//! High-Pulses entscheidet über den Wert (~27 µs = 0, ~70 µs = 1).
//! Das Timing-Capture selbst ist Hardware-Sache, hier liegt nur die
//! Auswertung.

use core::fmt;

/// Anzahl Datenbits pro Frame
pub const FRAME_BITS: usize = 40;

/// Fehler beim Lesen eines DHT-Frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DhtError {
    /// Sensor hat auf das Startsignal nicht geantwortet
    NoResponse,
    /// Flanke kam nicht rechtzeitig (Frame abgebrochen)
    Timeout,
    /// Prüfsumme stimmt nicht
    Checksum,
    /// Werte außerhalb des Messbereichs
    InvalidData,
}

impl fmt::Display for DhtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DhtError::NoResponse => f.write_str("no response from sensor"),
            DhtError::Timeout => f.write_str("timed out waiting for signal edge"),
            DhtError::Checksum => f.write_str("checksum mismatch"),
            DhtError::InvalidData => f.write_str("value out of range"),
        }
    }
}

impl core::error::Error for DhtError {}

/// Dekodierter Messwert
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DhtMeasurement {
    pub temperature_celsius: f64,
    pub humidity_percent: f64,
}

/// Setzt 40 gemessene High-Pulsdauern zu 5 Bytes zusammen (MSB zuerst)
///
/// Pulse länger als `threshold_us` sind eine 1.
pub fn bits_to_frame(high_durations_us: &[u32; FRAME_BITS], threshold_us: u32) -> [u8; 5] {
    let mut frame = [0u8; 5];
    for (index, duration) in high_durations_us.iter().enumerate() {
        if *duration > threshold_us {
            frame[index / 8] |= 0x80 >> (index % 8);
        }
    }
    frame
}

/// Prüft die Prüfsumme und rechnet die Rohwerte um
///
/// # Beispiele
///
/// ```
/// # use iot_core::dht::decode_frame;
/// // 65.2 %, 35.1 °C
/// let m = decode_frame([0x02, 0x8C, 0x01, 0x5F, 0xEE]).unwrap();
/// assert_eq!(m.humidity_percent, 65.2);
/// assert_eq!(m.temperature_celsius, 35.1);
/// ```
pub fn decode_frame(frame: [u8; 5]) -> Result<DhtMeasurement, DhtError> {
    let sum = frame[..4]
        .iter()
        .fold(0u8, |acc, byte| acc.wrapping_add(*byte));
    if sum != frame[4] {
        return Err(DhtError::Checksum);
    }

    let humidity_raw = u16::from_be_bytes([frame[0], frame[1]]);
    let temperature_raw = u16::from_be_bytes([frame[2] & 0x7F, frame[3]]);

    let humidity = f64::from(humidity_raw) / 10.0;
    let mut temperature = f64::from(temperature_raw) / 10.0;
    // Höchstes Bit = Vorzeichen
    if frame[2] & 0x80 != 0 {
        temperature = -temperature;
    }

    if humidity > 100.0 || !(-40.0..=80.0).contains(&temperature) {
        return Err(DhtError::InvalidData);
    }

    Ok(DhtMeasurement {
        temperature_celsius: temperature,
        humidity_percent: humidity,
    })
}
