// DHT22 Treiber (Bit-Banging über rppal)
//
// Aufteilung wie beim LED-Writer: FrameReader kapselt die Leitung,
// Dht22 enthält die testbare Logik (Mindestabstand, letzter Messwert).

use std::time::{Duration, Instant};

use iot_core::dht::{DhtError, DhtMeasurement, FRAME_BITS, bits_to_frame, decode_frame};
use iot_core::{GpioError, HumitureSensor, PinNumber, PinNumberingScheme, SensorSample};
use tracing::{debug, warn};

/// Trait für das Lesen eines kompletten DHT-Frames von der Datenleitung
///
/// # Implementierungen
/// - **Production:** RppalDhtLine (Bit-Banging über rppal IoPin)
/// - **Testing:** MockFrameReader (vorgegebene Ergebnisse)
pub trait FrameReader {
    fn read_frame(&mut self) -> Result<DhtMeasurement, DhtError>;
}

/// DHT22 Sensor mit Mindestabstand zwischen zwei Messungen
///
/// Der Sensor liefert frühestens alle 2 s einen neuen Wert. Aufrufe dazwischen
/// bekommen den zuletzt gelesenen [`SensorSample`] (inkl. Erfolgs-Flag).
pub struct Dht22<L: FrameReader> {
    line: L,
    min_read_interval: Duration,
    last_read_at: Option<Instant>,
    last_sample: SensorSample,
}

impl<L: FrameReader> Dht22<L> {
    pub fn new(line: L, min_read_interval: Duration) -> Self {
        Self {
            line,
            min_read_interval,
            last_read_at: None,
            last_sample: SensorSample::failed(),
        }
    }
}

impl<L: FrameReader> HumitureSensor for Dht22<L> {
    fn read(&mut self) -> SensorSample {
        if let Some(at) = self.last_read_at {
            if at.elapsed() < self.min_read_interval {
                debug!("DHT22: Mindestabstand nicht erreicht, liefere letzten Wert");
                return self.last_sample;
            }
        }

        self.last_read_at = Some(Instant::now());
        self.last_sample = match self.line.read_frame() {
            Ok(measurement) => {
                debug!(
                    "DHT22: {} °C, {} %",
                    measurement.temperature_celsius, measurement.humidity_percent
                );
                SensorSample::success(measurement.temperature_celsius, measurement.humidity_percent)
            }
            Err(e) => {
                warn!("DHT22: Lesen fehlgeschlagen: {}", e);
                SensorSample {
                    last_read_successful: false,
                    ..self.last_sample
                }
            }
        };

        self.last_sample
    }
}

// ============================================================================
// Real Hardware Implementation (rppal)
// ============================================================================

/// Timing-Parameter für das Bit-Banging
#[derive(Debug, Clone, Copy)]
pub struct DhtTiming {
    pub start_signal: Duration,
    pub edge_timeout: Duration,
    pub bit_threshold_us: u32,
}

mod real_impl {
    use super::*;
    use rppal::gpio::{Gpio, IoPin, Level, Mode};

    /// Datenleitung des DHT22 an einem rppal IoPin
    ///
    /// Die Leitung braucht einen Pull-Up (auf den üblichen Modulen bestückt).
    pub struct RppalDhtLine {
        pin: IoPin,
        timing: DhtTiming,
    }

    impl RppalDhtLine {
        /// Öffnet die Datenleitung
        ///
        /// # Parameter
        /// - `gpio`: rppal GPIO-Instanz
        /// - `pin`: Pin-Nummer im Schema `numbering`
        /// - `timing`: Timing-Parameter (siehe config.rs)
        pub fn new(
            gpio: &Gpio,
            pin: PinNumber,
            numbering: PinNumberingScheme,
            timing: DhtTiming,
        ) -> Result<Self, GpioError> {
            let bcm = iot_core::to_logical(pin, numbering).ok_or(GpioError::InvalidPin(pin))?;
            let pin = gpio
                .get(bcm)
                .map_err(|e| {
                    warn!("DHT22: Pin {} (BCM {}) nicht verfügbar: {}", pin, bcm, e);
                    GpioError::Unavailable(pin)
                })?
                .into_io(Mode::Input);

            Ok(Self { pin, timing })
        }

        /// Wartet bis die Leitung `level` hat und liefert die Wartezeit in µs
        fn wait_for(&self, level: Level) -> Result<u32, DhtError> {
            let start = Instant::now();
            while self.pin.read() != level {
                if start.elapsed() > self.timing.edge_timeout {
                    return Err(DhtError::Timeout);
                }
            }
            Ok(u32::try_from(start.elapsed().as_micros()).unwrap_or(u32::MAX))
        }
    }

    impl FrameReader for RppalDhtLine {
        fn read_frame(&mut self) -> Result<DhtMeasurement, DhtError> {
            // Startsignal: Leitung low halten, dann freigeben (Pull-Up zieht high)
            self.pin.set_mode(Mode::Output);
            self.pin.set_low();
            std::thread::sleep(self.timing.start_signal);
            self.pin.set_high();
            self.pin.set_mode(Mode::Input);

            // Antwort des Sensors: ~80 µs low, ~80 µs high
            self.wait_for(Level::Low).map_err(|_| DhtError::NoResponse)?;
            self.wait_for(Level::High).map_err(|_| DhtError::NoResponse)?;
            self.wait_for(Level::Low).map_err(|_| DhtError::NoResponse)?;

            // 40 Bit: jeweils ~50 µs low, danach High-Puls mit Bit-Information
            let mut high_durations = [0u32; FRAME_BITS];
            for duration in high_durations.iter_mut() {
                self.wait_for(Level::High)?;
                *duration = self.wait_for(Level::Low)?;
            }

            decode_frame(bits_to_frame(&high_durations, self.timing.bit_threshold_us))
        }
    }
}

pub use real_impl::RppalDhtLine;

// ============================================================================
// Mock Implementation (nur für Tests)
// ============================================================================

#[cfg(test)]
pub struct MockFrameReader {
    /// Ergebnis des nächsten read_frame()
    pub next: Result<DhtMeasurement, DhtError>,
    /// Anzahl der read_frame() Aufrufe
    pub read_count: usize,
}

#[cfg(test)]
impl MockFrameReader {
    pub fn new(next: Result<DhtMeasurement, DhtError>) -> Self {
        Self {
            next,
            read_count: 0,
        }
    }
}

#[cfg(test)]
impl FrameReader for MockFrameReader {
    fn read_frame(&mut self) -> Result<DhtMeasurement, DhtError> {
        self.read_count += 1;
        self.next
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const MEASUREMENT: DhtMeasurement = DhtMeasurement {
        temperature_celsius: 22.4,
        humidity_percent: 55.2,
    };

    #[test]
    fn test_successful_read() {
        let mut sensor = Dht22::new(MockFrameReader::new(Ok(MEASUREMENT)), Duration::ZERO);

        assert_eq!(sensor.read(), SensorSample::success(22.4, 55.2));
    }

    #[test]
    fn test_failed_read_before_first_success() {
        let mut sensor = Dht22::new(
            MockFrameReader::new(Err(DhtError::Checksum)),
            Duration::ZERO,
        );

        assert!(!sensor.read().last_read_successful);
    }

    #[test]
    fn test_failed_read_keeps_last_values_but_clears_flag() {
        let mut sensor = Dht22::new(MockFrameReader::new(Ok(MEASUREMENT)), Duration::ZERO);
        sensor.read();

        sensor.line.next = Err(DhtError::Timeout);
        let sample = sensor.read();

        assert!(!sample.last_read_successful);
        assert_eq!(sample.temperature_celsius, 22.4);
    }

    #[test]
    fn test_min_interval_returns_cached_sample() {
        let mut sensor = Dht22::new(
            MockFrameReader::new(Ok(MEASUREMENT)),
            Duration::from_secs(3600),
        );

        let first = sensor.read();
        sensor.line.next = Err(DhtError::NoResponse);
        let second = sensor.read();

        assert_eq!(first, second);
        assert_eq!(sensor.line.read_count, 1);
    }

    #[test]
    fn test_zero_interval_reads_every_time() {
        let mut sensor = Dht22::new(MockFrameReader::new(Ok(MEASUREMENT)), Duration::ZERO);

        sensor.read();
        sensor.read();
        sensor.read();

        assert_eq!(sensor.line.read_count, 3);
    }
}
