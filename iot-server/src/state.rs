// Geteilter Zustand des HTTP-Servers
//
// GPIO-Controller und Sensor werden einmal beim Start angelegt und als
// &'static AppState an die Handler übergeben. Der Server läuft auf einem
// Thread (LocalSet), daher reicht NoopRawMutex.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use iot_core::{
    Color, GpioController, GpioError, HumitureError, HumitureReading, HumitureSensor,
    LedColorSetter, LedError,
};

/// Zustand für alle Requests
pub struct AppState<G, S> {
    led: LedColorSetter,
    gpio: Mutex<NoopRawMutex, RefCell<G>>,
    sensor: Mutex<NoopRawMutex, RefCell<S>>,
}

impl<G: GpioController, S: HumitureSensor> AppState<G, S> {
    pub fn new(led: LedColorSetter, gpio: G, sensor: S) -> Self {
        Self {
            led,
            gpio: Mutex::new(RefCell::new(gpio)),
            sensor: Mutex::new(RefCell::new(sensor)),
        }
    }

    /// Exklusiver Zugriff auf den GPIO-Controller
    ///
    /// Eine komplette Farbsequenz (aus, aus, aus, an) läuft unter einem Lock.
    pub fn with_gpio<R>(&self, f: impl FnOnce(&mut G) -> R) -> R {
        self.gpio.lock(|gpio| f(&mut gpio.borrow_mut()))
    }

    /// Exklusiver Zugriff auf den Sensor
    pub fn with_sensor<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        self.sensor.lock(|sensor| f(&mut sensor.borrow_mut()))
    }

    pub fn set_color(&self, name: Option<&str>) -> Result<Color, LedError> {
        self.with_gpio(|gpio| self.led.set_color(gpio, name))
    }

    pub fn read_humiture(&self) -> Result<HumitureReading, HumitureError> {
        self.with_sensor(|sensor| iot_core::read_humiture(sensor))
    }

    /// LED aus (öffnet die drei Pins falls nötig)
    pub fn turn_off(&self) -> Result<(), GpioError> {
        self.with_gpio(|gpio| self.led.turn_off(gpio))
    }

    /// LED aus, alle LED-Pins freigeben (beim Beenden)
    pub fn release(&self) -> Result<(), GpioError> {
        self.with_gpio(|gpio| self.led.release(gpio))
    }
}

// ============================================================================
// Mocks für Tests (API-Handler und Router)
// ============================================================================

#[cfg(test)]
use std::collections::HashMap;

#[cfg(test)]
use iot_core::{PinMode, PinNumber, PinValue, SensorSample};

/// In-memory GPIO: geöffnete Pins mit aktuellem Pegel
#[cfg(test)]
#[derive(Default)]
pub struct MockGpio {
    pub levels: HashMap<PinNumber, PinValue>,
    /// open_pin() schlägt fehl
    pub fail_open: bool,
}

#[cfg(test)]
impl MockGpio {
    /// Pegel von Rot, Grün, Blau (None = nicht geöffnet)
    pub fn led_levels(&self) -> [Option<PinValue>; 3] {
        iot_core::LedPins::BOARD_DEFAULT
            .all()
            .map(|pin| self.levels.get(&pin).copied())
    }
}

#[cfg(test)]
impl GpioController for MockGpio {
    fn open_pin(&mut self, pin: PinNumber, _mode: PinMode) -> Result<(), GpioError> {
        if self.fail_open {
            return Err(GpioError::Unavailable(pin));
        }
        self.levels.insert(pin, PinValue::Low);
        Ok(())
    }

    fn close_pin(&mut self, pin: PinNumber) {
        self.levels.remove(&pin);
    }

    fn is_pin_open(&self, pin: PinNumber) -> bool {
        self.levels.contains_key(&pin)
    }

    fn write(&mut self, pin: PinNumber, value: PinValue) -> Result<(), GpioError> {
        *self.levels.get_mut(&pin).ok_or(GpioError::NotOpen(pin))? = value;
        Ok(())
    }
}

/// Sensor, der immer denselben Sample liefert
#[cfg(test)]
pub struct MockSensor(pub SensorSample);

#[cfg(test)]
impl HumitureSensor for MockSensor {
    fn read(&mut self) -> SensorSample {
        self.0
    }
}

/// Zustand mit Mocks und Standard-Pins (36/37/38, black/blank = aus)
#[cfg(test)]
pub fn mock_state(sample: SensorSample) -> AppState<MockGpio, MockSensor> {
    AppState::new(
        LedColorSetter::new(
            iot_core::LedPins::BOARD_DEFAULT,
            iot_core::OffAliases::BlackOrBlank,
        ),
        MockGpio::default(),
        MockSensor(sample),
    )
}
