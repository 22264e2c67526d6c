// Library-Root: Wiederverwendbare Logik und Module

// Module
pub mod config;
pub mod hal;
pub mod state;
pub mod tasks;
pub mod web;

// Re-exports von iot-core
pub use iot_core::{
    Color, GpioController, GpioError, HumitureReading, HumitureSensor, LedColorSetter, LedError,
};

pub use state::AppState;

use hal::{Dht22, RppalDhtLine, RppalGpioController};

/// Zustand mit der echten Hardware (Raspberry Pi)
pub type HardwareState = AppState<RppalGpioController, Dht22<RppalDhtLine>>;
