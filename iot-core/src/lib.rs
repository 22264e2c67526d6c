//! IoT Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert nur Traits, Pure Functions und die Wetter-Formeln.

#![no_std]

pub mod dht;
pub mod logic;
pub mod pins;
pub mod traits;
pub mod types;
pub mod weather;

// Re-exports für einfachen Zugriff
pub use logic::{
    HumitureError, LedColorSetter, LedError, UnsupportedColorError, read_humiture,
    resolve_color, round2, set_pin,
};
pub use pins::{board_to_bcm, to_logical};
pub use traits::{GpioController, GpioError, HumitureSensor};
pub use types::{
    Color, HumitureReading, LedPins, OffAliases, PinMode, PinNumber, PinNumberingScheme,
    PinValue, SensorSample,
};
