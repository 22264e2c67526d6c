// Hardware Abstraction Layer (HAL) Module
//
// Dieses Modul kapselt Hardware-Zugriffe hinter den Traits aus iot-core,
// um Testbarkeit und Wartbarkeit zu verbessern.

pub mod dht22;
pub mod gpio;

pub use dht22::{Dht22, DhtTiming, FrameReader, RppalDhtLine};
pub use gpio::RppalGpioController;
