//! Pin-Nummerierung der 40-Pin-Stiftleiste (Raspberry Pi)

use crate::types::{PinNumber, PinNumberingScheme};

/// Zuordnung physische Position → BCM GPIO
///
/// Index = Board-Pin (1..=40), `None` für Versorgung, Masse und ID-EEPROM.
const BOARD_TO_BCM: [Option<u8>; 41] = [
    None,     // 0 (existiert nicht)
    None,     // 1  3V3
    None,     // 2  5V
    Some(2),  // 3
    None,     // 4  5V
    Some(3),  // 5
    None,     // 6  GND
    Some(4),  // 7
    Some(14), // 8
    None,     // 9  GND
    Some(15), // 10
    Some(17), // 11
    Some(18), // 12
    Some(27), // 13
    None,     // 14 GND
    Some(22), // 15
    Some(23), // 16
    None,     // 17 3V3
    Some(24), // 18
    Some(10), // 19
    None,     // 20 GND
    Some(9),  // 21
    Some(25), // 22
    Some(11), // 23
    Some(8),  // 24
    None,     // 25 GND
    Some(7),  // 26
    None,     // 27 ID_SD
    None,     // 28 ID_SC
    Some(5),  // 29
    None,     // 30 GND
    Some(6),  // 31
    Some(12), // 32
    Some(13), // 33
    None,     // 34 GND
    Some(19), // 35
    Some(16), // 36
    Some(26), // 37
    Some(20), // 38
    None,     // 39 GND
    Some(21), // 40
];

/// Höchste BCM-Nummer, die auf der Stiftleiste herausgeführt ist
const MAX_LOGICAL_PIN: u8 = 27;

/// Physische Position auf der Stiftleiste → BCM GPIO-Nummer
///
/// # Beispiele
///
/// ```
/// # use iot_core::board_to_bcm;
/// assert_eq!(board_to_bcm(36), Some(16));
/// assert_eq!(board_to_bcm(6), None); // GND
/// ```
pub fn board_to_bcm(board_pin: PinNumber) -> Option<u8> {
    BOARD_TO_BCM.get(usize::from(board_pin)).copied().flatten()
}

/// Übersetzt eine Pin-Nummer des gegebenen Schemas in die BCM GPIO-Nummer
pub fn to_logical(pin: PinNumber, scheme: PinNumberingScheme) -> Option<u8> {
    match scheme {
        PinNumberingScheme::Board => board_to_bcm(pin),
        PinNumberingScheme::Logical => (pin <= MAX_LOGICAL_PIN).then_some(pin),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_led_and_sensor_pins() {
        assert_eq!(board_to_bcm(36), Some(16));
        assert_eq!(board_to_bcm(37), Some(26));
        assert_eq!(board_to_bcm(38), Some(20));
        assert_eq!(board_to_bcm(7), Some(4));
    }

    #[test]
    fn test_power_and_ground_pins() {
        for pin in [1, 2, 4, 6, 9, 14, 17, 20, 25, 30, 34, 39] {
            assert_eq!(board_to_bcm(pin), None, "board pin {pin}");
        }
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(board_to_bcm(0), None);
        assert_eq!(board_to_bcm(41), None);
        assert_eq!(board_to_bcm(255), None);
    }

    #[test]
    fn test_mapping_is_unique() {
        let mut seen = [false; 28];
        for pin in 1..=40 {
            if let Some(bcm) = board_to_bcm(pin) {
                assert!(!seen[usize::from(bcm)], "bcm {bcm} mapped twice");
                seen[usize::from(bcm)] = true;
            }
        }
        // GPIO 0 und 1 sind für das ID-EEPROM reserviert
        assert!(seen[2..].iter().all(|s| *s));
    }

    #[test]
    fn test_to_logical() {
        assert_eq!(to_logical(36, PinNumberingScheme::Board), Some(16));
        assert_eq!(to_logical(16, PinNumberingScheme::Logical), Some(16));
        assert_eq!(to_logical(36, PinNumberingScheme::Logical), None);
    }
}
