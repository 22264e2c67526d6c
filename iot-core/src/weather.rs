//! Wetter-Formeln
//!
//! Hitzeindex nach NWS (Steadman / Rothfusz) und absolute Luftfeuchte über
//! den Sättigungsdampfdruck nach Arden Buck. Alle Temperaturen in °C,
//! relative Feuchte in Prozent (0..=100).

/// Spezifische Gaskonstante von Wasserdampf in J/(kg·K)
const WATER_VAPOR_GAS_CONSTANT: f64 = 461.5;

/// Nullpunkt der Celsius-Skala in Kelvin
const KELVIN_OFFSET: f64 = 273.15;

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Gefühlte Temperatur in °C
///
/// Unter ca. 80 °F gilt Steadmans einfache Formel, darüber die
/// Rothfusz-Regression inkl. der beiden NWS-Korrekturen für sehr trockene
/// bzw. sehr feuchte Luft.
pub fn heat_index_celsius(temperature_celsius: f64, humidity_percent: f64) -> f64 {
    let tf = celsius_to_fahrenheit(temperature_celsius);
    let rh = humidity_percent;

    let steadman = 0.5 * (tf + 61.0 + (tf - 68.0) * 1.2 + rh * 0.094);
    if steadman + tf < 160.0 {
        return fahrenheit_to_celsius(steadman);
    }

    let tf2 = tf * tf;
    let rh2 = rh * rh;
    let mut rothfusz = -42.379 + 2.049_015_23 * tf + 10.143_331_27 * rh
        - 0.224_755_41 * tf * rh
        - 6.837_83e-3 * tf2
        - 5.481_717e-2 * rh2
        + 1.228_74e-3 * tf2 * rh
        + 8.528_2e-4 * tf * rh2
        - 1.99e-6 * tf2 * rh2;

    if rh < 13.0 && (80.0..=112.0).contains(&tf) {
        rothfusz -= ((13.0 - rh) / 4.0) * libm::sqrt((17.0 - libm::fabs(tf - 95.0)) / 17.0);
    } else if rh > 85.0 && (80.0..=87.0).contains(&tf) {
        rothfusz += ((rh - 85.0) / 10.0) * ((87.0 - tf) / 5.0);
    }

    fahrenheit_to_celsius(rothfusz)
}

/// Sättigungsdampfdruck über Wasser in Pascal (Arden Buck, -80..50 °C)
pub fn saturated_vapor_pressure(temperature_celsius: f64) -> f64 {
    let t = temperature_celsius;
    611.21 * libm::exp((18.678 - t / 234.5) * (t / (257.14 + t)))
}

/// Tatsächlicher Dampfdruck in Pascal
pub fn actual_vapor_pressure(temperature_celsius: f64, humidity_percent: f64) -> f64 {
    humidity_percent / 100.0 * saturated_vapor_pressure(temperature_celsius)
}

/// Absolute Luftfeuchte in g/m³ (ideales Gas)
pub fn absolute_humidity(temperature_celsius: f64, humidity_percent: f64) -> f64 {
    let pascals = actual_vapor_pressure(temperature_celsius, humidity_percent);
    pascals / ((temperature_celsius + KELVIN_OFFSET) * WATER_VAPOR_GAS_CONSTANT) * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            libm::fabs(actual - expected) < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_temperature_conversion() {
        assert_close(celsius_to_fahrenheit(100.0), 212.0);
        assert_close(celsius_to_fahrenheit(-40.0), -40.0);
        assert_close(fahrenheit_to_celsius(32.0), 0.0);
    }

    #[test]
    fn test_heat_index_steadman_range() {
        assert_close(heat_index_celsius(22.456, 55.231), 22.1993);
        assert_close(heat_index_celsius(20.0, 50.0), 19.3611);
    }

    #[test]
    fn test_heat_index_rothfusz_range() {
        assert_close(heat_index_celsius(32.0, 70.0), 40.4093);
    }

    #[test]
    fn test_heat_index_dry_adjustment() {
        assert_close(heat_index_celsius(35.0, 10.0), 31.9164);
    }

    #[test]
    fn test_heat_index_humid_adjustment() {
        assert_close(heat_index_celsius(30.0, 90.0), 40.7746);
    }

    #[test]
    fn test_saturated_vapor_pressure_at_freezing() {
        assert_close(saturated_vapor_pressure(0.0), 611.21);
    }

    #[test]
    fn test_absolute_humidity() {
        assert_close(absolute_humidity(22.456, 55.231), 11.0065);
        assert_close(absolute_humidity(32.0, 70.0), 23.6481);
        assert_close(absolute_humidity(-10.0, 80.0), 1.8877);
        assert_close(absolute_humidity(25.0, 0.0), 0.0);
    }
}
