// REST-API: /api/led und /api/humiture
//
// Handler-Logik ist von picoserve getrennt (testbar mit Mocks), die
// Abbildung auf HTTP passiert in ApiResponse::write_to().

use core::fmt::Write as _;

use iot_core::{GpioController, GpioError, HumitureReading, HumitureSensor, LedError};
use picoserve::io::embedded_io_async;
use picoserve::response::{IntoResponse, Response, StatusCode};
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::{ERROR_BODY_BUFFER_SIZE, JSON_HUMITURE_BUFFER_SIZE, MAX_COLOR_NAME_LEN};
use crate::state::AppState;

/// Abgelehnter Farbname für den Fehlertext (gekürzt)
pub type ColorName = heapless::String<MAX_COLOR_NAME_LEN>;

/// Query-Parameter von POST /api/led
///
/// `color` hat keine Längengrenze, damit auch überlange Namen beim
/// LedColorSetter ankommen (LED aus, dann 400).
#[derive(Debug, Deserialize)]
pub struct LedQuery {
    #[serde(default)]
    pub color: Option<String>,
}

/// Ergebnis eines API-Aufrufs
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// 204 - Farbe gesetzt
    NoContent,
    /// 400 - unbekannter Farbname (wird im Body zurückgegeben)
    UnsupportedColor(ColorName),
    /// 500 - GPIO-Zugriff fehlgeschlagen
    GpioFailure(GpioError),
    /// 200 - Messwert als JSON
    Humiture(HumitureReading),
    /// 504 - letzter Sensor-Lesevorgang fehlgeschlagen
    GatewayTimeout,
}

impl ApiResponse {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiResponse::NoContent => 204,
            ApiResponse::UnsupportedColor(_) => 400,
            ApiResponse::GpioFailure(_) => 500,
            ApiResponse::Humiture(_) => 200,
            ApiResponse::GatewayTimeout => 504,
        }
    }
}

/// POST /api/led?color={name}
pub fn set_led_color<G: GpioController, S: HumitureSensor>(
    state: &AppState<G, S>,
    color: Option<&str>,
) -> ApiResponse {
    match state.set_color(color) {
        Ok(resolved) => {
            info!("LED: Farbe gesetzt: {}", resolved.as_str());
            ApiResponse::NoContent
        }
        Err(LedError::UnsupportedColor) => {
            let requested = color.unwrap_or_default();
            info!("LED: Unbekannte Farbe abgelehnt: {:?}", requested);
            ApiResponse::UnsupportedColor(echo(requested))
        }
        Err(LedError::Gpio(error)) => {
            warn!("LED: GPIO-Fehler: {}", error);
            ApiResponse::GpioFailure(error)
        }
    }
}

/// GET /api/humiture
pub fn read_humiture<G: GpioController, S: HumitureSensor>(state: &AppState<G, S>) -> ApiResponse {
    match state.read_humiture() {
        Ok(reading) => ApiResponse::Humiture(reading),
        Err(error) => {
            warn!("Humiture: {}", error);
            ApiResponse::GatewayTimeout
        }
    }
}

/// Kopiert den abgelehnten Namen für den Fehlertext (gekürzt falls zu lang)
fn echo(name: &str) -> ColorName {
    let mut echoed = ColorName::new();
    for ch in name.chars() {
        if echoed.push(ch).is_err() {
            break;
        }
    }
    echoed
}

/// Serialisiert einen Messwert in `buffer`
///
/// Feldnamen: Temperature, Humidity, HeatIndex, AbsoluteHumidity
pub fn humiture_json<'a>(reading: &HumitureReading, buffer: &'a mut [u8]) -> Option<&'a str> {
    let n = serde_json_core::to_slice(reading, buffer).ok()?;
    core::str::from_utf8(&buffer[..n]).ok()
}

impl IntoResponse for ApiResponse {
    async fn write_to<
        R: embedded_io_async::Read,
        W: picoserve::response::ResponseWriter<Error = R::Error>,
    >(
        self,
        connection: picoserve::response::Connection<'_, R>,
        response_writer: W,
    ) -> Result<picoserve::ResponseSent, W::Error> {
        let status = StatusCode::new(self.status_code());

        match self {
            ApiResponse::NoContent | ApiResponse::GatewayTimeout => {
                Response::new(status, "")
                    .write_to(connection, response_writer)
                    .await
            }
            ApiResponse::UnsupportedColor(color) => {
                let mut body = heapless::String::<ERROR_BODY_BUFFER_SIZE>::new();
                let _ = write!(body, "Unsupported color: {}", color);
                Response::new(status, body.as_str())
                    .write_to(connection, response_writer)
                    .await
            }
            ApiResponse::GpioFailure(error) => {
                let mut body = heapless::String::<ERROR_BODY_BUFFER_SIZE>::new();
                let _ = write!(body, "GPIO failure: {}", error);
                Response::new(status, body.as_str())
                    .write_to(connection, response_writer)
                    .await
            }
            ApiResponse::Humiture(reading) => {
                let mut json_buffer = [0u8; JSON_HUMITURE_BUFFER_SIZE];
                match humiture_json(&reading, &mut json_buffer) {
                    Some(json) => {
                        Response::new(status, json)
                            .with_header("Content-Type", "application/json")
                            .write_to(connection, response_writer)
                            .await
                    }
                    None => {
                        Response::new(StatusCode::new(500), "JSON serialization failed")
                            .write_to(connection, response_writer)
                            .await
                    }
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use iot_core::{PinValue, SensorSample};

    use super::*;
    use crate::state::mock_state as state;

    #[test]
    fn test_set_led_color_red() {
        let state = state(SensorSample::failed());

        let response = set_led_color(&state, Some("RED"));

        assert_eq!(response, ApiResponse::NoContent);
        assert_eq!(response.status_code(), 204);
        state.with_gpio(|gpio| {
            assert_eq!(gpio.levels[&36], PinValue::High);
            assert_eq!(gpio.levels[&37], PinValue::Low);
            assert_eq!(gpio.levels[&38], PinValue::Low);
        });
    }

    #[test]
    fn test_set_led_color_absent_and_aliases() {
        let state = state(SensorSample::failed());

        for color in [None, Some(""), Some("black"), Some("blank")] {
            set_led_color(&state, Some("green"));
            assert_eq!(set_led_color(&state, color), ApiResponse::NoContent);
            state.with_gpio(|gpio| {
                assert!(gpio.levels.values().all(|v| *v == PinValue::Low));
            });
        }
    }

    #[test]
    fn test_set_led_color_unsupported_echoes_value() {
        let state = state(SensorSample::failed());

        let response = set_led_color(&state, Some("purple"));

        assert_eq!(response.status_code(), 400);
        match response {
            ApiResponse::UnsupportedColor(name) => assert_eq!(name.as_str(), "purple"),
            other => panic!("Expected UnsupportedColor, got {other:?}"),
        }
    }

    #[test]
    fn test_set_led_color_gpio_failure() {
        let state = state(SensorSample::failed());
        state.with_gpio(|gpio| gpio.fail_open = true);

        let response = set_led_color(&state, Some("blue"));

        assert_eq!(response, ApiResponse::GpioFailure(GpioError::Unavailable(36)));
        assert_eq!(response.status_code(), 500);
    }

    #[test]
    fn test_echo_truncates() {
        let long = "x".repeat(MAX_COLOR_NAME_LEN + 10);
        assert_eq!(echo(&long).len(), MAX_COLOR_NAME_LEN);
    }

    #[test]
    fn test_read_humiture_success() {
        let state = state(SensorSample::success(22.456, 55.231));

        let response = read_humiture(&state);

        assert_eq!(response.status_code(), 200);
        match response {
            ApiResponse::Humiture(reading) => {
                assert_eq!(reading.temperature, 22.46);
                assert_eq!(reading.humidity, 55.23);
            }
            other => panic!("Expected Humiture, got {other:?}"),
        }
    }

    #[test]
    fn test_read_humiture_timeout() {
        let state = state(SensorSample::failed());

        let response = read_humiture(&state);

        assert_eq!(response, ApiResponse::GatewayTimeout);
        assert_eq!(response.status_code(), 504);
    }

    #[test]
    fn test_humiture_json_field_names() {
        let reading = HumitureReading {
            temperature: 22.46,
            humidity: 55.23,
            heat_index: 22.2,
            absolute_humidity: 11.01,
        };
        let mut buffer = [0u8; JSON_HUMITURE_BUFFER_SIZE];

        let json = humiture_json(&reading, &mut buffer).unwrap();

        assert_eq!(
            json,
            r#"{"Temperature":22.46,"Humidity":55.23,"HeatIndex":22.2,"AbsoluteHumidity":11.01}"#
        );
    }

    #[test]
    fn test_humiture_json_buffer_too_small() {
        let reading = HumitureReading {
            temperature: -12.34,
            humidity: 99.99,
            heat_index: -13.5,
            absolute_humidity: 1.89,
        };
        let mut buffer = [0u8; 16];

        assert_eq!(humiture_json(&reading, &mut buffer), None);
    }
}
