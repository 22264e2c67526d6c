// Minimal IoT - HTTP-Server für RGB LED und DHT22 auf dem Raspberry Pi

use anyhow::Context;
use rppal::gpio::Gpio;
use static_cell::StaticCell;
use tokio::net::TcpListener;
use tracing::{error, info};

// Projekt-Module und Konfiguration
use minimal_iot::config::{
    DHT_BIT_THRESHOLD_US, DHT_EDGE_TIMEOUT, DHT_MIN_READ_INTERVAL, DHT_START_SIGNAL,
    HTTP_BIND_ADDR, HTTP_PORT, LED_PINS, LOG_LEVEL, OFF_ALIASES, PIN_NUMBERING, SENSOR_PIN,
};
use minimal_iot::hal::{Dht22, DhtTiming, RppalDhtLine, RppalGpioController};
use minimal_iot::tasks::http_server_task;
use minimal_iot::{AppState, HardwareState, LedColorSetter};

/// Main Entry Point
///
/// Initialisiert Logging und Hardware, startet den HTTP-Server und wartet
/// auf Ctrl-C. Beim Beenden wird die LED ausgeschaltet und alle Pins
/// freigegeben.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(LOG_LEVEL)
        .with_target(false)
        .init();

    info!(
        "Start: LED Pins {:?}, Sensor Pin {}, Nummerierung {:?}",
        LED_PINS, SENSOR_PIN, PIN_NUMBERING
    );

    // GPIO Hardware initialisieren
    let gpio = Gpio::new().context("GPIO nicht verfügbar (/dev/gpiomem)")?;

    let sensor_line = RppalDhtLine::new(
        &gpio,
        SENSOR_PIN,
        PIN_NUMBERING,
        DhtTiming {
            start_signal: DHT_START_SIGNAL,
            edge_timeout: DHT_EDGE_TIMEOUT,
            bit_threshold_us: DHT_BIT_THRESHOLD_US,
        },
    )
    .with_context(|| format!("DHT22 Datenleitung (Pin {}) nicht verfügbar", SENSOR_PIN))?;
    let sensor = Dht22::new(sensor_line, DHT_MIN_READ_INTERVAL);

    let controller = RppalGpioController::new(gpio, PIN_NUMBERING);

    // Zustand muss 'static sein für die Handler
    static STATE: StaticCell<HardwareState> = StaticCell::new();
    let state: &'static HardwareState = STATE.init(AppState::new(
        LedColorSetter::new(LED_PINS, OFF_ALIASES),
        controller,
        sensor,
    ));

    // LED definiert ausschalten (öffnet die drei Pins)
    if let Err(e) = state.turn_off() {
        error!("LED: Initialisierung fehlgeschlagen: {}", e);
    }

    let listener = TcpListener::bind((HTTP_BIND_ADDR, HTTP_PORT))
        .await
        .with_context(|| format!("Bind auf {}:{} fehlgeschlagen", HTTP_BIND_ADDR, HTTP_PORT))?;

    // Server läuft bis Ctrl-C oder bis accept() fehlschlägt
    let served = tokio::task::LocalSet::new()
        .run_until(async {
            tokio::select! {
                result = http_server_task(state, listener) => result,
                _ = tokio::signal::ctrl_c() => {
                    info!("Beenden angefordert");
                    Ok(())
                }
            }
        })
        .await;

    // Pins freigeben
    match state.release() {
        Ok(()) => info!("LED aus, Pins freigegeben"),
        Err(e) => error!("Freigeben der Pins fehlgeschlagen: {}", e),
    }

    served.context("HTTP-Server beendet")
}
