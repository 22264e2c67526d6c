// HTTP Server Task - Serviert HTML und REST-API
use std::rc::Rc;

use iot_core::{GpioController, HumitureSensor};
use picoserve::extract::Query;
use picoserve::response::IntoResponse;
use picoserve::routing::{get, post};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::config::*;
use crate::state::AppState;
use crate::web::api::{self, LedQuery};
use crate::web::{INDEX_HTML, OPENAPI_JSON};

/// Router-Konfiguration
///
/// - `GET /` → index.html
/// - `GET /openapi.json` → API-Beschreibung
/// - `POST /api/led?color={name}` → LED setzen
/// - `GET /api/humiture` → Messwert als JSON
pub fn make_app<G, S>(
    state: &'static AppState<G, S>,
) -> picoserve::Router<impl picoserve::routing::PathRouter>
where
    G: GpioController + 'static,
    S: HumitureSensor + 'static,
{
    picoserve::Router::new()
        .route("/", get(serve_html))
        .route("/openapi.json", get(serve_openapi))
        .route(
            "/api/led",
            post(move |Query(query): Query<LedQuery>| async move {
                api::set_led_color(state, query.color.as_deref())
            }),
        )
        .route(
            "/api/humiture",
            get(move || async move { api::read_humiture(state) }),
        )
}

/// HTTP Server Task
///
/// Nimmt Connections an und bedient jede in einem eigenen lokalen Task
/// (tokio LocalSet, picoserve Futures sind nicht Send).
///
/// # Parameter
/// - `state`: geteilter Zustand (GPIO-Controller + Sensor)
/// - `listener`: gebundener TCP-Listener
pub async fn http_server_task<G, S>(
    state: &'static AppState<G, S>,
    listener: TcpListener,
) -> std::io::Result<()>
where
    G: GpioController + 'static,
    S: HumitureSensor + 'static,
{
    info!("HTTP: Server lauscht auf {}", listener.local_addr()?);

    let app = Rc::new(make_app(state));

    // Server-Konfiguration
    let config = Rc::new(
        picoserve::Config::new(picoserve::Timeouts {
            start_read_request: Some(HTTP_START_READ_TIMEOUT),
            read_request: Some(HTTP_READ_TIMEOUT),
            write: Some(HTTP_WRITE_TIMEOUT),
            persistent_start_read_request: Some(HTTP_PERSISTENT_START_READ_TIMEOUT),
        })
        .keep_connection_alive(),
    );

    loop {
        let (stream, remote_address) = listener.accept().await?;
        debug!("HTTP: Connection von {}", remote_address);

        let app = app.clone();
        let config = config.clone();

        tokio::task::spawn_local(async move {
            // HTTP-Buffer für Requests/Responses
            let mut http_buffer = [0u8; HTTP_BUFFER_SIZE];

            match picoserve::Server::new(&*app, &*config, &mut http_buffer)
                .serve(stream)
                .await
            {
                Ok(_) => debug!("HTTP: Connection von {} beendet", remote_address),
                Err(error) => warn!("HTTP: Connection von {}: {:?}", remote_address, error),
            }
        });
    }
}

/// Serviert die HTML-Hauptseite
async fn serve_html() -> impl IntoResponse {
    picoserve::response::Response::new(picoserve::response::StatusCode::OK, INDEX_HTML)
        .with_header("Content-Type", "text/html; charset=utf-8")
}

/// Serviert die OpenAPI-Beschreibung
async fn serve_openapi() -> impl IntoResponse {
    picoserve::response::Response::new(picoserve::response::StatusCode::OK, OPENAPI_JSON)
        .with_header("Content-Type", "application/json")
}

// ============================================================================
// Tests (Router + Query-Extraktion über Loopback)
// ============================================================================
