// Web-Modul für HTTP Server
// Organisiert alle Web-bezogenen Komponenten

pub mod api;

// Statische Dateien zur Compile-Zeit einbinden
// Die Dateien werden direkt ins Binary eingebettet
pub const INDEX_HTML: &str = include_str!("index.html");
pub const OPENAPI_JSON: &str = include_str!("openapi.json");
