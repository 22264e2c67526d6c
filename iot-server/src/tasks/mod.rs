// Task-Modul: Enthält die Server-Tasks
//
// Alle Tasks laufen auf einem Thread (tokio LocalSet).

pub mod http;

// Re-export Tasks für einfachen Import
pub use http::{http_server_task, make_app};
