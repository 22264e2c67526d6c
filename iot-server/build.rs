// Build-Script: Wird vor dem Kompilieren ausgeführt
// Backt optionale Deployment-Einstellungen aus .env in das Binary ein

/// Variablen, die aus .env an den Compiler weitergereicht werden
const FORWARDED_VARS: [&str; 2] = ["HTTP_PORT", "HTTP_BIND_ADDR"];

fn main() {
    // Lade .env file
    // Fehler ignorieren wenn .env nicht existiert (dann gelten die Defaults aus config.rs)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!(".env file nicht gefunden: {}", e);
        eprintln!("   Nutze Defaults aus config.rs (HTTP_PORT, HTTP_BIND_ADDR)");
    }

    // Gebe die Werte an den Rust-Compiler weiter
    // Die Werte werden zur Compile-Zeit in den Code eingebacken (option_env!)
    for var in FORWARDED_VARS {
        println!("cargo:rerun-if-env-changed={var}");
        if let Ok(value) = std::env::var(var) {
            println!("cargo:rustc-env={var}={value}");
        }
    }

    println!("cargo:rerun-if-changed=.env");
}
