use std::path::PathBuf;

pub struct Config {
    /// JSON file holding every binder. Created on first start.
    pub data_file: PathBuf,
    pub listen_addr: String,
    /// Comma-separated allowed CORS origins. If empty or "*", allows all origins (dev mode).
    pub cors_origins: String,
    pub tcgdex_base_url: String,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            data_file: std::env::var("DATA_FILE")
                .unwrap_or_else(|_| "collection.json".to_string())
                .into(),
            listen_addr: std::env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            cors_origins: std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()),
            tcgdex_base_url: std::env::var("TCGDEX_BASE_URL")
                .unwrap_or_else(|_| "https://api.tcgdex.net/v2".to_string()),
            log_filter: std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "binderdex_server=debug,tower_http=debug".to_string()),
        }
    }
}
