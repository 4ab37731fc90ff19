//! Server configuration from environment variables.

use std::path::PathBuf;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATA_FILE: &str = "data/eventos.json";

pub struct ServerConfig {
    pub port: u16,
    pub data_file: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let data_file = std::env::var("CYBEREVENTS_DATA")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_FILE));

        ServerConfig { port, data_file }
    }
}
