use std::env;
use std::net::SocketAddr;

const PORT_ENV: &str = "PORT";
const ALLOWED_ORIGINS_ENV: &str = "SIGNALING_ALLOWED_ORIGINS";
const DEFAULT_PORT: u16 = 8080;

/// Runtime configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = env::var(PORT_ENV)
            .ok()
            .and_then(|raw| parse_port(&raw))
            .unwrap_or(DEFAULT_PORT);
        let allowed_origins = env::var(ALLOWED_ORIGINS_ENV)
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], port)),
            allowed_origins,
        }
    }
}

fn parse_port(raw: &str) -> Option<u16> {
    raw.trim().trim_start_matches(':').parse().ok()
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_owned)
        .collect()
}
