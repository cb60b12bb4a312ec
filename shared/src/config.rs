use std::str::FromStr;
use tracing::warn;

/// Backend holding the per-user cart snapshots
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CartBackend {
    Memory, // lost on restart
    Sled,   // durable, under data_dir
}

impl FromStr for CartBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "memory" | "moka" => Ok(CartBackend::Memory),
            "sled" | "disk" => Ok(CartBackend::Sled),
            other => Err(format!("unknown cart backend '{}'", other)),
        }
    }
}

pub struct Config {
    pub host: String,
    pub http_port: u16,
    pub data_dir: String,
    pub admin_name: String,
    pub admin_email: String,
    pub admin_password: String,
    pub session_ttl_secs: u64,
    pub cart_backend: CartBackend,
    pub allowed_origins: Vec<String>,
}

impl Config {
    const DEFAULT_HOST: &str = "0.0.0.0";
    const DEFAULT_HTTP_PORT: u16 = 8080;
    const DEFAULT_DATA_DIR: &str = "./data";
    const DEFAULT_ADMIN_NAME: &str = "Administrator";
    const DEFAULT_ADMIN_EMAIL: &str = "admin@quire.local";
    const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
    const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let http_port = parse_or_default(&lookup, "QUIRE_HTTP_PORT", Self::DEFAULT_HTTP_PORT);
        let session_ttl_secs = parse_or_default(
            &lookup,
            "QUIRE_SESSION_TTL_SECS",
            Self::DEFAULT_SESSION_TTL_SECS,
        );

        let cart_backend = match lookup("QUIRE_CART_BACKEND") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("{}, falling back to sled", e);
                CartBackend::Sled
            }),
            None => CartBackend::Sled,
        };

        Self {
            host: lookup("QUIRE_HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string()),
            http_port,
            data_dir: lookup("QUIRE_DATA_DIR").unwrap_or_else(|| Self::DEFAULT_DATA_DIR.to_string()),
            admin_name: lookup("QUIRE_ADMIN_NAME")
                .unwrap_or_else(|| Self::DEFAULT_ADMIN_NAME.to_string()),
            admin_email: lookup("QUIRE_ADMIN_EMAIL")
                .unwrap_or_else(|| Self::DEFAULT_ADMIN_EMAIL.to_string()),
            admin_password: lookup("QUIRE_ADMIN_PASSWORD").unwrap_or_else(|| {
                warn!("QUIRE_ADMIN_PASSWORD not set, using default password 'admin123'");
                warn!("⚠️  WARNING: Please change the default admin password immediately!");
                Self::DEFAULT_ADMIN_PASSWORD.to_string()
            }),
            session_ttl_secs,
            cart_backend,
            allowed_origins: lookup("QUIRE_ALLOWED_ORIGINS")
                .unwrap_or_else(|| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    pub fn session_ttl_ms(&self) -> u64 {
        self.session_ttl_secs.saturating_mul(1000)
    }
}

fn parse_or_default<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid value '{}' for {}, using {}", raw, name, default);
            default
        }),
        None => default,
    }
}
