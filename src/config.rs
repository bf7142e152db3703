use std::env;

pub const DEFAULT_DATABASE: &str = "contactPilot";
pub const DEFAULT_PORT: &str = "5000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: String,
    pub mongodb_uri: String,
    pub database_name: String,
}

impl AppConfig {
    /// Reads `MONGODB_URI` (required), `HOST` and `PORT` from the environment
    pub fn from_env() -> Result<Self, String> {
        let mongodb_uri = env::var("MONGODB_URI").map_err(|_| "MONGODB_URI must be set".to_string())?;

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string()),
            database_name: database_name_from_uri(&mongodb_uri),
            mongodb_uri,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database named in the URI path (`mongodb://host/<db>?opts`), or the default
pub fn database_name_from_uri(uri: &str) -> String {
    let path = uri
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(uri)
        .split_once('/')
        .map(|(_, path)| path)
        .unwrap_or("");

    let name = path.split('?').next().unwrap_or("");
    if name.is_empty() {
        DEFAULT_DATABASE.to_string()
    } else {
        name.to_string()
    }
}
