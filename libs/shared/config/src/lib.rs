use std::env;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub seed_demo_data: bool,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("CLINIC_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    warn!("CLINIC_DATA_DIR not set, using ./data");
                    PathBuf::from("./data")
                }),
            seed_demo_data: env::var("CLINIC_SEED_DEMO")
                .map(|v| v != "false" && v != "0")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_SEED_DEMO not set, demo data enabled");
                    true
                }),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        }
    }
}
