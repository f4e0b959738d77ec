use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub analytics_database_url: String,
    pub static_dir: PathBuf,
    pub analytics_panel_size: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "8000".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://filmdex.db?mode=rwc".to_string());

        let analytics_database_url = std::env::var("ANALYTICS_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://filmdex-analytics.db?mode=rwc".to_string());

        let static_dir =
            std::env::var("STATIC_DIR").map(PathBuf::from).unwrap_or_else(|_| "static".into());

        let analytics_panel_size: u64 =
            std::env::var("ANALYTICS_PANEL_SIZE").ok().and_then(|s| s.parse().ok()).unwrap_or(5);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            analytics_database_url,
            static_dir,
            analytics_panel_size,
        })
    }
}
