use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct Config {
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    #[serde(default)]
    pub amap: RawAmapConfig,
}

/// `[amap]` table as written in the file, key may be supplied by the environment instead
#[derive(Default, Deserialize)]
pub struct RawAmapConfig {
    pub key: Option<String>,
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Clone)]
pub struct AmapConfig {
    pub key: String,
    // defaults to the public IoT positioning endpoint
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

fn default_http_port() -> u16 {
    8080
}

pub fn load(path: &Path) -> Result<Config> {
    let data = fs::read_to_string(path).context("Failed to read config")?;
    parse(&data)
}

pub fn parse(data: &str) -> Result<Config> {
    let config = toml::from_str(data).context("Failed to parse config")?;
    Ok(config)
}

impl Config {
    /// Falls back to `AMAP_KEY` from the environment or a `.env` file.
    pub fn amap(&self) -> Result<AmapConfig> {
        let key = match &self.amap.key {
            Some(x) => x.clone(),
            None => dotenvy::var("AMAP_KEY")
                .context("amap.key is not set in config and AMAP_KEY is not set")?,
        };

        Ok(AmapConfig {
            key,
            url: self.amap.url.clone(),
            timeout_secs: self.amap.timeout_secs,
        })
    }
}
