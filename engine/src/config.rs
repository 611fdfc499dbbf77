use std::{
    fs,
    path::{Path, PathBuf},
};

use color_eyre::{
    Result,
    eyre::{WrapErr as _, bail, eyre},
};
use log::debug;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

pub const API_URL_ENV: &str = "LITTLE_PORTRAIT_API_URL";
const CONFIG_FILE_NAME: &str = "little_portrait.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base url of the backend, `/api/personalize` is appended to it
    pub api_url: String,
}

impl Config {
    /// An explicitly passed url (flag or environment) wins over the config file
    pub fn resolve(api_url: Option<String>) -> Result<Self> {
        Self::resolve_from(api_url, &config_path()?)
    }

    pub fn resolve_from(api_url: Option<String>, config_file: &Path) -> Result<Self> {
        if let Some(api_url) = api_url.filter(|u| !u.trim().is_empty()) {
            return Ok(Self { api_url });
        }

        if config_file.exists() {
            debug!("Loading config from {}", config_file.display());
            return load_ron_file(config_file)
                .wrap_err_with(|| format!("Invalid config file {}", config_file.display()));
        }

        bail!(
            "No backend configured. Pass --api-url, set {API_URL_ENV} or create {}",
            config_file.display()
        )
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(dirs::config_local_dir()
        .ok_or(eyre!("Couldn't get config dir"))?
        .join(CONFIG_FILE_NAME))
}

pub fn load_ron_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let src = fs::read_to_string(path)?;
    Ok(ron::from_str(&src)?)
}
