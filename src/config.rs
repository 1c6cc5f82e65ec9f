use crate::error::{AssetError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = "StoreAssets";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub const SCREENSHOT: TargetSize = TargetSize::new(1280, 800);
    pub const PROMO_TILE: TargetSize = TargetSize::new(440, 280);

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleConfig {
    pub name: String,
    /// File inside the locale's input directory used for the promotional tile
    #[serde(default)]
    pub promo_source: Option<String>,
}

impl LocaleConfig {
    pub fn new(name: &str, promo_source: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            promo_source: promo_source.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub base_dir: PathBuf,
    /// Relative to `base_dir`, holds one subdirectory per locale
    pub input_dir: PathBuf,
    /// Relative to `base_dir`, receives `screenshots/<locale>` and `promo`
    pub output_dir: PathBuf,
    pub screenshot_size: TargetSize,
    pub promo_size: TargetSize,
    pub jpeg_quality: u8,
    pub background: [u8; 3],
    pub locales: Vec<LocaleConfig>,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            input_dir: PathBuf::from("screenshots"),
            output_dir: PathBuf::from("store_assets"),
            screenshot_size: TargetSize::SCREENSHOT,
            promo_size: TargetSize::PROMO_TILE,
            jpeg_quality: 95,
            background: [255, 255, 255],
            locales: vec![
                LocaleConfig::new("en", Some("en_pop1.jpg")),
                LocaleConfig::new("zh_CN", Some("pop1.jpg")),
            ],
        }
    }
}

impl AssetConfig {
    /// `<config_dir>/StoreAssets/config.json`, falling back to the working directory
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    pub fn load(path: &Path) -> Result<Self> {
        log::debug!("Loading config from {:?}", path);
        let content = fs::read_to_string(path).map_err(|e| AssetError::io(path, e))?;
        serde_json::from_str::<AssetConfig>(&content).map_err(|source| AssetError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Explicit path must exist; the default location is optional.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = Self::default_path();
                if path.is_file() {
                    Self::load(&path)
                } else {
                    log::info!("No config at {:?}, using defaults", path);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| AssetError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| AssetError::io(path, e))?;
        log::info!("Saved config to {:?}", path);
        Ok(())
    }

    pub fn locale_input_dir(&self, locale: &str) -> PathBuf {
        self.base_dir.join(&self.input_dir).join(locale)
    }

    pub fn locale_output_dir(&self, locale: &str) -> PathBuf {
        self.base_dir
            .join(&self.output_dir)
            .join("screenshots")
            .join(locale)
    }

    pub fn promo_dir(&self) -> PathBuf {
        self.base_dir.join(&self.output_dir).join("promo")
    }

    pub fn promo_output_path(&self, locale: &str) -> PathBuf {
        self.promo_dir().join(format!("promo_{}.jpg", locale))
    }

    /// Keeps only the named locales, in config order. Unknown names are rejected.
    pub fn select_locales(&mut self, names: &[String]) -> Result<()> {
        if names.is_empty() {
            return Ok(());
        }
        if let Some(unknown) = names
            .iter()
            .find(|name| !self.locales.iter().any(|l| &l.name == *name))
        {
            return Err(AssetError::UnknownLocale(unknown.clone()));
        }
        self.locales.retain(|l| names.contains(&l.name));
        Ok(())
    }
}
