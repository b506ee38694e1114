use prism_dependencies::{
    log,
    serde::{Deserialize, Serialize},
    serde_json,
};
use std::{
    env, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Environment variable naming a JSON config file to load at startup.
pub const CONFIG_ENV_VAR: &str = "PRISM_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file at path: {1}")]
    ReadFile(#[source] io::Error, String),

    #[error("Failed to parse config!")]
    Parse(#[source] serde_json::Error),
}

type Result<T, E = ConfigError> = std::result::Result<T, E>;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "prism_dependencies::serde", default)]
pub struct Config {
    pub window: WindowConfig,
    pub graphics: Graphics,
    pub camera: CameraConfig,
    pub assets: AssetConfig,
}

impl Config {
    /// Loads the file named by `PRISM_CONFIG`, or the defaults when it is unset.
    pub fn load() -> Result<Self> {
        match env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_file(path),
            None => {
                log::info!("{} is not set, using the default config", CONFIG_ENV_VAR);
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|error| ConfigError::ReadFile(error, path.display().to_string()))?;
        log::info!("Loaded config from {}", path.display());
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "prism_dependencies::serde", default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub is_fullscreen: bool,
    pub title: String,
    pub icon: Option<PathBuf>,
    pub vsync: bool,
    pub capture_cursor: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            is_fullscreen: false,
            title: "Learn OpenGL".to_string(),
            icon: None,
            vsync: true,
            capture_cursor: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "prism_dependencies::serde", default)]
pub struct Graphics {
    pub clear_color: [f32; 3],
    pub wireframe: bool,
}

impl Default for Graphics {
    fn default() -> Self {
        Self {
            clear_color: [0.2, 0.3, 0.4],
            wireframe: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "prism_dependencies::serde", default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
    pub fov_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
    /// Units per second
    pub speed: f32,
    pub sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            // Far enough back that the first cube clears the near plane
            position: [0.0, 0.0, 3.0],
            yaw_degrees: -90.0,
            pitch_degrees: 0.0,
            fov_degrees: 45.0,
            z_near: 0.1,
            z_far: 100.0,
            speed: 3.0,
            sensitivity: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "prism_dependencies::serde", default)]
pub struct AssetConfig {
    pub directory: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("assets"),
        }
    }
}

impl AssetConfig {
    pub fn path(&self, file_name: impl AsRef<Path>) -> PathBuf {
        self.directory.join(file_name)
    }
}
