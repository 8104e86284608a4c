//! Gameplay tuning loaded from `config/gameplay.toml`, with environment overrides for the chat bridge.
use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use bevy::prelude::*;
use serde::Deserialize;

const CONFIG_PATH: &str = "config/gameplay.toml";
const CHAT_URL_ENV: &str = "CHAT_BRIDGE_URL";
const CHAT_TIMEOUT_ENV: &str = "CHAT_BRIDGE_TIMEOUT_SECS";
const APP_DIR_NAME: &str = "cellmate";
const LOG_DIR_NAME: &str = "Logs";
const FALLBACK_LOG_DIR: &str = "logs";
const MIN_RADIUS: f32 = 0.01;

#[derive(Debug, Clone, Deserialize, Default)]
struct RawGameplayConfig {
    #[serde(default)]
    actor: RawActorSection,
    #[serde(default)]
    interaction: RawInteractionSection,
    #[serde(default)]
    carry: RawCarrySection,
    #[serde(default)]
    camera: RawCameraSection,
    #[serde(default)]
    chat: RawChatSection,
    #[serde(default)]
    log: RawLogSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawActorSection {
    move_speed: f32,
}

impl Default for RawActorSection {
    fn default() -> Self {
        Self { move_speed: 5.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawInteractionSection {
    radius: f32,
    prompt: String,
    highlight_rgba: [f32; 4],
}

impl Default for RawInteractionSection {
    fn default() -> Self {
        Self {
            radius: 2.0,
            prompt: "Press E to interact".to_string(),
            highlight_rgba: [1.0, 0.92, 0.016, 1.0],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawCarrySection {
    pickup_distance: f32,
    carry_distance: f32,
    drop_cooldown_secs: f32,
    obstruction_radius: f32,
    follow_rate: f32,
    pickup_prompt: String,
    place_prompt: String,
    blocked_message: String,
}

impl Default for RawCarrySection {
    fn default() -> Self {
        Self {
            pickup_distance: 1.5,
            carry_distance: 1.0,
            drop_cooldown_secs: 0.5,
            obstruction_radius: 0.5,
            follow_rate: 10.0,
            pickup_prompt: "Press E to pick up".to_string(),
            place_prompt: "Press E to place".to_string(),
            blocked_message: "Can't place here - blocked by obstacle".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawCameraSection {
    offset: [f32; 3],
    blend: f32,
    rotation_degrees: [f32; 3],
}

impl Default for RawCameraSection {
    fn default() -> Self {
        Self {
            offset: [0.0, -6.0, 10.0],
            blend: 0.125,
            rotation_degrees: [30.0, 0.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawChatSection {
    url: String,
    timeout_secs: u64,
}

impl Default for RawChatSection {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:5001/query".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawLogSection {
    directory: Option<String>,
    file_name: String,
}

impl Default for RawLogSection {
    fn default() -> Self {
        Self {
            directory: None,
            file_name: "cellmate_log.txt".to_string(),
        }
    }
}

/// Movement tuning for the controlled actor.
#[derive(Resource, Debug, Clone)]
pub struct ActorSettings {
    pub move_speed: f32,
}

impl Default for ActorSettings {
    fn default() -> Self {
        RawActorSection::default().into()
    }
}

impl From<RawActorSection> for ActorSettings {
    fn from(value: RawActorSection) -> Self {
        Self {
            move_speed: value.move_speed.max(0.0),
        }
    }
}

/// Defaults applied to newly spawned interactables.
#[derive(Resource, Debug, Clone)]
pub struct InteractionSettings {
    pub radius: f32,
    pub prompt: String,
    pub highlight: Color,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        RawInteractionSection::default().into()
    }
}

impl From<RawInteractionSection> for InteractionSettings {
    fn from(value: RawInteractionSection) -> Self {
        let [r, g, b, a] = value.highlight_rgba;
        Self {
            radius: value.radius.max(MIN_RADIUS),
            prompt: value.prompt,
            highlight: Color::srgba(r, g, b, a),
        }
    }
}

/// Carry protocol tuning shared by every carryable object.
#[derive(Resource, Debug, Clone)]
pub struct CarrySettings {
    pub pickup_distance: f32,
    pub carry_distance: f32,
    pub drop_cooldown_secs: f32,
    pub obstruction_radius: f32,
    pub follow_rate: f32,
    pub pickup_prompt: String,
    pub place_prompt: String,
    pub blocked_message: String,
}

impl Default for CarrySettings {
    fn default() -> Self {
        RawCarrySection::default().into()
    }
}

impl From<RawCarrySection> for CarrySettings {
    fn from(value: RawCarrySection) -> Self {
        Self {
            pickup_distance: value.pickup_distance.max(MIN_RADIUS),
            carry_distance: value.carry_distance.max(0.0),
            drop_cooldown_secs: value.drop_cooldown_secs.max(0.0),
            obstruction_radius: value.obstruction_radius.max(MIN_RADIUS),
            follow_rate: value.follow_rate.max(0.0),
            pickup_prompt: value.pickup_prompt,
            place_prompt: value.place_prompt,
            blocked_message: value.blocked_message,
        }
    }
}

/// Follow camera placement.
#[derive(Resource, Debug, Clone)]
pub struct CameraSettings {
    pub offset: Vec3,
    pub blend: f32,
    pub rotation: Quat,
}

impl Default for CameraSettings {
    fn default() -> Self {
        RawCameraSection::default().into()
    }
}

impl From<RawCameraSection> for CameraSettings {
    fn from(value: RawCameraSection) -> Self {
        let [pitch, yaw, roll] = value.rotation_degrees;
        Self {
            offset: Vec3::from_array(value.offset),
            blend: value.blend.clamp(0.0, 1.0),
            rotation: Quat::from_euler(
                EulerRot::XYZ,
                pitch.to_radians(),
                yaw.to_radians(),
                roll.to_radians(),
            )
            .normalize(),
        }
    }
}

/// Endpoint and transport limits for the chat bridge.
#[derive(Resource, Debug, Clone)]
pub struct ChatSettings {
    pub url: String,
    pub timeout: Duration,
}

impl Default for ChatSettings {
    fn default() -> Self {
        RawChatSection::default().into()
    }
}

impl From<RawChatSection> for ChatSettings {
    fn from(value: RawChatSection) -> Self {
        Self {
            url: value.url.trim().to_string(),
            timeout: Duration::from_secs(value.timeout_secs.max(1)),
        }
    }
}

impl ChatSettings {
    /// Applies `CHAT_BRIDGE_URL` / `CHAT_BRIDGE_TIMEOUT_SECS` when they are set.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(env::var(CHAT_URL_ENV).ok(), env::var(CHAT_TIMEOUT_ENV).ok());
    }

    fn apply_overrides(&mut self, url: Option<String>, timeout_secs: Option<String>) {
        if let Some(url) = url
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
        {
            self.url = url;
        }

        if let Some(timeout) = timeout_secs
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|value| *value > 0)
        {
            self.timeout = Duration::from_secs(timeout);
        }
    }
}

/// Location of the persisted event log.
#[derive(Resource, Debug, Clone)]
pub struct EventLogSettings {
    pub directory: PathBuf,
    pub file_name: String,
}

impl EventLogSettings {
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

impl Default for EventLogSettings {
    fn default() -> Self {
        RawLogSection::default().into()
    }
}

impl From<RawLogSection> for EventLogSettings {
    fn from(value: RawLogSection) -> Self {
        let directory = value
            .directory
            .map(|dir| dir.trim().to_string())
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_log_directory);
        let file_name = if value.file_name.trim().is_empty() {
            RawLogSection::default().file_name
        } else {
            value.file_name.trim().to_string()
        };

        Self {
            directory,
            file_name,
        }
    }
}

fn default_log_directory() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(LOG_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_LOG_DIR))
}

/// Every settings section, resolved and clamped.
#[derive(Debug, Clone, Default)]
pub struct GameplaySettings {
    pub actor: ActorSettings,
    pub interaction: InteractionSettings,
    pub carry: CarrySettings,
    pub camera: CameraSettings,
    pub chat: ChatSettings,
    pub log: EventLogSettings,
}

impl GameplaySettings {
    pub fn load_or_default() -> Self {
        let mut settings = match Self::load(Path::new(CONFIG_PATH)) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("{}. Falling back to defaults.", err);
                Self::default()
            }
        };
        settings.chat.apply_env_overrides();
        settings
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let data = fs::read_to_string(path).map_err(|err| SettingsError::Read {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Self::from_toml_str(&data).map_err(|err| SettingsError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    pub fn from_toml_str(data: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawGameplayConfig>(data).map(Into::into)
    }
}

impl From<RawGameplayConfig> for GameplaySettings {
    fn from(value: RawGameplayConfig) -> Self {
        Self {
            actor: value.actor.into(),
            interaction: value.interaction.into(),
            carry: value.carry.into(),
            camera: value.camera.into(),
            chat: value.chat.into(),
            log: value.log.into(),
        }
    }
}

/// Failure to read or parse the settings file.
#[derive(Debug, Clone)]
pub enum SettingsError {
    Read { path: PathBuf, message: String },
    Parse { path: PathBuf, message: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => {
                write!(f, "Failed to read {} ({})", path.display(), message)
            }
            Self::Parse { path, message } => {
                write!(f, "Failed to parse {} ({})", path.display(), message)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
