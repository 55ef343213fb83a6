use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::letters::LETTER_COUNT;
use crate::sfx::TICK_SFX_VOLUME;

pub const DEFAULT_COLUMNS: u32 = 4;
pub const MIN_WINDOW_SIDE: u32 = 200;
pub const SETTINGS_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioSettings {
    pub tick_volume: f32,
    pub mute: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            tick_volume: TICK_SFX_VOLUME,
            mute: false,
        }
    }
}

impl AudioSettings {
    pub fn effective_tick_gain(self) -> f32 {
        if self.mute {
            0.0
        } else {
            self.tick_volume.clamp(0.0, 1.0)
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LayoutSettings {
    pub columns: u32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 480,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSettings {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub audio: AudioSettings,
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub window: WindowSettings,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            audio: AudioSettings::default(),
            layout: LayoutSettings::default(),
            window: WindowSettings::default(),
        }
    }
}

impl GameSettings {
    pub fn sanitized(mut self) -> Self {
        self.audio.tick_volume = self.audio.tick_volume.clamp(0.0, 1.0);
        self.layout.columns = self.layout.columns.clamp(1, LETTER_COUNT as u32);
        self.window.width = self.window.width.max(MIN_WINDOW_SIDE);
        self.window.height = self.window.height.max(MIN_WINDOW_SIDE);
        self
    }
}

fn default_version() -> u32 {
    SETTINGS_VERSION
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `LETTER_RUSH_SETTINGS_PATH` wins; otherwise the XDG config dir, then `~/.config`.
    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os("LETTER_RUSH_SETTINGS_PATH") {
            return Self::new(explicit);
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")));

        match base {
            Some(base) => Self::new(base.join("letter-rush").join("settings.json")),
            None => Self::new("settings.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> GameSettings {
        let Ok(bytes) = fs::read(&self.path) else {
            debug!(path = %self.path.display(), "no settings file, using defaults");
            return GameSettings::default();
        };
        match serde_json::from_slice::<GameSettings>(&bytes) {
            Ok(settings) if settings.version != SETTINGS_VERSION => {
                warn!(
                    path = %self.path.display(),
                    version = settings.version,
                    "unsupported settings version, using defaults"
                );
                GameSettings::default()
            }
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                warn!(path = %self.path.display(), "ignoring malformed settings: {err}");
                GameSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &GameSettings) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(settings)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mute_silences_tick() {
        let mut audio = AudioSettings::default();
        assert!((audio.effective_tick_gain() - TICK_SFX_VOLUME).abs() < 1e-6);

        audio.mute = true;
        assert_eq!(audio.effective_tick_gain(), 0.0);
    }

    #[test]
    fn sanitized_clamps_expected_fields() {
        let settings = GameSettings {
            version: SETTINGS_VERSION,
            audio: AudioSettings {
                tick_volume: 3.0,
                mute: false,
            },
            layout: LayoutSettings { columns: 0 },
            window: WindowSettings {
                width: 10,
                height: 1000,
            },
        }
        .sanitized();

        assert_eq!(settings.version, SETTINGS_VERSION);
        assert_eq!(settings.audio.tick_volume, 1.0);
        assert_eq!(settings.layout.columns, 1);
        assert_eq!(settings.window.width, MIN_WINDOW_SIDE);
        assert_eq!(settings.window.height, 1000);
    }

    #[test]
    fn serde_defaults_fill_missing_fields() {
        let parsed: GameSettings = serde_json::from_str(r#"{"layout":{"columns":6}}"#)
            .expect("settings JSON should parse");
        assert_eq!(parsed.layout.columns, 6);
        assert_eq!(parsed.audio, AudioSettings::default());
        assert_eq!(parsed.window, WindowSettings::default());
        assert_eq!(parsed.version, SETTINGS_VERSION);
    }
}
