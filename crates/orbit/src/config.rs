use chrono::{NaiveDate, Weekday};
use datewheel::{Annotations, EventCount, RenderMode, WheelConfig, WheelKind, WheelOverrides};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventEntry {
    pub date: NaiveDate,
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub kind: WheelKind,
    pub render: RenderMode,
    pub week_start: Weekday,
    #[serde(deserialize_with = "week_table")]
    pub week: WheelConfig,
    #[serde(deserialize_with = "month_table")]
    pub month: WheelConfig,
    pub events: Vec<EventEntry>,
}

fn week_table<'de, D: Deserializer<'de>>(deserializer: D) -> Result<WheelConfig, D::Error> {
    WheelOverrides::deserialize(deserializer).map(|o| o.apply(WheelConfig::week()))
}

fn month_table<'de, D: Deserializer<'de>>(deserializer: D) -> Result<WheelConfig, D::Error> {
    WheelOverrides::deserialize(deserializer).map(|o| o.apply(WheelConfig::month()))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kind: WheelKind::Week,
            render: RenderMode::Layered,
            week_start: Weekday::Mon,
            week: WheelConfig::week(),
            month: WheelConfig::month(),
            events: Vec::new(),
        }
    }
}

impl Config {
    pub fn wheel(&self) -> WheelConfig {
        match self.kind {
            WheelKind::Week => self.week,
            WheelKind::Month => self.month,
        }
    }

    pub fn annotations(&self) -> Annotations {
        let mut annotations = Annotations::new();
        for entry in &self.events {
            let total = annotations.entry(entry.date).or_default();
            *total = EventCount::new(**total + entry.count);
        }
        annotations
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "orbit", "orbit").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("ORBIT"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default configuration: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn test_default_config_parses() {
        let parsed: Config = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(parsed.kind, WheelKind::Week);
        assert_eq!(parsed.render, RenderMode::Layered);
        assert_eq!(parsed.week_start, Weekday::Mon);
        assert_eq!(parsed.week, WheelConfig::week());
        assert_eq!(parsed.month.radius, 160.0);
        assert_eq!(parsed.month.slot_hit_radius, 16.0);
        assert_eq!(parsed.month.tap_threshold, 5.0);
        assert!(parsed.events.is_empty());
    }

    #[test]
    fn test_partial_month_table_keeps_month_radius() {
        let parsed: Config = config::Config::builder()
            .add_source(config::File::from_str(
                "kind = \"month\"\n[month]\nsensitivity = 0.8\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(parsed.month.radius, 160.0);
        assert_eq!(parsed.month.sensitivity, 0.8);
        assert_eq!(parsed.wheel().radius, 160.0);
        assert_eq!(parsed.week, WheelConfig::week());
    }

    #[test]
    fn test_wheel_follows_kind() {
        let mut config = Config::default();
        assert_eq!(config.wheel(), WheelConfig::week());
        config.kind = WheelKind::Month;
        assert_eq!(config.wheel(), WheelConfig::month());
    }

    #[test]
    fn test_annotations_sum_duplicate_dates() {
        let config: Config = serde_json::from_str(
            r#"{
                "kind": "Month",
                "events": [
                    { "date": "2026-10-20", "count": 2 },
                    { "date": "2026-10-20" },
                    { "date": "2026-10-03", "count": 5 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.kind, WheelKind::Month);
        let annotations = config.annotations();
        assert_eq!(annotations.get(&date(20)).copied(), Some(EventCount::new(3)));
        assert_eq!(annotations.get(&date(3)).copied(), Some(EventCount::new(5)));
        assert_eq!(annotations.get(&date(4)), None);
    }
}
