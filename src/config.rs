use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub dialog: DialogConfig,
    #[serde(default)]
    pub typing: TypingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Корень pass-хранилища. По умолчанию $PASSWORD_STORE_DIR,
    /// иначе $HOME/.password-store
    pub root: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DialogConfig {
    /// Бэкенд диалога выбора: "zenity" или "kdialog"
    pub backend: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TypingConfig {
    /// Пауза перед началом ввода (секунды) - чтобы клавиши горячей
    /// комбинации не попали в целевое окно
    pub settle_delay_s: f64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: default_store_root(),
        }
    }
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            backend: "zenity".to_string(),
            width: 500,
            height: 300,
        }
    }
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self { settle_delay_s: 0.3 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            store: StoreConfig::default(),
            dialog: DialogConfig::default(),
            typing: TypingConfig::default(),
        }
    }
}

fn default_store_root() -> PathBuf {
    if let Ok(dir) = env::var("PASSWORD_STORE_DIR") {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".password-store")
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let figment = Figment::new()
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("PASSAUTOTYPE_"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        match self.dialog.backend.as_str() {
            "zenity" | "kdialog" => {}
            _ => anyhow::bail!("Неверный бэкенд диалога: {}", self.dialog.backend),
        }

        if self.dialog.width == 0 || self.dialog.height == 0 {
            anyhow::bail!("Размеры диалога должны быть больше 0");
        }

        if !self.typing.settle_delay_s.is_finite() || self.typing.settle_delay_s < 0.0 {
            anyhow::bail!(
                "settle_delay_s должно быть неотрицательным числом: {}",
                self.typing.settle_delay_s
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_dialog_backend_rejected() {
        let mut config = Config::default();
        config.dialog.backend = "xmessage".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_settle_delay_rejected() {
        let mut config = Config::default();
        config.typing.settle_delay_s = -1.0;
        assert!(config.validate().is_err());
    }
}
