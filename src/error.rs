use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutotypeError {
    #[error("Ошибка конфигурации: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Внешняя команда не найдена: {program} ({source})")]
    CommandUnavailable {
        program: String,
        source: std::io::Error,
    },

    #[error("Внешняя команда {program} завершилась с ошибкой: {details}")]
    CommandFailed { program: String, details: String },

    #[error("Диалог вернул некорректный индекс: '{0}'")]
    BadSelection(String),

    #[error("Исходная запись не найдена в хранилище: {0}")]
    SourceEntryMissing(PathBuf),

    #[error("Алиас уже существует: {0}")]
    AliasConflict(PathBuf),
}

impl AutotypeError {
    pub fn command_failed(program: impl Into<String>, details: impl Into<String>) -> Self {
        AutotypeError::CommandFailed {
            program: program.into(),
            details: details.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AutotypeError>;
