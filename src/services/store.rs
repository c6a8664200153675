//! Доступ к pass-хранилищу. Секреты читаются и пишутся только через
//! внешнюю команду `pass` - расшифровка остаётся её заботой, здесь
//! лишь согласованные пути записей.

use crate::error::Result;
use crate::services::runner::CommandRunner;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

pub struct PassStore {
    root: PathBuf,
    runner: Arc<dyn CommandRunner>,
}

impl PassStore {
    pub fn new(root: PathBuf, runner: Arc<dyn CommandRunner>) -> Self {
        Self { root, runner }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    pub fn autotype_root(&self) -> PathBuf {
        self.root.join("autotype")
    }

    /// Показать секрет записи. Секрет - первая строка вывода
    /// (соглашение самого pass: дальше могут идти метаданные).
    pub async fn show(&self, entry: &str) -> Result<String> {
        debug!("pass show {}", entry);
        let output = self.runner.capture("pass", &["show", entry]).await?;
        Ok(output.lines().next().unwrap_or("").to_string())
    }

    /// Показать запись целиком (для многострочных sequence-записей)
    pub async fn show_multiline(&self, entry: &str) -> Result<String> {
        debug!("pass show (multiline) {}", entry);
        self.runner.capture("pass", &["show", entry]).await
    }

    /// Интерактивная вставка записи (stdin/stdout наследуются,
    /// пользователь общается с pass напрямую)
    pub async fn insert_interactive(&self, entry: &str, multiline: bool, echo: bool) -> Result<bool> {
        let mut args = vec!["insert"];
        if multiline {
            args.push("-m");
        }
        if echo {
            args.push("-e");
        }
        args.push(entry);
        self.runner.interactive("pass", &args).await
    }
}
