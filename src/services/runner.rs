//! CommandRunner service: responsibility and boundaries
//!
//! This module is the ONLY place that spawns external processes. Every other
//! service (window queries, store access, dialogs, key injection) goes through
//! the `CommandRunner` trait, so the whole pipeline can run against a fake
//! runner in tests or against the logging `DryRunner` with `--dry-run`.

use crate::error::{AutotypeError, Result};
use std::io::ErrorKind;
use std::process::{Command, Stdio};
use std::sync::Arc;
use tracing::{debug, info};

/// Результат выполнения внешней команды
#[derive(Debug, Clone)]
pub struct CmdOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CmdOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    #[allow(dead_code)]
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

#[async_trait::async_trait]
pub trait CommandRunner: Send + Sync {
    /// Выполнить команду и собрать stdout/stderr
    async fn output(&self, program: &str, args: &[&str]) -> Result<CmdOutput>;

    /// Выполнить команду с унаследованными stdin/stdout/stderr
    /// (для интерактивных вызовов вроде `pass insert`)
    async fn interactive(&self, program: &str, args: &[&str]) -> Result<bool>;

    /// Выполнить команду и вернуть stdout; ненулевой код завершения - ошибка
    async fn capture(&self, program: &str, args: &[&str]) -> Result<String> {
        let out = self.output(program, args).await?;
        if !out.success {
            return Err(AutotypeError::command_failed(program, out.stderr.trim()));
        }
        Ok(out.stdout)
    }
}

/// Фабрика: в dry-run режиме все внешние вызовы только логируются
pub fn create_runner(dry_run: bool) -> Arc<dyn CommandRunner> {
    if dry_run {
        Arc::new(DryRunner)
    } else {
        Arc::new(SystemRunner)
    }
}

pub struct SystemRunner;

#[async_trait::async_trait]
impl CommandRunner for SystemRunner {
    async fn output(&self, program: &str, args: &[&str]) -> Result<CmdOutput> {
        debug!("Запуск команды: {} {:?}", program, args);

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| spawn_error(program, e))?;

        let result = CmdOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !result.success {
            debug!(
                "Команда {} завершилась с ошибкой: {}",
                program,
                result.stderr.trim()
            );
        }

        Ok(result)
    }

    async fn interactive(&self, program: &str, args: &[&str]) -> Result<bool> {
        debug!("Запуск интерактивной команды: {} {:?}", program, args);

        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|e| spawn_error(program, e))?;

        Ok(status.success())
    }
}

fn spawn_error(program: &str, e: std::io::Error) -> AutotypeError {
    if e.kind() == ErrorKind::NotFound {
        AutotypeError::CommandUnavailable {
            program: program.to_string(),
            source: e,
        }
    } else {
        AutotypeError::Io(e)
    }
}

/// Dry-run режим: эмулируем окружение вместо реальных вызовов,
/// чтобы можно было прогнать весь поток без ввода настоящих секретов
pub struct DryRunner;

#[async_trait::async_trait]
impl CommandRunner for DryRunner {
    async fn output(&self, program: &str, args: &[&str]) -> Result<CmdOutput> {
        info!("[DRY RUN] {} {:?}", program, args);

        let canned = match (program, args.first().copied()) {
            ("xdotool", Some("getactivewindow")) => "4242",
            ("xdotool", Some("getwindowname")) => "Terminal - dry_run",
            ("pass", Some("show")) => "dry_run_secret",
            // Диалог выбора: всегда "выбран" первый кандидат
            ("zenity", _) | ("kdialog", _) => "0",
            _ => "",
        };

        Ok(CmdOutput::ok(canned))
    }

    async fn interactive(&self, program: &str, args: &[&str]) -> Result<bool> {
        info!("[DRY RUN] (интерактивно) {} {:?}", program, args);
        Ok(true)
    }
}
