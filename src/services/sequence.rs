//! Sequence interpreter: мини-язык автоввода.
//!
//! Пять ключевых слов: USER, PASS, KEY x, TEXT x, SLEEP x. Нераспознанные
//! строки пропускаются молча - это документированная терпимость формата,
//! а не ошибка разбора.

use crate::error::Result;
use crate::services::runner::CommandRunner;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Инструкция программы автоввода
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    TypeUser,
    TypePass,
    /// Имя клавиши в синтаксисе xdotool (Tab, Return, ctrl+a, ...)
    PressKey(String),
    TypeText(String),
    /// Пауза в секундах (дробное значение)
    Sleep(f64),
}

/// Секреты выбранной записи; живут только в памяти на время ввода
pub struct SecretBundle {
    pub username: Option<String>,
    pub password: String,
}

/// Разобрать текст sequence-записи в программу. Ключевое слово
/// отделяется от аргумента первым пробелом; строки, не подошедшие
/// ни под одно слово, пропускаются.
pub fn parse_program(text: &str) -> Vec<Instruction> {
    let mut program = Vec::new();

    for line in text.lines() {
        match line.split_once(' ') {
            None => match line {
                "USER" => program.push(Instruction::TypeUser),
                "PASS" => program.push(Instruction::TypePass),
                _ => debug!("Пропускаем нераспознанную строку sequence: '{}'", line),
            },
            Some(("KEY", key)) => program.push(Instruction::PressKey(key.to_string())),
            Some(("TEXT", text)) => program.push(Instruction::TypeText(text.to_string())),
            Some(("SLEEP", value)) => match value.parse::<f64>() {
                Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => {
                    program.push(Instruction::Sleep(seconds));
                }
                _ => warn!("Некорректный аргумент SLEEP, строка пропущена: '{}'", value),
            },
            Some(_) => debug!("Пропускаем нераспознанную строку sequence: '{}'", line),
        }
    }

    program
}

/// Программа по умолчанию для записей username+password:
/// логин, Tab, пароль, Enter
pub fn default_program() -> Vec<Instruction> {
    vec![
        Instruction::TypeUser,
        Instruction::PressKey("Tab".to_string()),
        Instruction::TypePass,
        Instruction::PressKey("Return".to_string()),
    ]
}

/// Исполняет программу автоввода через xdotool
pub struct SequenceInterpreter {
    runner: Arc<dyn CommandRunner>,
}

impl SequenceInterpreter {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Выполнить инструкции по порядку. Паузы не блокируют runtime
    /// (tokio::time::sleep), остальные шаги - строго последовательные
    /// блокирующие вызовы xdotool.
    pub async fn run(&self, program: &[Instruction], secrets: &SecretBundle) -> Result<()> {
        for instruction in program {
            match instruction {
                Instruction::TypeUser => {
                    match secrets.username.as_deref() {
                        Some(username) => self.type_text(username).await?,
                        None => warn!("USER в программе, но username у записи отсутствует"),
                    }
                }
                Instruction::TypePass => {
                    self.type_text(&secrets.password).await?;
                }
                Instruction::PressKey(key) => {
                    debug!("Нажатие клавиши: {}", key);
                    self.runner
                        .capture("xdotool", &["key", "--clearmodifiers", key])
                        .await?;
                }
                Instruction::TypeText(text) => {
                    self.type_text(text).await?;
                }
                Instruction::Sleep(seconds) => {
                    debug!("Пауза {} с", seconds);
                    tokio::time::sleep(Duration::from_secs_f64(*seconds)).await;
                }
            }
        }

        Ok(())
    }

    /// Ввести текст как есть, с подавлением зажатых модификаторов
    async fn type_text(&self, text: &str) -> Result<()> {
        self.runner
            .capture("xdotool", &["type", "--clearmodifiers", text])
            .await?;
        Ok(())
    }
}
