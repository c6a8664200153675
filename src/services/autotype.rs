//! Autotype orchestrator: сценарий одного запуска.
//!
//! Захват активного окна -> подбор кандидатов -> выбор -> пауза ->
//! получение секретов -> проверка фокуса -> исполнение программы.
//! Всё строго последовательно, без состояния между запусками.

use crate::config::Config;
use crate::error::Result;
use crate::services::chooser::Chooser;
use crate::services::resolver::{self, EntryKind};
use crate::services::runner::CommandRunner;
use crate::services::sequence::{self, Instruction, SecretBundle, SequenceInterpreter};
use crate::services::store::PassStore;
use crate::services::window::WindowSystem;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Итог одного запуска автоввода. Все варианты - штатное завершение
/// (код выхода 0); ошибки идут отдельным путём через Result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Программа ввода выполнена до конца
    Completed,
    /// Для окна не нашлось ни одной записи
    NoMatch,
    /// Пользователь закрыл диалог выбора
    Cancelled,
    /// Фокус ушёл с окна между захватом и вводом - ничего не введено
    FocusChanged,
}

pub struct Autotype {
    config: Arc<Config>,
    windows: WindowSystem,
    store: PassStore,
    chooser: Chooser,
    interpreter: SequenceInterpreter,
}

impl Autotype {
    pub fn new(config: Arc<Config>, runner: Arc<dyn CommandRunner>) -> Self {
        let windows = WindowSystem::new(runner.clone());
        let store = PassStore::new(config.store.root.clone(), runner.clone());
        let chooser = Chooser::new(config.clone(), runner.clone());
        let interpreter = SequenceInterpreter::new(runner);

        Self {
            config,
            windows,
            store,
            chooser,
            interpreter,
        }
    }

    pub async fn run(&self) -> Result<Outcome> {
        // Захват активного окна
        let window = self.windows.active_window().await?;
        info!("Активное окно: {}", window);

        // Подбор кандидатов по заголовку
        let candidates = resolver::resolve(&self.store.autotype_root(), &window.title)?;
        debug!("Кандидатов найдено: {}", candidates.len());

        if candidates.is_empty() {
            info!("Подходящих записей для окна нет");
            return Ok(Outcome::NoMatch);
        }

        // Выбор единственной записи
        let Some(entry) = self.chooser.choose(&candidates).await? else {
            return Ok(Outcome::Cancelled);
        };
        info!("Запись для ввода: {}", entry);

        // Пауза, чтобы клавиши вызвавшей горячей комбинации
        // не утекли в целевое окно
        let settle = self.config.typing.settle_delay_s;
        if settle > 0.0 {
            debug!("Пауза перед вводом: {} с", settle);
            tokio::time::sleep(Duration::from_secs_f64(settle)).await;
        }

        // Получение секретов и программы по виду записи
        let (program, secrets) = match entry.kind {
            EntryKind::Password => {
                let password = self.store.show(&entry.pass_entry("password")).await?;
                (
                    vec![Instruction::TypePass],
                    SecretBundle {
                        username: None,
                        password,
                    },
                )
            }
            EntryKind::UserPassword | EntryKind::Sequence => {
                let username = self.store.show(&entry.pass_entry("username")).await?;
                let password = self.store.show(&entry.pass_entry("password")).await?;

                let program = if entry.kind == EntryKind::Sequence {
                    let text = self.store.show_multiline(&entry.pass_entry("sequence")).await?;
                    sequence::parse_program(&text)
                } else {
                    sequence::default_program()
                };

                (
                    program,
                    SecretBundle {
                        username: Some(username),
                        password,
                    },
                )
            }
        };

        // Проверка фокуса перед вводом логина: если окно сменилось,
        // не вводим вообще ничего. Для записей с одним паролем
        // проверка не нужна - там нет шага с username.
        if entry.kind != EntryKind::Password {
            let current_id = self.windows.active_window_id().await?;
            if current_id != window.id {
                info!(
                    "Фокус сменился (было id {}, стало id {}) - ввод отменён",
                    window.id, current_id
                );
                return Ok(Outcome::FocusChanged);
            }
        }

        // Исполнение программы ввода
        self.interpreter.run(&program, &secrets).await?;
        info!("Автоввод завершён");

        Ok(Outcome::Completed)
    }
}
