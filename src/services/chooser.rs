//! Выбор записи при нескольких совпадениях. Единственный кандидат
//! возвращается сразу, без всяких диалогов; несколько - через внешний
//! диалог (zenity или kdialog, по конфигурации).

use crate::config::Config;
use crate::error::{AutotypeError, Result};
use crate::services::resolver::Entry;
use crate::services::runner::CommandRunner;
use std::sync::Arc;
use tracing::{debug, info};

pub struct Chooser {
    config: Arc<Config>,
    runner: Arc<dyn CommandRunner>,
}

impl Chooser {
    pub fn new(config: Arc<Config>, runner: Arc<dyn CommandRunner>) -> Self {
        Self { config, runner }
    }

    /// Вернуть ровно одну запись или None (нет кандидатов / отмена).
    /// Непустой ответ диалога, не являющийся корректным индексом
    /// списка, - фатальная ошибка ввода.
    pub async fn choose<'a>(&self, candidates: &'a [Entry]) -> Result<Option<&'a Entry>> {
        match candidates.len() {
            0 => return Ok(None),
            1 => {
                debug!("Единственный кандидат, диалог не нужен: {}", candidates[0]);
                return Ok(Some(&candidates[0]));
            }
            n => info!("Найдено {} кандидатов, показываем диалог выбора", n),
        }

        let raw = self.present_dialog(candidates).await?;
        let raw = raw.trim();

        // Пустой ответ или закрытый диалог - отмена, не ошибка
        if raw.is_empty() {
            info!("Выбор отменён пользователем");
            return Ok(None);
        }

        let index: usize = raw
            .parse()
            .map_err(|_| AutotypeError::BadSelection(raw.to_string()))?;
        let entry = candidates
            .get(index)
            .ok_or_else(|| AutotypeError::BadSelection(raw.to_string()))?;

        debug!("Выбрана запись: {}", entry);
        Ok(Some(entry))
    }

    async fn present_dialog(&self, candidates: &[Entry]) -> Result<String> {
        let dialog = &self.config.dialog;

        let (program, args) = if dialog.backend == "kdialog" {
            let mut args = vec![
                "--geometry".to_string(),
                format!("{}x{}", dialog.width, dialog.height),
                "--menu".to_string(),
                "Multiple Choices:".to_string(),
            ];
            for (index, entry) in candidates.iter().enumerate() {
                args.push(index.to_string());
                args.push(format!(
                    "{} | {} ({})",
                    entry.account,
                    entry.title,
                    entry.kind.label()
                ));
            }
            ("kdialog", args)
        } else {
            let mut args = vec![
                "--list".to_string(),
                "--text".to_string(),
                "Multiple Choices:".to_string(),
                "--column".to_string(),
                "Index".to_string(),
                "--column".to_string(),
                "Account".to_string(),
                "--column".to_string(),
                "Title".to_string(),
                "--column".to_string(),
                "Type".to_string(),
                "--hide-column".to_string(),
                "1".to_string(),
                "--width".to_string(),
                dialog.width.to_string(),
                "--height".to_string(),
                dialog.height.to_string(),
            ];
            for (index, entry) in candidates.iter().enumerate() {
                args.push(index.to_string());
                args.push(entry.account.clone());
                args.push(entry.title.clone());
                args.push(entry.kind.label().to_string());
            }
            ("zenity", args)
        };

        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        // Отмена диалога - ненулевой код с пустым stdout, поэтому
        // статус здесь не проверяем
        let out = self.runner.output(program, &arg_refs).await?;
        Ok(out.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::resolver::EntryKind;
    use crate::services::runner::testing::RecordingRunner;
    use crate::services::runner::CmdOutput;

    fn entry(account: &str, kind: EntryKind) -> Entry {
        Entry {
            kind,
            account: account.to_string(),
            title: "Testwebsite".to_string(),
        }
    }

    fn chooser_with(runner: Arc<RecordingRunner>) -> Chooser {
        Chooser::new(Arc::new(Config::default()), runner)
    }

    #[tokio::test]
    async fn test_empty_list_is_none_selected() {
        let runner = Arc::new(RecordingRunner::new());
        let chooser = chooser_with(runner.clone());

        let selected = chooser.choose(&[]).await.unwrap();
        assert!(selected.is_none());
        assert!(runner.invocations().is_empty());
    }

    #[tokio::test]
    async fn test_single_candidate_skips_dialog() {
        let runner = Arc::new(RecordingRunner::new());
        let chooser = chooser_with(runner.clone());
        let candidates = vec![entry("only", EntryKind::Password)];

        let selected = chooser.choose(&candidates).await.unwrap();
        assert_eq!(selected, Some(&candidates[0]));
        assert!(runner.invocations().is_empty());
    }

    #[tokio::test]
    async fn test_dialog_selection_by_index() {
        let runner = Arc::new(RecordingRunner::with_responses([CmdOutput::ok("1\n")]));
        let chooser = chooser_with(runner.clone());
        let candidates = vec![
            entry("alpha", EntryKind::Password),
            entry("beta", EntryKind::UserPassword),
        ];

        let selected = chooser.choose(&candidates).await.unwrap();
        assert_eq!(selected, Some(&candidates[1]));

        let invocations = runner.invocations();
        assert_eq!(invocations.len(), 1);
        assert!(invocations[0].starts_with("zenity --list"));
        assert!(invocations[0].contains("Username and Password"));
    }

    #[tokio::test]
    async fn test_cancelled_dialog_is_none_selected() {
        // zenity при отмене: ненулевой код, пустой stdout
        let runner = Arc::new(RecordingRunner::with_responses([CmdOutput::failed("")]));
        let chooser = chooser_with(runner);
        let candidates = vec![
            entry("alpha", EntryKind::Password),
            entry("beta", EntryKind::Password),
        ];

        let selected = chooser.choose(&candidates).await.unwrap();
        assert!(selected.is_none());
    }

    #[tokio::test]
    async fn test_unparsable_index_is_fatal() {
        let runner = Arc::new(RecordingRunner::with_responses([CmdOutput::ok("abc\n")]));
        let chooser = chooser_with(runner);
        let candidates = vec![
            entry("alpha", EntryKind::Password),
            entry("beta", EntryKind::Password),
        ];

        let err = chooser.choose(&candidates).await.unwrap_err();
        assert!(matches!(err, AutotypeError::BadSelection(_)));
    }

    #[tokio::test]
    async fn test_out_of_range_index_is_fatal() {
        let runner = Arc::new(RecordingRunner::with_responses([CmdOutput::ok("5")]));
        let chooser = chooser_with(runner);
        let candidates = vec![
            entry("alpha", EntryKind::Password),
            entry("beta", EntryKind::Password),
        ];

        let err = chooser.choose(&candidates).await.unwrap_err();
        assert!(matches!(err, AutotypeError::BadSelection(_)));
    }

    #[tokio::test]
    async fn test_kdialog_backend_uses_menu() {
        let mut config = Config::default();
        config.dialog.backend = "kdialog".to_string();
        let runner = Arc::new(RecordingRunner::with_responses([CmdOutput::ok("0")]));
        let chooser = Chooser::new(Arc::new(config), runner.clone());
        let candidates = vec![
            entry("alpha", EntryKind::Password),
            entry("beta", EntryKind::Sequence),
        ];

        let selected = chooser.choose(&candidates).await.unwrap();
        assert_eq!(selected, Some(&candidates[0]));

        let invocations = runner.invocations();
        assert!(invocations[0].starts_with("kdialog --geometry 500x300 --menu"));
        assert!(invocations[0].contains("beta | Testwebsite (Custom Sequence)"));
    }
}
