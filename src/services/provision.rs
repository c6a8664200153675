//! Создание autotype-алиаса для уже существующей pass-записи:
//! символьная ссылка на зашифрованный blob плюс, по желанию,
//! интерактивный ввод username и sequence.

use crate::config::Config;
use crate::error::{AutotypeError, Result};
use crate::services::runner::CommandRunner;
use crate::services::store::PassStore;
use std::io::Write;
use std::sync::Arc;
use tracing::info;

pub struct Provisioner {
    store: PassStore,
}

impl Provisioner {
    pub fn new(config: Arc<Config>, runner: Arc<dyn CommandRunner>) -> Self {
        let store = PassStore::new(config.store.root.clone(), runner);
        Self { store }
    }

    /// Создать алиас: `source` - имя существующей pass-записи,
    /// `target` - WINDOWTITLE или WINDOWTITLE/ACCOUNT. Возвращает
    /// префикс новой записи (autotype/<title>[/<account>]).
    ///
    /// Отказ (и код выхода 1): исходный blob отсутствует или
    /// у целевого алиаса уже есть password-маркер.
    pub fn provision(&self, source: &str, target: &str) -> Result<String> {
        let source_blob = self.store.root().join(format!("{}.gpg", source));
        if !source_blob.is_file() {
            return Err(AutotypeError::SourceEntryMissing(source_blob));
        }

        let (title, account) = match target.split_once('/') {
            Some((title, account)) => (title, Some(account)),
            None => (target, None),
        };

        let mut target_dir = self.store.autotype_root().join(title);
        if let Some(account) = account {
            target_dir = target_dir.join(account);
        }

        let password_link = target_dir.join("password.gpg");
        // symlink_metadata, чтобы поймать и повисшую ссылку
        if std::fs::symlink_metadata(&password_link).is_ok() {
            return Err(AutotypeError::AliasConflict(password_link));
        }

        std::fs::create_dir_all(&target_dir)?;
        std::os::unix::fs::symlink(&source_blob, &password_link)?;

        let prefix = match account {
            Some(account) => format!("autotype/{}/{}", title, account),
            None => format!("autotype/{}", title),
        };
        info!("Создан алиас {} -> {:?}", prefix, source_blob);

        Ok(prefix)
    }

    /// Предложить дополнить алиас username- и sequence-записями
    /// (вопросы на stdin, ввод секретов делает сам pass)
    pub async fn offer_extras(&self, prefix: &str) -> Result<()> {
        if !prompt_yes_no(&format!("Добавить username для {}?", prefix))? {
            return Ok(());
        }

        if !self
            .store
            .insert_interactive(&format!("{}/username", prefix), false, true)
            .await?
        {
            info!("pass insert прерван, username не сохранён");
            return Ok(());
        }

        if prompt_yes_no(&format!("Добавить custom sequence для {}?", prefix))? {
            self.store
                .insert_interactive(&format!("{}/sequence", prefix), true, false)
                .await?;
        }

        Ok(())
    }
}

fn prompt_yes_no(question: &str) -> Result<bool> {
    print!("{} [y/N]: ", question);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;

    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "да"))
}
