//! Entry resolver: responsibility and boundaries
//!
//! This module ONLY maps a window title to the list of matching store
//! entries. It reads marker files on the filesystem (presence, never
//! content) and produces plain data; fetching secrets and typing them is
//! someone else's job. Results are recomputed on every invocation - no
//! caching by design.

use crate::error::Result;
use std::fmt;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Вид записи, определяется набором маркер-файлов в каталоге
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Только password
    Password,
    /// username + password, без sequence
    UserPassword,
    /// username + password + sequence
    Sequence,
}

impl EntryKind {
    /// Человекочитаемая метка для диалога выбора
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Password => "Password",
            EntryKind::UserPassword => "Username and Password",
            EntryKind::Sequence => "Custom Sequence",
        }
    }
}

/// Одна запись autotype-хранилища: (вид, аккаунт, заголовок).
/// Пустой аккаунт - аккаунт по умолчанию (маркеры лежат прямо
/// в каталоге заголовка).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub kind: EntryKind,
    pub account: String,
    pub title: String,
}

impl Entry {
    /// Префикс pass-записи: autotype/<title>[/<account>]
    pub fn pass_prefix(&self) -> String {
        if self.account.is_empty() {
            format!("autotype/{}", self.title)
        } else {
            format!("autotype/{}/{}", self.title, self.account)
        }
    }

    /// Полное имя pass-записи для конкретного листа (username/password/sequence)
    pub fn pass_entry(&self, leaf: &str) -> String {
        format!("{}/{}", self.pass_prefix(), leaf)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.pass_prefix(), self.kind.label())
    }
}

fn has_marker(dir: &Path, name: &str) -> bool {
    dir.join(format!("{}.gpg", name)).is_file()
}

/// Классифицировать каталог по маркер-файлам. Без password каталог
/// записью не является; password+sequence без username - тоже нет
/// (sequence всегда подразумевает оба секрета).
fn classify(dir: &Path) -> Option<EntryKind> {
    let has_username = has_marker(dir, "username");
    let has_password = has_marker(dir, "password");
    let has_sequence = has_marker(dir, "sequence");

    match (has_username, has_password, has_sequence) {
        (_, false, _) => None,
        (false, true, false) => Some(EntryKind::Password),
        (true, true, false) => Some(EntryKind::UserPassword),
        (true, true, true) => Some(EntryKind::Sequence),
        (false, true, true) => None,
    }
}

/// Собрать список кандидатов для заголовка активного окна.
/// Подходят каталоги, чьё имя (без учёта регистра) является подстрокой
/// заголовка; внутри каждого - именованные аккаунты плюс сам каталог
/// заголовка как аккаунт по умолчанию. Отсутствующее хранилище - это
/// пустой список, а не ошибка.
pub fn resolve(autotype_root: &Path, window_title: &str) -> Result<Vec<Entry>> {
    let window_title_lower = window_title.to_lowercase();

    let read_root = match std::fs::read_dir(autotype_root) {
        Ok(rd) => rd,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Каталог autotype отсутствует: {:?}", autotype_root);
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut entries = Vec::new();

    for dir_entry in read_root {
        let dir_entry = dir_entry?;
        let title_dir = dir_entry.path();
        if !title_dir.is_dir() {
            continue;
        }
        let Some(title) = dir_entry.file_name().to_str().map(str::to_string) else {
            continue;
        };

        if !window_title_lower.contains(&title.to_lowercase()) {
            continue;
        }
        debug!("Заголовок '{}' совпал с окном '{}'", title, window_title);

        // Сам каталог заголовка - аккаунт по умолчанию
        if let Some(kind) = classify(&title_dir) {
            entries.push(Entry {
                kind,
                account: String::new(),
                title: title.clone(),
            });
        }

        // Именованные аккаунты - подкаталоги
        for account_entry in std::fs::read_dir(&title_dir)? {
            let account_entry = account_entry?;
            let account_dir = account_entry.path();
            if !account_dir.is_dir() {
                continue;
            }
            let Some(account) = account_entry.file_name().to_str().map(str::to_string) else {
                continue;
            };

            if let Some(kind) = classify(&account_dir) {
                entries.push(Entry {
                    kind,
                    account,
                    title: title.clone(),
                });
            }
        }
    }

    // Стабильный порядок для диалога выбора
    entries.sort_by(|a, b| a.account.cmp(&b.account));

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn touch(path: PathBuf) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_marker_classification_truth_table() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();

        assert_eq!(classify(dir), None);

        touch(dir.join("password.gpg"));
        assert_eq!(classify(dir), Some(EntryKind::Password));

        touch(dir.join("username.gpg"));
        assert_eq!(classify(dir), Some(EntryKind::UserPassword));

        touch(dir.join("sequence.gpg"));
        assert_eq!(classify(dir), Some(EntryKind::Sequence));

        // sequence без username записью не является
        fs::remove_file(dir.join("username.gpg")).unwrap();
        assert_eq!(classify(dir), None);

        // без password каталог не запись вовсе
        touch(dir.join("username.gpg"));
        fs::remove_file(dir.join("password.gpg")).unwrap();
        assert_eq!(classify(dir), None);
    }

    #[test]
    fn test_case_insensitive_substring_match() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path().join("Testwebsite/default/password.gpg"));

        let entries = resolve(tmp.path(), "This is my Testwebsite").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Testwebsite");
        assert_eq!(entries[0].account, "default");
        assert_eq!(entries[0].kind, EntryKind::Password);

        // регистр не важен
        let entries = resolve(tmp.path(), "this is my TESTWEBSITE").unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_longer_directory_name_does_not_match() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path().join("testwebsiteX/default/password.gpg"));

        let entries = resolve(tmp.path(), "Testwebsite").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_title_dir_itself_is_default_account() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path().join("Mail/password.gpg"));

        let entries = resolve(tmp.path(), "My cool Mail").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].account, "");
        assert_eq!(entries[0].pass_prefix(), "autotype/Mail");
    }

    #[test]
    fn test_multiple_title_dirs_match_simultaneously() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path().join("Mail/password.gpg"));
        touch(tmp.path().join("My cool Mail/work/password.gpg"));

        let entries = resolve(tmp.path(), "My cool Mail - Inbox").unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_candidates_sorted_by_account() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path().join("Site/zeta/password.gpg"));
        touch(tmp.path().join("Site/alpha/password.gpg"));
        touch(tmp.path().join("Site/middle/password.gpg"));

        let entries = resolve(tmp.path(), "Site").unwrap();
        let accounts: Vec<&str> = entries.iter().map(|e| e.account.as_str()).collect();
        assert_eq!(accounts, vec!["alpha", "middle", "zeta"]);
    }

    #[test]
    fn test_missing_root_yields_empty_list() {
        let entries = resolve(Path::new("/nonexistent/autotype"), "anything").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_directory_without_password_excluded() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path().join("Site/broken/username.gpg"));
        touch(tmp.path().join("Site/good/password.gpg"));

        let entries = resolve(tmp.path(), "Site").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].account, "good");
    }

    #[test]
    fn test_pass_entry_paths() {
        let entry = Entry {
            kind: EntryKind::Sequence,
            account: "work".to_string(),
            title: "Testwebsite".to_string(),
        };
        assert_eq!(
            entry.pass_entry("sequence"),
            "autotype/Testwebsite/work/sequence"
        );
    }
}
