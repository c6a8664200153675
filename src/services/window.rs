use crate::error::Result;
use crate::services::runner::CommandRunner;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Информация об активном окне
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    /// Идентификатор окна (текст, как его вернул xdotool)
    pub id: String,
    pub title: String,
}

impl fmt::Display for WindowInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" (id {})", self.title, self.id)
    }
}

/// Запросы к оконной системе через xdotool
pub struct WindowSystem {
    runner: Arc<dyn CommandRunner>,
}

impl WindowSystem {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Идентификатор активного окна
    pub async fn active_window_id(&self) -> Result<String> {
        let id = self
            .runner
            .capture("xdotool", &["getactivewindow"])
            .await?
            .trim()
            .to_string();
        debug!("Активное окно: id {}", id);
        Ok(id)
    }

    /// Заголовок окна по его идентификатору
    pub async fn window_title(&self, id: &str) -> Result<String> {
        let title = self
            .runner
            .capture("xdotool", &["getwindowname", id])
            .await?
            .trim()
            .to_string();
        debug!("Заголовок окна {}: '{}'", id, title);
        Ok(title)
    }

    /// Активное окно целиком: id + заголовок
    pub async fn active_window(&self) -> Result<WindowInfo> {
        let id = self.active_window_id().await?;
        let title = self.window_title(&id).await?;
        Ok(WindowInfo { id, title })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::runner::testing::RecordingRunner;
    use crate::services::runner::CmdOutput;

    #[tokio::test]
    async fn test_active_window_queries_id_then_title() {
        let runner = Arc::new(RecordingRunner::with_responses([
            CmdOutput::ok("1234\n"),
            CmdOutput::ok("This is my Testwebsite\n"),
        ]));
        let windows = WindowSystem::new(runner.clone());

        let window = windows.active_window().await.unwrap();
        assert_eq!(window.id, "1234");
        assert_eq!(window.title, "This is my Testwebsite");

        assert_eq!(
            runner.invocations(),
            vec![
                "xdotool getactivewindow".to_string(),
                "xdotool getwindowname 1234".to_string(),
            ]
        );
    }
}
