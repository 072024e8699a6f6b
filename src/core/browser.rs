use crate::domain::ports::BrowserLauncher;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserOpenResult {
    Opened,
    Failed(String),
}

/// 延遲一次性工作，可在觸發前取消
#[derive(Debug)]
pub struct DelayedAction {
    handle: JoinHandle<BrowserOpenResult>,
}

impl DelayedAction {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// 取消或 panic 時回傳 None
    pub async fn wait(self) -> Option<BrowserOpenResult> {
        self.handle.await.ok()
    }
}

/// 在背景等待 `delay` 後開啟瀏覽器；失敗只交給 `on_result`，不會影響伺服器
pub fn schedule_browser_open<F>(
    launcher: Arc<dyn BrowserLauncher>,
    url: String,
    delay: Duration,
    on_result: F,
) -> DelayedAction
where
    F: FnOnce(&str, &BrowserOpenResult) + Send + 'static,
{
    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        tracing::debug!("Opening browser at {}", url);

        let target = url.clone();
        let result = match tokio::task::spawn_blocking(move || launcher.open(&target)).await {
            Ok(Ok(())) => BrowserOpenResult::Opened,
            Ok(Err(e)) => BrowserOpenResult::Failed(e.to_string()),
            Err(e) => BrowserOpenResult::Failed(format!("launcher task failed: {}", e)),
        };

        if let BrowserOpenResult::Failed(reason) = &result {
            tracing::warn!("Could not auto-open browser: {}", reason);
        }
        on_result(&url, &result);
        result
    });

    DelayedAction { handle }
}
