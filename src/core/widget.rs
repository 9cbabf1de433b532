use crate::core::{Count, CountSource, DisplaySurface};
use crate::utils::error::Result;
use tokio::task::JoinHandle;

/// Fixed message emitted once for every failed load.
pub const FAILURE_MESSAGE: &str = "That didn't work";

/// 取得計數並寫入顯示元素
///
/// One `load` is one request and at most one write. Failures of any kind
/// (transport, HTTP status, decode, display) leave the element untouched,
/// emit [`FAILURE_MESSAGE`] once and come back as a typed error.
pub struct CounterWidget<S: CountSource, D: DisplaySurface> {
    source: S,
    display: D,
    element_id: String,
}

impl<S: CountSource, D: DisplaySurface> CounterWidget<S, D> {
    pub fn new(source: S, display: D, element_id: impl Into<String>) -> Self {
        Self {
            source,
            display,
            element_id: element_id.into(),
        }
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub async fn load(&self) -> Result<Count> {
        let result = self.fetch_and_render().await;
        if let Err(e) = &result {
            tracing::warn!(
                error = %e,
                category = ?e.category(),
                element_id = %self.element_id,
                "{}",
                FAILURE_MESSAGE
            );
        }
        result
    }

    async fn fetch_and_render(&self) -> Result<Count> {
        let fetched = self.source.fetch().await?;
        let text = fetched.count.display_text();

        tracing::info!(
            "🔢 Visitor count {} received at {} (HTTP {})",
            text,
            fetched.received_at.to_rfc3339(),
            fetched.status
        );

        self.display.write_text(&self.element_id, &text).await?;
        tracing::debug!("Wrote count to element '{}'", self.element_id);

        Ok(fetched.count)
    }
}

impl<S, D> CounterWidget<S, D>
where
    S: CountSource + 'static,
    D: DisplaySurface + 'static,
{
    /// Starts a load in the background; the caller may drop the handle.
    pub fn spawn(self) -> JoinHandle<Result<Count>> {
        tokio::spawn(async move { self.load().await })
    }
}
