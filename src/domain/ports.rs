use crate::domain::model::FetchedCount;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// 顯示計數的介面 (網頁元素、檔案、終端機)
pub trait DisplaySurface: Send + Sync {
    /// Replaces the text content of the element addressed by `element_id`.
    fn write_text(
        &self,
        element_id: &str,
        text: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint_url(&self) -> &str;
    fn element_id(&self) -> &str;
    /// `None` means the request may wait indefinitely.
    fn request_timeout(&self) -> Option<Duration>;
}

#[async_trait]
pub trait CountSource: Send + Sync {
    async fn fetch(&self) -> Result<FetchedCount>;
}
