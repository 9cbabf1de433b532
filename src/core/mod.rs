pub mod contract;
pub mod fetcher;
pub mod widget;

pub use crate::domain::model::{BodyKind, ContractReport, Count, FetchedCount};
pub use crate::domain::ports::{ConfigProvider, CountSource, DisplaySurface};
pub use crate::utils::error::Result;
