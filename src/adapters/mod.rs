// Adapters layer: concrete implementations for external systems (http, display surfaces).

pub mod display;
pub mod http;
