// Adapters layer: concrete implementations of the domain ports.

pub mod convert;
pub mod storage;

pub use convert::MarkdownConverter;
pub use storage::LocalStorage;
