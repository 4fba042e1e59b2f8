// Presentation layer: turns command line paths into uploads and renders outcomes.

pub mod presenter;
pub mod report;
pub mod uploads;

pub use presenter::TerminalPresenter;
pub use report::{BatchReport, BatchSummary};
