pub mod batch;
pub mod config;
pub mod error;
pub mod fit;
pub mod report;
pub mod scanner;

pub use batch::BatchRunner;
pub use config::{AssetConfig, LocaleConfig, TargetSize};
pub use error::{AssetError, Result};
pub use report::{BatchReport, BatchStats};
