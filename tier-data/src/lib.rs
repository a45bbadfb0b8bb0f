pub mod export;
pub mod loader;

pub use export::{HistoryExportError, HistoryExporter};
pub use loader::{ScheduleLoader, ScheduleLoaderError, ScheduleRecord};
