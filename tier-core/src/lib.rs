pub mod calculations;
pub mod chart;
pub mod history;
pub mod models;
pub mod session;

pub use calculations::{ScheduleError, TierSchedule};
pub use chart::{ChartData, Separator};
pub use history::{HISTORY_CAPACITY, IncomeHistory};
pub use models::*;
pub use session::PricingSession;
