mod display_state;
mod observation;
mod tier_resolution;

pub use display_state::DisplayState;
pub use observation::Observation;
pub use tier_resolution::{IncomeResult, TierResolution};
