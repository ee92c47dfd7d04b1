mod estimate;
mod smooth;
mod summary;

pub use estimate::ProgressEstimate;
pub use smooth::{SMOOTH_DURATION, SMOOTH_STEP, smooth_steps};
pub use summary::SummarySession;
