pub mod input;
pub mod metrics;
pub mod mode;
pub mod result;
pub mod state;
pub mod timer;

pub use input::InputOutcome;
pub use metrics::MetricsSnapshot;
pub use mode::{GameMode, SessionMode};
pub use state::{CharStatus, Session, Status};
