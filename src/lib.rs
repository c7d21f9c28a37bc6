mod config;
mod error;
mod mover;
mod pattern;
mod pause;
mod retry;
mod scanner;
mod sweeper;

pub use config::{PausePeriod, SweepConfig};
pub use error::{MoveError, Result, SweepError};
pub use mover::{FileMover, MoveOutcome};
pub use pattern::PatternSet;
pub use pause::{is_paused, parse_windows, PauseWindow};
pub use retry::RetryPolicy;
pub use scanner::ScanCycle;
pub use sweeper::{Sweeper, SweeperHandle};
