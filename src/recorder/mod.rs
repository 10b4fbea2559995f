pub mod config;
pub mod controller;
pub mod state;

pub use config::RecorderConfig;
pub use controller::{RecorderSnapshot, SessionController};
pub use state::{RecordOutcome, RecorderState, RecorderStatus};

pub(crate) use controller::RecorderCore;
