pub mod headless_mode;
pub mod messages;
pub mod setup;

pub use headless_mode::run_headless_mode;
pub use setup::{PageOutput, SessionData, setup_session};
