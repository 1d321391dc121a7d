// Gantry Infrastructure - System Adapters
// Implements: process launcher, signal supervisor, log rotator

pub mod launcher;
pub mod log_rotate;
pub mod shutdown;
pub mod supervisor;

pub use launcher::{exec_java, prepare_for_run};
pub use log_rotate::LogRotator;
pub use shutdown::{shutdown_channel, ShutdownHandle, ShutdownToken};
pub use supervisor::{handle_exit, Supervisor};
