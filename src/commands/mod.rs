pub mod clock;
pub mod config;
pub mod events;
pub mod month;
pub mod watch;
