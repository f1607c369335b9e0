//! Date/time core for the widgetshell panels.
//!
//! This crate provides the stateful pieces behind the calendar and clock panels:
//! - `EventStore`: per-day labels and the banner preview resolver
//! - `OffsetClock` and `ClockEditor`: the user-adjustable clock and its edit mode
//! - `MonthGrid` and `HandAngles`: view models derived from the above
//!
//! Rendering is left to the embedding application.

pub mod clock_editor;
pub mod config;
pub mod date_key;
pub mod error;
pub mod event_store;
pub mod hands;
pub mod month_grid;
pub mod offset_clock;
pub mod storage;
pub mod ticker;
pub mod time_source;

pub use clock_editor::{ClockEditor, EditState, PointerSample};
pub use date_key::CalendarDate;
pub use error::{ClockError, ShellError, ShellResult};
pub use event_store::{EventStore, Preview, PreviewTag};
pub use hands::HandAngles;
pub use month_grid::{GridDay, MonthGrid};
pub use offset_clock::OffsetClock;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use time_source::{SystemClock, TimeSource};
