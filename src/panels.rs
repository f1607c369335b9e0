//! The services behind the calendar and clock panels, opened once per run.

use std::path::PathBuf;

use anyhow::Result;
use log::debug;
use widgetshell_core::config::ShellConfig;
use widgetshell_core::{
    CalendarDate, EventStore, FileStore, KeyValueStore, MemoryStore, OffsetClock, SystemClock,
};

pub type Storage = Box<dyn KeyValueStore>;

pub struct Panels {
    pub config: ShellConfig,
    pub events: EventStore<Storage>,
    pub clock: OffsetClock<SystemClock, Storage>,
}

impl Panels {
    pub fn open(data_dir: Option<PathBuf>, ephemeral: bool) -> Result<Self> {
        if ephemeral {
            debug!("using in-memory storage");
            return Ok(Self::in_memory(ShellConfig::default()));
        }

        let config = ShellConfig::load()?;
        let dir = data_dir.unwrap_or_else(|| config.data_path());
        Ok(Self::at(config, dir))
    }

    fn at(config: ShellConfig, dir: PathBuf) -> Self {
        debug!("using storage at {}", dir.display());
        let store = FileStore::new(dir);
        Self::with_storage(config, Box::new(store.clone()), Box::new(store))
    }

    fn in_memory(config: ShellConfig) -> Self {
        Self::with_storage(
            config,
            Box::new(MemoryStore::new()),
            Box::new(MemoryStore::new()),
        )
    }

    fn with_storage(config: ShellConfig, events: Storage, clock: Storage) -> Self {
        Panels {
            events: EventStore::load(events),
            clock: OffsetClock::load(SystemClock, clock),
            config,
        }
    }

    /// Today's date from the real local clock, matching how day keys are
    /// built everywhere else.
    pub fn today(&self) -> CalendarDate {
        CalendarDate::from(self.clock.real_now().date())
    }
}
