//! Per-day calendar labels and the banner preview resolver.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound::{Excluded, Unbounded};

use log::{debug, warn};

use crate::date_key::CalendarDate;
use crate::storage::KeyValueStore;

/// Storage key for the serialized label mapping.
pub const EVENTS_KEY: &str = "calendar_events";

/// How a preview relates to the day it was resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewTag {
    Today,
    Tomorrow,
    Date(CalendarDate),
}

impl fmt::Display for PreviewTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PreviewTag::Today => write!(f, "Today"),
            PreviewTag::Tomorrow => write!(f, "Tomorrow"),
            PreviewTag::Date(date) => write!(f, "{}", date.short_label()),
        }
    }
}

/// The single event surfaced in the calendar banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub label: String,
    pub tag: PreviewTag,
}

/// Maps calendar dates to free-text labels, writing through to storage on
/// every mutation.
pub struct EventStore<S: KeyValueStore> {
    storage: S,
    // Keyed by canonical date string; BTreeMap order is chronological.
    labels: BTreeMap<String, String>,
}

impl<S: KeyValueStore> EventStore<S> {
    /// Load the mapping from storage. Missing or unparsable data yields an
    /// empty store.
    pub fn load(storage: S) -> Self {
        let labels = match storage.get(EVENTS_KEY) {
            Some(raw) => match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(labels) => labels,
                Err(e) => {
                    warn!("ignoring unreadable {}: {}", EVENTS_KEY, e);
                    BTreeMap::new()
                }
            },
            None => BTreeMap::new(),
        };

        debug!("loaded {} calendar labels", labels.len());
        EventStore { storage, labels }
    }

    pub fn get(&self, date: CalendarDate) -> Option<&str> {
        self.labels.get(&date.key()).map(String::as_str)
    }

    pub fn has_label(&self, date: CalendarDate) -> bool {
        self.labels.contains_key(&date.key())
    }

    /// Upsert `text` for `date`, or remove the entry when `text` is blank.
    ///
    /// The full mapping is persisted either way. A failed write is logged and
    /// the in-memory state stays authoritative until the next mutation.
    pub fn set(&mut self, date: CalendarDate, text: &str) {
        let key = date.key();

        if text.trim().is_empty() {
            debug!("clearing label for {}", key);
            self.labels.remove(&key);
        } else {
            debug!("setting label for {}", key);
            self.labels.insert(key, text.to_string());
        }

        self.persist();
    }

    /// Pick the label to show in the banner for `today`.
    ///
    /// Today's label wins, then tomorrow's, then the soonest later date.
    pub fn preview_for(&self, today: CalendarDate) -> Option<Preview> {
        if let Some(label) = self.get(today) {
            return Some(Preview {
                label: label.to_string(),
                tag: PreviewTag::Today,
            });
        }

        let tomorrow = today.next_day();
        if let Some(label) = self.get(tomorrow) {
            return Some(Preview {
                label: label.to_string(),
                tag: PreviewTag::Tomorrow,
            });
        }

        self.labels
            .range::<str, _>((Excluded(today.key().as_str()), Unbounded))
            .find_map(|(key, label)| {
                CalendarDate::parse_key(key).map(|date| Preview {
                    label: label.clone(),
                    tag: PreviewTag::Date(date),
                })
            })
    }

    /// Labelled dates in chronological order. Keys that are not canonical
    /// dates are skipped.
    pub fn iter(&self) -> impl Iterator<Item = (CalendarDate, &str)> {
        self.labels.iter().filter_map(|(key, label)| {
            CalendarDate::parse_key(key).map(|date| (date, label.as_str()))
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&mut self) {
        let serialized = match serde_json::to_string(&self.labels) {
            Ok(json) => json,
            Err(e) => {
                warn!("could not serialize {}: {}", EVENTS_KEY, e);
                return;
            }
        };

        if let Err(e) = self.storage.set(EVENTS_KEY, &serialized) {
            warn!("could not persist {}: {}", EVENTS_KEY, e);
        }
    }
}
