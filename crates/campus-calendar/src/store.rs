//! File-backed event storage.
//!
//! The store is a flat, ordered JSON array of [`Event`] records. Events are
//! appended on add and removed by position; they are never edited in place.
//! A missing file is an empty store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::conflict::find_conflicts;
use crate::error::{CalendarError, Result};
use crate::event::Event;

#[derive(Debug)]
pub struct EventStore {
    path: PathBuf,
    events: Vec<Event>,
}

impl EventStore {
    /// Load the store at `path`, or start empty when the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let events = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => Vec::new(),
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "event store not found, starting empty");
                Vec::new()
            }
            Err(source) => return Err(CalendarError::Io { path, source }),
        };
        debug!(path = %path.display(), count = events.len(), "event store loaded");
        Ok(Self { path, events })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Stored events falling on `date`, in stored order.
    pub fn on_date(&self, date: NaiveDate) -> Vec<&Event> {
        self.events.iter().filter(|e| e.date == date).collect()
    }

    /// Append `event` unless it overlaps a stored event on the same date.
    ///
    /// Malformed time ranges never block the add.
    pub fn add(&mut self, event: Event) -> Result<()> {
        let clashes: Vec<String> = find_conflicts(&event, &self.events)
            .iter()
            .map(|c| format!("'{}' ({})", c.existing.title, c.existing.time))
            .collect();
        if !clashes.is_empty() {
            info!(title = %event.title, date = %event.date, "event refused: overlap");
            return Err(CalendarError::Overlap {
                title: event.title,
                date: event.date,
                clashes,
            });
        }
        self.add_unchecked(event);
        Ok(())
    }

    /// Append `event` without checking for overlaps.
    pub fn add_unchecked(&mut self, event: Event) {
        debug!(title = %event.title, date = %event.date, time = %event.time, "event added");
        self.events.push(event);
    }

    /// Remove and return the event at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Event> {
        if index >= self.events.len() {
            return Err(CalendarError::NoSuchEvent {
                index,
                len: self.events.len(),
            });
        }
        let event = self.events.remove(index);
        debug!(index, title = %event.title, "event removed");
        Ok(event)
    }

    pub fn clear(&mut self) {
        debug!(count = self.events.len(), "event store cleared");
        self.events.clear();
    }

    /// Write the store back to its file, creating parent directories.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| CalendarError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(&self.events)?;
        fs::write(&self.path, json).map_err(|source| CalendarError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), count = self.events.len(), "event store saved");
        Ok(())
    }
}
