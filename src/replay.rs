use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::location::{Location, NavigationEvent};
use crate::tracker::NavigationHistoryTracker;

/// Plays a JSON-lines stream of navigation events into a tracker.
pub struct Replay {
    tracker: Option<NavigationHistoryTracker>,
    events: usize,
}

impl Replay {
    /// Starts from a known initial location. Every event in the stream then
    /// counts as a navigation.
    pub fn with_initial(initial: &Location) -> Self {
        Self {
            tracker: Some(NavigationHistoryTracker::new(initial)),
            events: 0,
        }
    }

    /// The first event of the stream is taken as the location observed on
    /// mount and seeds the tracker.
    pub fn from_first_event() -> Self {
        Self {
            tracker: None,
            events: 0,
        }
    }

    /// `None` until the first event arrived when started without an initial
    /// location.
    pub fn tracker(&self) -> Option<&NavigationHistoryTracker> {
        self.tracker.as_ref()
    }

    pub fn events(&self) -> usize {
        self.events
    }

    pub fn handle(&mut self, event: &NavigationEvent) -> Result<bool> {
        let location = event.location()?;
        self.events += 1;

        match self.tracker.as_mut() {
            Some(tracker) => Ok(tracker.update(&location, event.action)),
            None => {
                debug!("Seeding history with {}", location.path());
                self.tracker = Some(NavigationHistoryTracker::new(&location));
                Ok(true)
            }
        }
    }

    pub fn handle_line(&mut self, line: &str) -> Result<Option<bool>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let event: NavigationEvent = serde_json::from_str(line)?;
        self.handle(&event).map(Some)
    }

    /// Reads events until the stream ends. `on_change` runs after every event
    /// that changed the history.
    pub async fn run<R, F>(&mut self, reader: R, mut on_change: F) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        F: FnMut(&NavigationHistoryTracker) -> Result<()>,
    {
        let mut lines = reader.lines();
        let mut line_no = 0;

        while let Some(line) = lines.next_line().await.context("Failed to read event stream")? {
            line_no += 1;
            let changed = self
                .handle_line(&line)
                .with_context(|| format!("Invalid navigation event on line {}", line_no))?;

            if changed == Some(true) {
                if let Some(tracker) = self.tracker.as_ref() {
                    on_change(tracker)?;
                }
            }
        }

        info!("Replayed {} navigation events", self.events);
        Ok(())
    }

    pub fn finish(self) -> Result<NavigationHistoryTracker> {
        self.tracker
            .ok_or_else(|| anyhow!("No navigation events and no initial location"))
    }
}
