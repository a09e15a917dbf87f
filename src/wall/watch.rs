use crate::config::wall::WallConfig;
use crate::foundation::core::{Millis, Viewport, Visibility};
use crate::foundation::error::{WallError, WallResult};
use crate::item::Item;
use crate::wall::engine::Wall;

/// Host-side change the wall reacts to.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WatchEvent {
    /// Window resized. Recomputed on every event, no debounce.
    Resize { width: f64, height: f64 },
    /// Document became hidden or visible.
    Visibility { state: Visibility },
    /// The item source produced a new list.
    Items { items: Vec<Item> },
    /// Configuration (hash parameters) changed.
    Config { config: WallConfig },
}

/// A [`WatchEvent`] pinned to a timeline position.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScriptedEvent {
    pub at: Millis,
    #[serde(flatten)]
    pub event: WatchEvent,
}

/// Ordered list of host events, used to replay a session against a wall.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WatchScript {
    events: Vec<ScriptedEvent>,
}

impl WatchScript {
    /// Build a script; events are stably sorted by time.
    pub fn new(mut events: Vec<ScriptedEvent>) -> Self {
        events.sort_by_key(|e| e.at);
        Self { events }
    }

    /// Parse a JSON array of `{"at": ms, "type": ..., ...}` objects.
    pub fn from_json(json: &str) -> WallResult<Self> {
        let events: Vec<ScriptedEvent> = serde_json::from_str(json)?;
        for e in &events {
            if let WatchEvent::Config { config } = &e.event {
                config.validate().map_err(|err| {
                    WallError::validation(format!("event at {}ms: {err}", e.at.0))
                })?;
            }
        }
        Ok(Self::new(events))
    }

    pub fn events(&self) -> &[ScriptedEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Wall {
    /// Dispatch one host event.
    ///
    /// Only a config change can fail (invalid values); the wall is left untouched in
    /// that case.
    pub fn handle(&mut self, event: WatchEvent, now: Millis) -> WallResult<()> {
        match event {
            WatchEvent::Resize { width, height } => self.resize(Viewport::new(width, height), now),
            WatchEvent::Visibility { state } => self.set_visibility(state, now),
            WatchEvent::Items { items } => self.replace_items(items, now),
            WatchEvent::Config { config } => self.set_config(config, now)?,
        }
        Ok(())
    }

    /// Apply every scripted event in order.
    pub fn replay(&mut self, script: &WatchScript) -> WallResult<()> {
        for e in script.events() {
            self.handle(e.event.clone(), e.at)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/wall/watch.rs"]
mod tests;
