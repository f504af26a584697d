//! In-memory ring of recent input events and navigation outcomes, shown in
//! the debug panel.

use std::collections::VecDeque;

use iptv_core::config::DebugConfig;
use tracing::debug;

pub struct DebugLog {
    entries: VecDeque<String>,
    max: usize,
    enabled: bool,
    pub show_panel: bool,
}

impl DebugLog {
    pub fn new(config: &DebugConfig) -> Self {
        Self {
            entries: VecDeque::with_capacity(config.max_logs.min(1024)),
            max: config.max_logs.max(1),
            enabled: config.enabled,
            show_panel: config.enabled && config.show_panel,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record one line. No-op unless the debug log is enabled.
    pub fn push(&mut self, message: impl Into<String>) {
        if !self.enabled {
            return;
        }
        let message = message.into();
        debug!("[debug] {}", message);
        let stamp = chrono::Local::now().format("%H:%M:%S%.3f");
        self.entries.push_back(format!("{} {}", stamp, message));
        while self.entries.len() > self.max {
            self.entries.pop_front();
        }
    }

    /// Show/hide the panel. Turning it on also enables recording.
    pub fn toggle_panel(&mut self) {
        self.show_panel = !self.show_panel;
        if self.show_panel {
            self.enabled = true;
        }
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
