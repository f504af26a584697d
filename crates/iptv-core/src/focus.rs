//! FocusState: which panel has focus, where, and which group feeds the
//! channel panel.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    /// Group list (left).
    #[default]
    Groups,
    /// Channels of the current group (right).
    Channels,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FocusState {
    panel: Panel,
    index: usize,
    current_group: Option<String>,
}

/// Step one item back with wraparound. `len` must be non-zero.
fn wrap_prev(index: usize, len: usize) -> usize {
    if index == 0 || index >= len {
        len - 1
    } else {
        index - 1
    }
}

/// Step one item forward with wraparound. `len` must be non-zero.
fn wrap_next(index: usize, len: usize) -> usize {
    (index + 1) % len
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current_group(&self) -> Option<&str> {
        self.current_group.as_deref()
    }

    pub fn is_focused(&self, panel: Panel) -> bool {
        self.panel == panel
    }

    /// Move up within a list of `len` visible items. No-op on an empty list.
    pub fn move_up(&mut self, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        self.index = wrap_prev(self.index, len);
        true
    }

    /// Move down within a list of `len` visible items. No-op on an empty list.
    pub fn move_down(&mut self, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        self.index = wrap_next(self.index, len);
        true
    }

    /// Channels → Groups, index reset. Returns whether focus moved.
    pub fn focus_groups(&mut self) -> bool {
        if self.panel == Panel::Groups {
            return false;
        }
        self.panel = Panel::Groups;
        self.index = 0;
        true
    }

    /// Groups → Channels, index reset. Refused while no group is selected.
    pub fn focus_channels(&mut self) -> bool {
        if self.panel == Panel::Channels || self.current_group.is_none() {
            return false;
        }
        self.panel = Panel::Channels;
        self.index = 0;
        true
    }

    /// Make `group` feed the channel panel. Focus does not move.
    pub fn select_group(&mut self, group: impl Into<String>) {
        self.current_group = Some(group.into());
    }

    /// Put the focus back on the first group with `group` selected, as after a
    /// fresh playlist load.
    pub fn reset(&mut self, group: Option<String>) {
        self.panel = Panel::Groups;
        self.index = 0;
        self.current_group = group;
    }

    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// Pull the index back into `0..len` (0 when the list is empty).
    pub fn clamp(&mut self, len: usize) {
        if self.index >= len {
            self.index = len.saturating_sub(1);
        }
    }
}
