//! Window chrome domain types.

use serde::{Deserialize, Serialize};

/// Local view of the host window.
///
/// Eventually consistent with the host: optimistic writes are allowed but the
/// next authoritative query always wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowState {
    pub is_maximized: bool,
}

impl WindowState {
    pub fn new(is_maximized: bool) -> Self {
        Self { is_maximized }
    }

    pub fn toggled(self) -> Self {
        Self {
            is_maximized: !self.is_maximized,
        }
    }
}
