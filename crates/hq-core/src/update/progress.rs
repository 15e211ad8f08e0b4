use serde::{Deserialize, Serialize};

/// Download/install progress reported by the host updater while installing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InstallProgress {
    #[serde(rename_all = "camelCase")]
    Started { content_length: Option<u64> },
    #[serde(rename_all = "camelCase")]
    Progress { downloaded: u64, total: Option<u64> },
    Finished,
}

impl InstallProgress {
    /// Completed fraction in `0.0..=1.0`, when the total size is known.
    pub fn fraction(&self) -> Option<f64> {
        match self {
            InstallProgress::Progress {
                downloaded,
                total: Some(total),
            } if *total > 0 => Some((*downloaded as f64 / *total as f64).clamp(0.0, 1.0)),
            InstallProgress::Finished => Some(1.0),
            _ => None,
        }
    }
}

/// Accumulates chunk callbacks from the host downloader into progress events.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    started: bool,
    downloaded: u64,
    total: Option<u64>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one downloaded chunk; returns the events to report, in order.
    pub fn on_chunk(
        &mut self,
        chunk_length: usize,
        content_length: Option<u64>,
    ) -> Vec<InstallProgress> {
        let mut events = Vec::with_capacity(2);
        if !self.started {
            self.started = true;
            self.total = content_length;
            events.push(InstallProgress::Started { content_length });
        }
        self.downloaded = self.downloaded.saturating_add(chunk_length as u64);
        events.push(InstallProgress::Progress {
            downloaded: self.downloaded,
            total: self.total,
        });
        events
    }
}
