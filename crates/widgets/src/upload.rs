//! Upload Progress
//! 
//! Decodes the upload status payload and turns byte counts into the
//! progress line shown under a file field. Fetching the payload on a timer
//! is left to the page.

use std::fmt;
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use wikipad_core::{Event, EventBus, Result, WikipadError};

/// Status payload of the upload stats endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadStatus {
    pub valid_id: bool,
    #[serde(default)]
    pub uploaded_size: u64,
    #[serde(default)]
    pub total_size: u64,
}

/// Bytes received so far out of the total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    pub uploaded: u64,
    pub total: u64,
}

impl UploadProgress {
    /// Percentage done, 0 when the total is unknown
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        (self.uploaded.saturating_mul(100) / self.total).min(100) as u8
    }
}

/// Decode a status payload.
///
/// A falsy payload (empty, `null`, `false`, `0`, `""`) or `valid_id: false`
/// means the upload is over or unknown, and yields `None`.
pub fn parse_status(payload: &str) -> Result<Option<UploadProgress>> {
    let payload = payload.trim();
    if payload.is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(payload)?;
    let falsy = match &value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    };
    if falsy {
        return Ok(None);
    }

    let status: UploadStatus = serde_json::from_value(value)
        .map_err(|e| WikipadError::UploadStatus(e.to_string()))?;
    if !status.valid_id {
        return Ok(None);
    }
    Ok(Some(UploadProgress {
        uploaded: status.uploaded_size,
        total: status.total_size,
    }))
}

const UNITS: [&str; 3] = ["bytes", "Ko", "Mo"];

/// Human readable size: bytes, then Ko and Mo by division against 1024
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

/// Where the current upload progress comes from
pub trait UploadStatusSource {
    /// Current progress, or `None` once the upload is over
    fn current(&mut self) -> Result<Option<UploadProgress>>;
}

impl<F> UploadStatusSource for F
where
    F: FnMut() -> Result<Option<UploadProgress>>,
{
    fn current(&mut self) -> Result<Option<UploadProgress>> {
        self()
    }
}

/// A formatted progress line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressReport {
    pub uploaded: String,
    pub total: String,
    pub percent: u8,
}

impl From<UploadProgress> for ProgressReport {
    fn from(progress: UploadProgress) -> Self {
        Self {
            uploaded: format_size(progress.uploaded),
            total: format_size(progress.total),
            percent: progress.percent(),
        }
    }
}

impl fmt::Display for ProgressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} ({}%)", self.uploaded, self.total, self.percent)
    }
}

/// Turns status reads into progress lines until the upload is over
#[derive(Default)]
pub struct ProgressReporter {
    finished: bool,
    events: Option<Arc<EventBus>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(mut self, events: Arc<EventBus>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Read the source once. `None` means stop polling.
    pub fn step(&mut self, source: &mut dyn UploadStatusSource) -> Result<Option<ProgressReport>> {
        if self.finished {
            return Ok(None);
        }

        match source.current()? {
            Some(progress) => {
                debug!("Upload progress {}/{}", progress.uploaded, progress.total);
                self.emit(Event::UploadProgress {
                    uploaded: progress.uploaded,
                    total: progress.total,
                });
                Ok(Some(progress.into()))
            }
            None => {
                info!("Upload finished");
                self.finished = true;
                self.emit(Event::UploadFinished);
                Ok(None)
            }
        }
    }

    fn emit(&self, event: Event) {
        if let Some(events) = &self.events {
            events.emit(event);
        }
    }
}
