use std::path::Path;

use anyhow::Context;

use crate::{
    assets::decode::{ImageHandle, decode_image},
    foundation::error::{CoverError, CoverResult},
};

/// A file handed over by the host's file picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name as reported by the picker.
    pub name: String,
    /// MIME type as reported by the picker.
    pub mime: Option<String>,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    /// Wrap in-memory bytes.
    pub fn new(name: impl Into<String>, mime: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.map(str::to_string),
            bytes,
        }
    }

    /// Read a file from disk, guessing the MIME type from its extension the way a picker would.
    pub fn from_path(path: &Path) -> CoverResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime = match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("png") => Some("image/png"),
            Some("jpg" | "jpeg") => Some("image/jpeg"),
            _ => None,
        };
        Ok(Self::new(name, mime, bytes))
    }
}

/// Identifies one in-flight decode. Completions carrying any other ticket are stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DecodeTicket(pub(crate) u64);

/// Decode work the host runs, on any thread, then reports back.
#[derive(Debug)]
pub struct DecodeJob {
    ticket: DecodeTicket,
    file: SelectedFile,
}

impl DecodeJob {
    /// Ticket to report the result under.
    pub fn ticket(&self) -> DecodeTicket {
        self.ticket
    }

    /// File being decoded.
    pub fn file(&self) -> &SelectedFile {
        &self.file
    }

    /// Decode the file.
    pub fn run(self) -> DecodeOutcome {
        let SelectedFile { name, mime, bytes } = self.file;
        let result = decode_image(&bytes).map(|image| ImageHandle {
            image,
            file_name: name,
            mime,
        });
        DecodeOutcome {
            ticket: self.ticket,
            result,
        }
    }
}

/// Result of a [`DecodeJob`].
#[derive(Debug)]
pub struct DecodeOutcome {
    /// Ticket of the job that produced this.
    pub ticket: DecodeTicket,
    /// Decoded image or decode error.
    pub result: CoverResult<ImageHandle>,
}

/// Upload state machine states.
#[derive(Clone, Debug, PartialEq)]
pub enum UploadState {
    /// Nothing pending.
    Idle,
    /// A file is being decoded.
    Loading {
        /// In-flight ticket.
        ticket: DecodeTicket,
        /// Name of the file being decoded.
        file_name: String,
    },
    /// A decoded image awaits confirm or cancel.
    PendingPreview {
        /// The unconfirmed image.
        preview: ImageHandle,
    },
}

impl UploadState {
    /// Stable name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            UploadState::Idle => "idle",
            UploadState::Loading { .. } => "loading",
            UploadState::PendingPreview { .. } => "pending_preview",
        }
    }
}

/// What applying a decode completion did.
#[derive(Debug)]
pub enum DecodeApplied {
    /// The image is now the pending preview.
    Preview,
    /// Decoding failed; the pipeline returned to idle.
    Failed(CoverError),
    /// The completion did not belong to the in-flight load and was dropped.
    Stale,
}

/// Turns a selected file into a confirmed background image.
#[derive(Debug)]
pub struct UploadPipeline {
    state: UploadState,
    next_ticket: u64,
}

impl Default for UploadPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadPipeline {
    /// Idle pipeline.
    pub fn new() -> Self {
        Self {
            state: UploadState::Idle,
            next_ticket: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// The picker is disabled while a decode is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self.state, UploadState::Loading { .. })
    }

    /// Unconfirmed image, if one is pending.
    pub fn preview(&self) -> Option<&ImageHandle> {
        match &self.state {
            UploadState::PendingPreview { preview } => Some(preview),
            _ => None,
        }
    }

    /// Start loading `file`.
    ///
    /// Ignored while another decode is in flight. A pending preview is discarded in favor of the
    /// new file.
    pub fn select(&mut self, file: SelectedFile) -> Option<DecodeJob> {
        if let UploadState::Loading { file_name, .. } = &self.state {
            tracing::debug!(
                in_flight = %file_name,
                ignored = %file.name,
                "select ignored while loading"
            );
            return None;
        }

        self.next_ticket += 1;
        let ticket = DecodeTicket(self.next_ticket);
        tracing::debug!(file = %file.name, bytes = file.bytes.len(), ?ticket, "upload loading");
        self.state = UploadState::Loading {
            ticket,
            file_name: file.name.clone(),
        };
        Some(DecodeJob { ticket, file })
    }

    /// Apply a decode result.
    pub fn decode_complete(&mut self, outcome: DecodeOutcome) -> DecodeApplied {
        match &self.state {
            UploadState::Loading { ticket, .. } if *ticket == outcome.ticket => {}
            other => {
                tracing::debug!(
                    ticket = ?outcome.ticket,
                    state = other.name(),
                    "stale decode completion dropped"
                );
                return DecodeApplied::Stale;
            }
        }

        match outcome.result {
            Ok(preview) => {
                tracing::debug!(
                    file = %preview.file_name,
                    width = preview.image.width,
                    height = preview.image.height,
                    "upload preview ready"
                );
                self.state = UploadState::PendingPreview { preview };
                DecodeApplied::Preview
            }
            Err(err) => {
                tracing::debug!(error = %err, "upload decode failed");
                self.state = UploadState::Idle;
                DecodeApplied::Failed(err)
            }
        }
    }

    /// Accept the pending preview. Returns the image to apply as the background.
    pub fn confirm(&mut self) -> Option<ImageHandle> {
        match std::mem::replace(&mut self.state, UploadState::Idle) {
            UploadState::PendingPreview { preview } => {
                tracing::debug!(file = %preview.file_name, "upload confirmed");
                Some(preview)
            }
            other => {
                tracing::debug!(state = other.name(), "confirm ignored");
                self.state = other;
                None
            }
        }
    }

    /// Abandon the pending preview or in-flight load. Returns whether anything was cancelled.
    pub fn cancel(&mut self) -> bool {
        match self.state {
            UploadState::Idle => {
                tracing::debug!("cancel ignored while idle");
                false
            }
            UploadState::Loading { .. } | UploadState::PendingPreview { .. } => {
                tracing::debug!(state = self.state.name(), "upload cancelled");
                self.state = UploadState::Idle;
                true
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/upload.rs"]
mod tests;
