use crate::{
    export::{png::encode_png, sink::DownloadSink},
    foundation::error::{CoverError, CoverResult},
    render::backend::{RasterImage, RasterTarget, SurfaceRenderer},
    surface::scene::CoverScene,
};

/// Captured cover awaiting download.
pub type ExportArtifact = RasterImage;

/// Identifies one capture and the artifact it produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CaptureTicket(pub(crate) u64);

/// Rasterization work for the host to run.
///
/// The scene is a snapshot taken when the job was created, so the capture always reflects the
/// state the user saw when they asked for it.
#[derive(Debug)]
pub struct CaptureJob {
    ticket: CaptureTicket,
    scene: CoverScene,
    target: RasterTarget,
}

impl CaptureJob {
    /// Ticket to report the result under.
    pub fn ticket(&self) -> CaptureTicket {
        self.ticket
    }

    /// Scene snapshot.
    pub fn scene(&self) -> &CoverScene {
        &self.scene
    }

    /// Output resolution.
    pub fn target(&self) -> RasterTarget {
        self.target
    }

    /// Rasterize the snapshot.
    pub fn run(self, renderer: &mut dyn SurfaceRenderer) -> CaptureOutcome {
        let result = renderer.render(&self.scene, self.target);
        CaptureOutcome {
            ticket: self.ticket,
            result,
        }
    }
}

/// Result of a [`CaptureJob`].
#[derive(Debug)]
pub struct CaptureOutcome {
    /// Ticket of the job that produced this.
    pub ticket: CaptureTicket,
    /// Captured raster or capture error.
    pub result: CoverResult<RasterImage>,
}

/// An encoded artifact waiting to be handed to the host's save action.
#[derive(Debug)]
pub struct SaveJob {
    ticket: CaptureTicket,
    filename: String,
    png: Vec<u8>,
}

impl SaveJob {
    /// File name the download is offered under.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Encoded PNG bytes.
    pub fn png(&self) -> &[u8] {
        &self.png
    }

    /// Hand the file to `sink`.
    pub fn run(self, sink: &mut dyn DownloadSink) -> SaveOutcome {
        let result = sink.save(&self.filename, &self.png);
        SaveOutcome {
            ticket: self.ticket,
            filename: self.filename,
            result,
        }
    }
}

/// Result of a [`SaveJob`].
#[derive(Debug)]
pub struct SaveOutcome {
    /// Ticket of the artifact that was saved.
    pub ticket: CaptureTicket,
    /// File name it was saved under.
    pub filename: String,
    /// Whether the save went through.
    pub result: CoverResult<()>,
}

/// Export state machine states.
#[derive(Clone, Debug, PartialEq)]
pub enum ExportState {
    /// Nothing captured.
    Idle,
    /// A capture is running.
    Generating {
        /// In-flight ticket.
        ticket: CaptureTicket,
    },
    /// A captured artifact is shown for download or cancel.
    PreviewReady {
        /// Ticket the artifact was captured under.
        ticket: CaptureTicket,
        /// Captured raster.
        artifact: ExportArtifact,
    },
}

impl ExportState {
    /// Stable name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            ExportState::Idle => "idle",
            ExportState::Generating { .. } => "generating",
            ExportState::PreviewReady { .. } => "preview_ready",
        }
    }
}

/// What applying a capture completion did.
#[derive(Debug)]
pub enum CaptureApplied {
    /// The artifact is ready for download.
    Ready,
    /// Capture failed; the pipeline returned to idle.
    Failed(CoverError),
    /// The completion did not belong to the in-flight capture and was dropped.
    Stale,
}

/// What applying a save completion did.
#[derive(Debug)]
pub enum SaveApplied {
    /// Saved; the artifact was released.
    Saved {
        /// File name it was saved under.
        filename: String,
    },
    /// The save failed; the artifact is still available.
    Failed(CoverError),
    /// The completion did not match the current artifact and was dropped.
    Stale,
}

/// Captures the composition surface and hands the result to the host as a PNG download.
#[derive(Debug)]
pub struct ExportPipeline {
    state: ExportState,
    next_ticket: u64,
    saving: bool,
}

impl Default for ExportPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportPipeline {
    /// Idle pipeline.
    pub fn new() -> Self {
        Self {
            state: ExportState::Idle,
            next_ticket: 0,
            saving: false,
        }
    }

    /// Current state.
    pub fn state(&self) -> &ExportState {
        &self.state
    }

    /// Captured artifact, if one is shown.
    pub fn artifact(&self) -> Option<&ExportArtifact> {
        match &self.state {
            ExportState::PreviewReady { artifact, .. } => Some(artifact),
            _ => None,
        }
    }

    /// A save has been handed to the host and not yet reported back.
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Start a capture of `scene` at `target`. Ignored unless idle.
    pub fn generate(&mut self, scene: CoverScene, target: RasterTarget) -> Option<CaptureJob> {
        if !matches!(self.state, ExportState::Idle) {
            tracing::debug!(state = self.state.name(), "generate ignored");
            return None;
        }
        self.next_ticket += 1;
        let ticket = CaptureTicket(self.next_ticket);
        let size = target.output_size();
        tracing::debug!(?ticket, width = size.width, height = size.height, "export generating");
        self.state = ExportState::Generating { ticket };
        Some(CaptureJob {
            ticket,
            scene,
            target,
        })
    }

    /// Apply a capture result.
    pub fn capture_complete(&mut self, outcome: CaptureOutcome) -> CaptureApplied {
        match &self.state {
            ExportState::Generating { ticket } if *ticket == outcome.ticket => {}
            other => {
                tracing::debug!(
                    ticket = ?outcome.ticket,
                    state = other.name(),
                    "stale capture completion dropped"
                );
                return CaptureApplied::Stale;
            }
        }

        match outcome.result {
            Ok(artifact) => {
                tracing::debug!(
                    width = artifact.width,
                    height = artifact.height,
                    "export preview ready"
                );
                self.state = ExportState::PreviewReady {
                    ticket: outcome.ticket,
                    artifact,
                };
                CaptureApplied::Ready
            }
            Err(err) => {
                tracing::error!(error = %err, "cover capture failed");
                self.state = ExportState::Idle;
                CaptureApplied::Failed(err)
            }
        }
    }

    /// Discard the shown artifact. Returns whether anything was discarded.
    pub fn cancel_preview(&mut self) -> bool {
        match self.state {
            ExportState::PreviewReady { .. } => {
                tracing::debug!("export preview cancelled");
                self.state = ExportState::Idle;
                self.saving = false;
                true
            }
            _ => {
                tracing::debug!(state = self.state.name(), "cancel_preview ignored");
                false
            }
        }
    }

    /// Encode the shown artifact for saving as `filename`.
    ///
    /// Returns `Ok(None)` when there is no artifact or a save is already in flight.
    pub fn download(&mut self, filename: &str) -> CoverResult<Option<SaveJob>> {
        let ExportState::PreviewReady { ticket, artifact } = &self.state else {
            tracing::debug!(state = self.state.name(), "download ignored");
            return Ok(None);
        };
        if self.saving {
            tracing::debug!("download ignored while a save is in flight");
            return Ok(None);
        }

        let png = encode_png(artifact)?;
        tracing::debug!(filename, bytes = png.len(), "export download requested");
        self.saving = true;
        Ok(Some(SaveJob {
            ticket: *ticket,
            filename: filename.to_string(),
            png,
        }))
    }

    /// Apply the host's save result.
    pub fn save_complete(&mut self, outcome: SaveOutcome) -> SaveApplied {
        match &self.state {
            ExportState::PreviewReady { ticket, .. } if *ticket == outcome.ticket => {}
            other => {
                tracing::debug!(
                    ticket = ?outcome.ticket,
                    state = other.name(),
                    "stale save completion dropped"
                );
                return SaveApplied::Stale;
            }
        }
        self.saving = false;

        match outcome.result {
            Ok(()) => {
                tracing::debug!(filename = %outcome.filename, "export saved");
                self.state = ExportState::Idle;
                SaveApplied::Saved {
                    filename: outcome.filename,
                }
            }
            Err(err) => {
                tracing::debug!(error = %err, "export save failed; artifact kept");
                SaveApplied::Failed(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/export.rs"]
mod tests;
