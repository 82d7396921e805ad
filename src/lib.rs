//! coverkit composes e-reader book covers from fixed templates and exports them as
//! high-resolution PNGs.
//!
//! Two templates are built in: the study-guide cover (route `/`) and the TEAS exam-prep cover
//! (route `/teas`). Each has a fixed set of text fields, a background photo slot with opacity,
//! offset and scale controls, and a fixed layout on a 1600×2560 logical canvas.
//!
//! # Pipeline overview
//!
//! 1. **Edit**: [`EditorAction`]s are dispatched into an [`EditorContext`], which updates its
//!    stores synchronously and may hand back an [`EditorEffect`] for the host to run.
//! 2. **Upload**: a picked file is decoded off the editor ([`DecodeJob`]), previewed, and confirmed
//!    or cancelled.
//! 3. **Compose**: the current state becomes a [`CoverScene`], an ordered list of draw operations.
//! 4. **Capture**: a [`SurfaceRenderer`] (normally [`CpuRenderer`]) rasterizes the scene at twice
//!    the logical size, 3200×5120.
//! 5. **Download**: the capture is PNG-encoded and handed to a [`DownloadSink`].
//!
//! [`EditorRuntime`] wires these together for hosts that run effects inline, and
//! [`TemplateSelector`] switches between templates, dropping all state on each switch.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: composition is pure and rendering the same scene twice gives the same
//!   pixels.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod editor;
mod export;
mod foundation;
mod render;
mod surface;
mod template;

pub use assets::decode::{ACCEPTED_MIME_TYPES, ImageHandle, PreparedImage, decode_image};
pub use assets::fonts::{FontSet, TextAlign, TextBrushRgba8, TextRequest};
pub use config::CoverConfig;
pub use editor::context::{EditorAction, EditorContext, EditorEffect, EditorView};
pub use editor::export::{
    CaptureApplied, CaptureJob, CaptureOutcome, CaptureTicket, ExportArtifact, ExportPipeline,
    ExportState, SaveApplied, SaveJob, SaveOutcome,
};
pub use editor::notice::{Notice, NoticeLevel, NoticeSource, Notices};
pub use editor::runtime::EditorRuntime;
pub use editor::selector::{NavLink, TemplateSelector};
pub use editor::transform::{ControlRange, ImageControl, ImageTransform, Position, readout};
pub use editor::upload::{
    DecodeApplied, DecodeJob, DecodeOutcome, DecodeTicket, SelectedFile, UploadPipeline,
    UploadState,
};
pub use export::png::encode_png;
pub use export::sink::{DirectorySink, DownloadSink, InMemoryDownloads};
pub use foundation::core::{Affine, Canvas, Point, Rect, Rgba8, Vec2};
pub use foundation::error::{CoverError, CoverResult};
pub use render::backend::{RasterImage, RasterTarget, SurfaceRenderer};
pub use render::cpu::CpuRenderer;
pub use surface::compose::compose_scene;
pub use surface::scene::{CoverScene, DrawOp, Paint, TextStyle};
pub use template::config::{
    CAPTURE_PIXEL_RATIO, DEFAULT_EXPORT_FILENAME, DISPLAY_SCALE, LOGICAL_HEIGHT, LOGICAL_WIDTH,
    SurfaceConfig, TemplateConfig,
};
pub use template::fields::{FieldKey, FieldSpec, TextFields, schema};
pub use template::kind::TemplateKind;
pub use template::layout::{Block, Panel, TemplateLayout, TextSlot, TextSource};
