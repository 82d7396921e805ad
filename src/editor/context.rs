use crate::{
    assets::decode::ImageHandle,
    editor::{
        export::{
            CaptureApplied, CaptureJob, CaptureOutcome, ExportPipeline, ExportState, SaveApplied,
            SaveJob, SaveOutcome,
        },
        notice::{Notice, NoticeSource, Notices},
        transform::ImageTransform,
        upload::{DecodeApplied, DecodeJob, DecodeOutcome, SelectedFile, UploadPipeline, UploadState},
    },
    foundation::error::CoverResult,
    surface::{compose::compose_scene, scene::CoverScene},
    template::{
        config::TemplateConfig,
        fields::{FieldKey, TextFields},
        kind::TemplateKind,
    },
};

/// Every input the editor reacts to, from the user or from a finished effect.
#[derive(Debug)]
pub enum EditorAction {
    /// Replace a text field's value.
    SetText {
        /// Field to edit.
        key: FieldKey,
        /// New value, stored verbatim.
        value: String,
    },
    /// Set background opacity.
    SetOpacity(f64),
    /// Set the horizontal offset.
    SetPositionX(i32),
    /// Set the vertical offset.
    SetPositionY(i32),
    /// Set the background scale.
    SetScale(f64),
    /// A file was picked.
    SelectFile(SelectedFile),
    /// A decode effect finished.
    DecodeComplete(DecodeOutcome),
    /// Accept the upload preview as the background.
    ConfirmPreview,
    /// Reject the upload preview.
    CancelPreview,
    /// Capture the cover for export.
    Generate,
    /// A capture effect finished.
    CaptureComplete(CaptureOutcome),
    /// Close the export preview without saving.
    CancelExport,
    /// Save the export preview.
    Download,
    /// A save effect finished.
    SaveComplete(SaveOutcome),
    /// Dismiss the notice shown next to a control.
    DismissNotice(NoticeSource),
}

/// Work the host runs, then reports back as an [`EditorAction`].
#[derive(Debug)]
pub enum EditorEffect {
    /// Decode an uploaded file; report with [`EditorAction::DecodeComplete`].
    Decode(DecodeJob),
    /// Rasterize the cover; report with [`EditorAction::CaptureComplete`].
    Capture(CaptureJob),
    /// Save the encoded cover; report with [`EditorAction::SaveComplete`].
    Save(SaveJob),
}

/// Read-only snapshot of what a UI draws.
#[derive(Clone, Debug)]
pub struct EditorView<'a> {
    /// Active template.
    pub template: TemplateKind,
    /// Text fields in schema order.
    pub fields: &'a TextFields,
    /// Background image transform.
    pub transform: ImageTransform,
    /// Confirmed background image.
    pub background: Option<&'a ImageHandle>,
    /// Upload pipeline state.
    pub upload: &'a UploadState,
    /// Export pipeline state.
    pub export: &'a ExportState,
    /// The image sliders are only offered once a background is confirmed.
    pub image_controls_visible: bool,
    /// The file picker is disabled while a decode runs.
    pub upload_busy: bool,
    /// The generate button is disabled unless the export pipeline is idle.
    pub generate_enabled: bool,
    /// Active notices.
    pub notices: Vec<&'a Notice>,
}

/// All editor state for one mounted template.
///
/// Created on mount and dropped on unmount; nothing survives a template switch.
#[derive(Debug)]
pub struct EditorContext {
    config: TemplateConfig,
    fields: TextFields,
    transform: ImageTransform,
    background: Option<ImageHandle>,
    upload: UploadPipeline,
    export: ExportPipeline,
    notices: Notices,
}

impl EditorContext {
    /// Fresh editor for `kind` with default fields and no background.
    pub fn new(kind: TemplateKind) -> Self {
        Self::with_config(TemplateConfig::for_kind(kind))
    }

    /// Fresh editor for a custom template configuration.
    pub fn with_config(config: TemplateConfig) -> Self {
        tracing::debug!(template = %config.kind, "editor mounted");
        Self {
            fields: TextFields::defaults(config.kind),
            config,
            transform: ImageTransform::default(),
            background: None,
            upload: UploadPipeline::new(),
            export: ExportPipeline::new(),
            notices: Notices::default(),
        }
    }

    /// Template this editor belongs to.
    pub fn kind(&self) -> TemplateKind {
        self.config.kind
    }

    /// Template configuration.
    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }

    /// Current text fields.
    pub fn fields(&self) -> &TextFields {
        &self.fields
    }

    /// Current image transform.
    pub fn transform(&self) -> &ImageTransform {
        &self.transform
    }

    /// Confirmed background image.
    pub fn background(&self) -> Option<&ImageHandle> {
        self.background.as_ref()
    }

    /// Upload pipeline.
    pub fn upload(&self) -> &UploadPipeline {
        &self.upload
    }

    /// Export pipeline.
    pub fn export(&self) -> &ExportPipeline {
        &self.export
    }

    /// Active notices.
    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    /// Set a text field, rejecting keys outside this template's schema.
    pub fn set_text(&mut self, key: FieldKey, value: impl Into<String>) -> CoverResult<()> {
        self.fields.set(key, value)
    }

    /// Compose the cover for the current state.
    pub fn scene(&self) -> CoverScene {
        compose_scene(
            &self.config.layout,
            &self.fields,
            self.background.as_ref(),
            &self.transform,
            self.config.surface.logical,
        )
    }

    /// Snapshot for drawing.
    pub fn view(&self) -> EditorView<'_> {
        EditorView {
            template: self.config.kind,
            fields: &self.fields,
            transform: self.transform,
            background: self.background.as_ref(),
            upload: self.upload.state(),
            export: self.export.state(),
            image_controls_visible: self.background.is_some(),
            upload_busy: self.upload.is_busy(),
            generate_enabled: matches!(self.export.state(), ExportState::Idle),
            notices: self.notices.iter().collect(),
        }
    }

    /// Apply one action. Returns the effect the host must run next, if any.
    ///
    /// Failures end up as notices; nothing here returns an error.
    pub fn dispatch(&mut self, action: EditorAction) -> Option<EditorEffect> {
        match action {
            EditorAction::SetText { key, value } => {
                if let Err(err) = self.fields.set(key, value) {
                    tracing::warn!(template = %self.config.kind, %key, error = %err, "text edit ignored");
                }
                None
            }
            EditorAction::SetOpacity(v) => {
                self.transform.set_opacity(v);
                None
            }
            EditorAction::SetPositionX(v) => {
                self.transform.set_x(v);
                None
            }
            EditorAction::SetPositionY(v) => {
                self.transform.set_y(v);
                None
            }
            EditorAction::SetScale(v) => {
                self.transform.set_scale(v);
                None
            }
            EditorAction::SelectFile(file) => self.upload.select(file).map(EditorEffect::Decode),
            EditorAction::DecodeComplete(outcome) => {
                match self.upload.decode_complete(outcome) {
                    DecodeApplied::Preview => {
                        self.transform.reset();
                        self.notices.clear(NoticeSource::Upload);
                    }
                    DecodeApplied::Failed(err) => {
                        self.notices
                            .error(NoticeSource::Upload, format!("Could not load image: {err}"));
                    }
                    DecodeApplied::Stale => {}
                }
                None
            }
            EditorAction::ConfirmPreview => {
                if let Some(image) = self.upload.confirm() {
                    self.background = Some(image);
                    self.notices.clear(NoticeSource::Upload);
                }
                None
            }
            EditorAction::CancelPreview => {
                self.upload.cancel();
                None
            }
            EditorAction::Generate => {
                let scene = self.scene();
                let target = self.config.surface.capture_target();
                self.export.generate(scene, target).map(EditorEffect::Capture)
            }
            EditorAction::CaptureComplete(outcome) => {
                match self.export.capture_complete(outcome) {
                    CaptureApplied::Ready => self.notices.clear(NoticeSource::Export),
                    CaptureApplied::Failed(err) => self
                        .notices
                        .error(NoticeSource::Export, format!("Error generating image: {err}")),
                    CaptureApplied::Stale => {}
                }
                None
            }
            EditorAction::CancelExport => {
                self.export.cancel_preview();
                None
            }
            EditorAction::Download => match self.export.download(&self.config.export_filename) {
                Ok(job) => job.map(EditorEffect::Save),
                Err(err) => {
                    self.notices
                        .error(NoticeSource::Export, format!("Download failed: {err}"));
                    None
                }
            },
            EditorAction::SaveComplete(outcome) => {
                match self.export.save_complete(outcome) {
                    SaveApplied::Saved { filename } => {
                        self.notices
                            .info(NoticeSource::Export, format!("Saved {filename}"));
                    }
                    SaveApplied::Failed(err) => {
                        self.notices
                            .error(NoticeSource::Export, format!("Download failed: {err}"));
                    }
                    SaveApplied::Stale => {}
                }
                None
            }
            EditorAction::DismissNotice(source) => {
                self.notices.clear(source);
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/context.rs"]
mod tests;
