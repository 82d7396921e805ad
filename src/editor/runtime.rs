use crate::{
    editor::{
        context::{EditorAction, EditorContext, EditorEffect},
        selector::TemplateSelector,
    },
    export::sink::DownloadSink,
    foundation::error::CoverResult,
    render::backend::{RasterImage, SurfaceRenderer},
    template::kind::TemplateKind,
};

/// Synchronous host loop: dispatches an action, runs the effect it asks for, feeds the
/// completion back in, and repeats until the editor settles.
#[derive(Debug)]
pub struct EditorRuntime<R, S> {
    selector: TemplateSelector,
    renderer: R,
    sink: S,
}

impl<R: SurfaceRenderer, S: DownloadSink> EditorRuntime<R, S> {
    /// Mount `kind` and host it with `renderer` for captures and `sink` for downloads.
    pub fn new(kind: TemplateKind, renderer: R, sink: S) -> Self {
        Self {
            selector: TemplateSelector::with_template(kind),
            renderer,
            sink,
        }
    }

    /// Template router.
    pub fn selector(&self) -> &TemplateSelector {
        &self.selector
    }

    /// Mounted editor.
    pub fn editor(&self) -> &EditorContext {
        self.selector.current()
    }

    /// Download sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Renderer used for captures and display renders.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Give back the renderer and sink.
    pub fn into_parts(self) -> (R, S) {
        (self.renderer, self.sink)
    }

    /// Navigate to `route`; see [`TemplateSelector::navigate`].
    pub fn navigate(&mut self, route: &str) -> CoverResult<bool> {
        self.selector.navigate(route)
    }

    /// Dispatch `action` and run every effect it leads to. Returns the number of effects run.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn dispatch(&mut self, action: EditorAction) -> usize {
        let mut next = self.selector.current_mut().dispatch(action);
        let mut effects = 0usize;
        while let Some(effect) = next.take() {
            effects += 1;
            let completion = match effect {
                EditorEffect::Decode(job) => EditorAction::DecodeComplete(job.run()),
                EditorEffect::Capture(job) => {
                    EditorAction::CaptureComplete(job.run(&mut self.renderer))
                }
                EditorEffect::Save(job) => EditorAction::SaveComplete(job.run(&mut self.sink)),
            };
            next = self.selector.current_mut().dispatch(completion);
        }
        effects
    }

    /// Render the on-screen view of the current cover at the display scale.
    pub fn render_display(&mut self) -> CoverResult<RasterImage> {
        let editor = self.selector.current();
        let target = editor.config().surface.display_target();
        self.renderer.render(&editor.scene(), target)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/runtime.rs"]
mod tests;
