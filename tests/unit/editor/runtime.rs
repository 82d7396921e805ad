use std::io::Cursor;

use super::*;
use crate::{
    editor::{export::ExportState, notice::NoticeSource, upload::SelectedFile},
    export::sink::InMemoryDownloads,
    foundation::error::CoverError,
    render::backend::RasterTarget,
    surface::scene::CoverScene,
};

#[derive(Default)]
struct RecordingRenderer {
    targets: Vec<RasterTarget>,
}

impl SurfaceRenderer for RecordingRenderer {
    fn render(&mut self, _scene: &CoverScene, target: RasterTarget) -> CoverResult<RasterImage> {
        self.targets.push(target);
        RasterImage::new(1, 1, vec![0, 0, 0, 255])
    }
}

fn png(w: u32, h: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(image::RgbaImage::new(w, h))
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn runtime() -> EditorRuntime<RecordingRenderer, InMemoryDownloads> {
    EditorRuntime::new(
        TemplateKind::Study,
        RecordingRenderer::default(),
        InMemoryDownloads::new(),
    )
}

#[test]
fn select_runs_decode_to_preview() {
    let mut rt = runtime();
    let n = rt.dispatch(EditorAction::SelectFile(SelectedFile::new(
        "bg.png",
        Some("image/png"),
        png(3, 5),
    )));
    assert_eq!(n, 1);
    assert_eq!(rt.editor().upload().preview().unwrap().size(), (3, 5));
}

#[test]
fn generate_then_download_reaches_the_sink() {
    let mut rt = runtime();
    assert_eq!(rt.dispatch(EditorAction::Generate), 1);
    assert!(matches!(
        rt.editor().export().state(),
        ExportState::PreviewReady { .. }
    ));
    assert_eq!(rt.dispatch(EditorAction::Download), 1);
    assert_eq!(rt.editor().export().state(), &ExportState::Idle);

    let (renderer, sink) = rt.into_parts();
    assert_eq!(renderer.targets[0].output_size().width, 3200);
    assert!(sink.get("ATI-TEAS-Study-Guide-Cover.png").is_some());
}

#[test]
fn plain_actions_run_no_effects() {
    let mut rt = runtime();
    assert_eq!(rt.dispatch(EditorAction::SetScale(0.5)), 0);
    assert_eq!(rt.dispatch(EditorAction::ConfirmPreview), 0);
    assert_eq!(rt.dispatch(EditorAction::Download), 0);
    assert!(rt.editor().notices().get(NoticeSource::Export).is_none());
}

#[test]
fn display_render_uses_display_scale() {
    let mut rt = runtime();
    rt.render_display().unwrap();
    let size = rt.renderer_mut().targets[0].output_size();
    assert_eq!((size.width, size.height), (600, 960));
}

#[test]
fn navigation_goes_through_the_selector() {
    let mut rt = runtime();
    assert!(rt.navigate("/teas").unwrap());
    assert_eq!(rt.selector().route(), "/teas");
    assert!(matches!(rt.navigate("/nope"), Err(CoverError::Validation(_))));
    assert_eq!(rt.editor().kind(), TemplateKind::Teas);
}
