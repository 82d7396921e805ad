use crate::{
    assets::decode::ImageHandle,
    editor::transform::ImageTransform,
    foundation::core::Canvas,
    surface::scene::{CoverScene, DrawOp},
    template::{
        fields::TextFields,
        layout::{Block, TemplateLayout, TextSlot, TextSource},
    },
};

/// Build the cover scene for the current editor state.
///
/// Painter's order: background gradient, background image, chrome, chrome text, field text, then
/// panels (block under its text). Pure: the same inputs give the same scene.
#[tracing::instrument(level = "debug", skip_all, fields(template = %fields.kind()))]
pub fn compose_scene(
    layout: &TemplateLayout,
    fields: &TextFields,
    background: Option<&ImageHandle>,
    transform: &ImageTransform,
    canvas: Canvas,
) -> CoverScene {
    let mut ops = Vec::with_capacity(
        2 + layout.chrome.len()
            + layout.chrome_text.len()
            + layout.fields.len()
            + layout.panels.len() * 2,
    );

    ops.push(DrawOp::Fill {
        rect: canvas.rect(),
        radius: 0.0,
        paint: layout.background,
    });

    if let Some(bg) = background {
        let (w, h) = bg.size();
        ops.push(DrawOp::Image {
            image: bg.image.clone(),
            transform: transform.image_to_canvas(w, h, canvas),
            opacity: transform.opacity_f32(),
            clip: canvas.rect(),
        });
    }

    ops.extend(layout.chrome.iter().map(block_op));
    ops.extend(layout.chrome_text.iter().map(|s| text_op(s, fields)));
    ops.extend(layout.fields.iter().map(|s| text_op(s, fields)));
    for panel in &layout.panels {
        ops.push(block_op(&panel.block));
        ops.push(text_op(&panel.text, fields));
    }

    tracing::debug!(ops = ops.len(), has_image = background.is_some(), "scene composed");
    CoverScene { canvas, ops }
}

fn block_op(b: &Block) -> DrawOp {
    DrawOp::Fill {
        rect: b.rect,
        radius: b.radius,
        paint: b.paint,
    }
}

fn text_op(slot: &TextSlot, fields: &TextFields) -> DrawOp {
    let body = match slot.source {
        TextSource::Field(key) => fields.text(key),
        TextSource::Static(s) => s,
    };
    DrawOp::Text {
        text: format!("{}{}", slot.prefix, body),
        frame: slot.frame,
        style: slot.style,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/compose.rs"]
mod tests;
