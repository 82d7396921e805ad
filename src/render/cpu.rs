use std::{collections::HashMap, sync::Arc};

use kurbo::Shape;

use crate::{
    assets::{
        decode::{PreparedImage, unpremultiply_rgba8_in_place},
        fonts::{FontSet, TextRequest},
    },
    foundation::{
        core::{Affine, Rect, Rgba8, Vec2},
        error::{CoverError, CoverResult},
    },
    render::{
        backend::{RasterImage, RasterTarget, SurfaceRenderer},
        gradient::linear_gradient_premul,
    },
    surface::scene::{CoverScene, DrawOp, Paint, TextStyle},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct GradientKey {
    angle_bits: u64,
    from: Rgba8,
    to: Rgba8,
    w: u32,
    h: u32,
}

struct LoadedFont {
    set: FontSet,
    data: vello_cpu::peniko::FontData,
}

/// CPU rasterizer for [`CoverScene`]s, backed by `vello_cpu`.
///
/// Text needs a font. Without one, text operations are skipped and the rest of the cover is still
/// drawn.
pub struct CpuRenderer {
    font: Option<LoadedFont>,
    ctx: Option<vello_cpu::RenderContext>,
    gradient_cache: HashMap<GradientKey, vello_cpu::Image>,
}

impl std::fmt::Debug for CpuRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuRenderer")
            .field("font", &self.font.as_ref().map(|l| l.set.family_name()))
            .field("cached_gradients", &self.gradient_cache.len())
            .finish()
    }
}

impl Default for CpuRenderer {
    fn default() -> Self {
        Self::new(None)
    }
}

impl CpuRenderer {
    /// Create a renderer, optionally with the font used for every text block.
    pub fn new(font: Option<FontSet>) -> Self {
        let font = font.map(|set| {
            let bytes = set.font_bytes().as_ref().clone();
            let data = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
            LoadedFont { set, data }
        });
        Self {
            font,
            ctx: None,
            gradient_cache: HashMap::new(),
        }
    }

    /// Family name of the configured font, if any.
    pub fn font_family(&self) -> Option<&str> {
        self.font.as_ref().map(|l| l.set.family_name())
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> CoverResult<R>,
    ) -> CoverResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn gradient_paint(
        &mut self,
        angle_deg: f64,
        from: Rgba8,
        to: Rgba8,
        w: u32,
        h: u32,
    ) -> CoverResult<vello_cpu::Image> {
        let key = GradientKey {
            angle_bits: angle_deg.to_bits(),
            from,
            to,
            w,
            h,
        };
        if let Some(img) = self.gradient_cache.get(&key).cloned() {
            return Ok(img);
        }
        let bytes = linear_gradient_premul(angle_deg, from, to, w, h);
        let img = premul_bytes_to_image(&bytes, w, h)?;
        self.gradient_cache.insert(key, img.clone());
        Ok(img)
    }

    fn draw_op(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        root: Affine,
        op: &DrawOp,
        skipped_text: &mut usize,
    ) -> CoverResult<()> {
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match op {
            DrawOp::Fill { rect, radius, paint } => {
                let (w, h) = (rect.width(), rect.height());
                if w <= 0.0 || h <= 0.0 {
                    return Ok(());
                }
                ctx.set_transform(affine_to_cpu(
                    root * Affine::translate(Vec2::new(rect.x0, rect.y0)),
                ));
                match *paint {
                    Paint::Solid(c) => {
                        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
                    }
                    Paint::LinearGradient {
                        angle_deg,
                        from,
                        to,
                    } => {
                        let iw = w.ceil().max(1.0) as u32;
                        let ih = h.ceil().max(1.0) as u32;
                        let img = self.gradient_paint(angle_deg, from, to, iw, ih)?;
                        ctx.set_paint(img);
                    }
                }
                if *radius > 0.0 {
                    let rr = kurbo::RoundedRect::new(0.0, 0.0, w, h, *radius);
                    let mut p = vello_cpu::kurbo::BezPath::new();
                    for el in rr.path_elements(0.1) {
                        p.push(el);
                    }
                    ctx.fill_path(&p);
                } else {
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
                }
                Ok(())
            }
            DrawOp::Image {
                image,
                transform,
                opacity,
                clip,
            } => {
                let opacity = opacity.clamp(0.0, 1.0);
                if opacity <= 0.0 || transform.determinant().abs() < 1e-12 {
                    return Ok(());
                }
                let Some(visible) = visible_image_rect(image, *transform, *clip) else {
                    return Ok(());
                };

                let paint = premul_bytes_to_image(&image.rgba8_premul, image.width, image.height)?;
                ctx.set_transform(affine_to_cpu(root * *transform));
                ctx.set_paint(paint);
                if opacity < 1.0 {
                    ctx.push_opacity_layer(opacity);
                }
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    visible.x0, visible.y0, visible.x1, visible.y1,
                ));
                if opacity < 1.0 {
                    ctx.pop_layer();
                }
                Ok(())
            }
            DrawOp::Text { text, frame, style } => {
                if text.is_empty() {
                    return Ok(());
                }
                let Some(font) = self.font.as_mut() else {
                    *skipped_text += 1;
                    return Ok(());
                };
                draw_text(ctx, font, root, text, *frame, style)
            }
        }
    }
}

impl SurfaceRenderer for CpuRenderer {
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(ops = scene.ops.len(), pixel_ratio = target.pixel_ratio)
    )]
    fn render(&mut self, scene: &CoverScene, target: RasterTarget) -> CoverResult<RasterImage> {
        let size = target.output_size();
        let width: u16 = size
            .width
            .try_into()
            .map_err(|_| CoverError::capture("output width exceeds u16"))?;
        let height: u16 = size
            .height
            .try_into()
            .map_err(|_| CoverError::capture("output height exceeds u16"))?;

        // Map logical coordinates onto the output raster exactly, absorbing rounding.
        let root = Affine::scale_non_uniform(
            f64::from(size.width) / f64::from(scene.canvas.width.max(1)),
            f64::from(size.height) / f64::from(scene.canvas.height.max(1)),
        );

        let mut skipped_text = 0usize;
        let mut data = self.with_ctx_mut(width, height, |this, ctx| {
            for op in &scene.ops {
                this.draw_op(ctx, root, op, &mut skipped_text)?;
            }
            ctx.flush();
            let mut pixmap = vello_cpu::Pixmap::new(width, height);
            ctx.render_to_pixmap(&mut pixmap);
            Ok(pixmap.data_as_u8_slice().to_vec())
        })?;

        if skipped_text > 0 {
            tracing::warn!(
                skipped = skipped_text,
                "no font configured; text blocks were not drawn"
            );
        }

        unpremultiply_rgba8_in_place(&mut data);
        RasterImage::new(size.width, size.height, data)
    }
}

fn draw_text(
    ctx: &mut vello_cpu::RenderContext,
    font: &mut LoadedFont,
    root: Affine,
    text: &str,
    frame: Rect,
    style: &TextStyle,
) -> CoverResult<()> {
    let layout = font
        .set
        .layout(&TextRequest {
            text,
            size_px: style.size_px,
            weight: style.weight,
            color: style.color,
            width_px: frame.width() as f32,
            align: style.align,
            wrap: style.wrap,
        })
        .map_err(|e| CoverError::capture(format!("text layout failed: {e}")))?;

    ctx.set_transform(affine_to_cpu(
        root * Affine::translate(Vec2::new(frame.x0, frame.y0)),
    ));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            // Absolute pen position and baseline, after alignment.
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&font.data)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    Ok(())
}

/// Part of the image, in image pixel space, that lands inside `clip`.
///
/// Image transforms are translate plus uniform scale, so the clipped region stays an axis-aligned
/// rectangle in image space.
fn visible_image_rect(image: &PreparedImage, transform: Affine, clip: Rect) -> Option<Rect> {
    let bounds = Rect::new(0.0, 0.0, f64::from(image.width), f64::from(image.height));
    let clip_in_image = transform.inverse().transform_rect_bbox(clip);
    let visible = bounds.intersect(clip_in_image);
    (visible.width() > 0.0 && visible.height() > 0.0).then_some(visible)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn premul_bytes_to_image(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> CoverResult<vello_cpu::Image> {
    let w: u16 = width
        .try_into()
        .map_err(|_| CoverError::capture("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| CoverError::capture("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(CoverError::capture("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, may_have_opacities);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
