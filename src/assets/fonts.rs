use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::{
    core::Rgba8,
    error::{CoverError, CoverResult},
};

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Horizontal alignment of a laid-out text block inside its frame width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TextAlign {
    /// Flush left.
    Start,
    /// Centered.
    Center,
}

/// Shaping request for one text block.
#[derive(Clone, Copy, Debug)]
pub struct TextRequest<'a> {
    /// UTF-8 text content.
    pub text: &'a str,
    /// Font size in logical pixels.
    pub size_px: f32,
    /// CSS-style font weight (400 regular, 700 bold, 900 black).
    pub weight: f32,
    /// Fill color.
    pub color: Rgba8,
    /// Frame width used for alignment and, when `wrap` is set, line breaking.
    pub width_px: f32,
    /// Alignment inside `width_px`.
    pub align: TextAlign,
    /// Break lines at `width_px` instead of overflowing.
    pub wrap: bool,
}

/// A single loaded font plus the Parley contexts used to shape text with it.
pub struct FontSet {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font_bytes: Arc<Vec<u8>>,
}

impl std::fmt::Debug for FontSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSet")
            .field("family_name", &self.family_name)
            .field("font_bytes_len", &self.font_bytes.len())
            .finish()
    }
}

impl FontSet {
    /// Register font bytes (TTF/OTF/TTC) and resolve their primary family.
    pub fn from_bytes(font_bytes: Vec<u8>) -> CoverResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            CoverError::validation("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CoverError::validation("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font_bytes: Arc::new(font_bytes),
        })
    }

    /// Read and register a font file.
    pub fn from_path(path: &Path) -> CoverResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font '{}'", path.display()))?;
        Self::from_bytes(bytes)
    }

    /// Primary family name detected from font data.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Raw font bytes used for glyph outlines.
    pub fn font_bytes(&self) -> &Arc<Vec<u8>> {
        &self.font_bytes
    }

    /// Shape and lay out one text block.
    pub fn layout(
        &mut self,
        req: &TextRequest<'_>,
    ) -> CoverResult<parley::Layout<TextBrushRgba8>> {
        if !req.size_px.is_finite() || req.size_px <= 0.0 {
            return Err(CoverError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        if !req.width_px.is_finite() || req.width_px <= 0.0 {
            return Err(CoverError::validation(
                "text frame width must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, req.text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(req.size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(req.weight),
        ));
        builder.push_default(parley::style::StyleProperty::Brush(req.color.into()));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(req.text);
        layout.break_all_lines(req.wrap.then_some(req.width_px));

        let alignment = match req.align {
            TextAlign::Start => parley::Alignment::Start,
            TextAlign::Center => parley::Alignment::Center,
        };
        layout.align(
            Some(req.width_px),
            alignment,
            parley::AlignmentOptions::default(),
        );

        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
