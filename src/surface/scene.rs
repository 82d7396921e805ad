use crate::{
    assets::{decode::PreparedImage, fonts::TextAlign},
    foundation::core::{Affine, Canvas, Rect, Rgba8},
};

/// Fill paint for rectangles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    /// Single color.
    Solid(Rgba8),
    /// Two-stop linear gradient. `angle_deg` follows CSS: 0 points up, 90 right, 135 bottom-right.
    LinearGradient {
        /// Gradient direction in degrees.
        angle_deg: f64,
        /// Color at the start of the gradient line.
        from: Rgba8,
        /// Color at the end of the gradient line.
        to: Rgba8,
    },
}

/// Static text style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in logical pixels.
    pub size_px: f32,
    /// CSS-style weight.
    pub weight: f32,
    /// Fill color.
    pub color: Rgba8,
    /// Horizontal alignment within the frame.
    pub align: TextAlign,
    /// Wrap at the frame width.
    pub wrap: bool,
}

/// Draw operation on the composition surface, in logical coordinates.
#[derive(Clone, Debug)]
pub enum DrawOp {
    /// Fill a (possibly rounded) rectangle.
    Fill {
        /// Rectangle to fill.
        rect: Rect,
        /// Corner radius; 0 for square corners.
        radius: f64,
        /// Paint to fill with.
        paint: Paint,
    },
    /// Draw a raster image with a transform and opacity, clipped to `clip`.
    Image {
        /// Decoded pixels.
        image: PreparedImage,
        /// Maps image pixel space into logical space.
        transform: Affine,
        /// Alpha multiplier in `[0, 1]`.
        opacity: f32,
        /// Clip rectangle in logical space.
        clip: Rect,
    },
    /// Draw a text block whose top-left is the frame origin.
    Text {
        /// UTF-8 text.
        text: String,
        /// Layout frame; width drives alignment and wrapping.
        frame: Rect,
        /// Style.
        style: TextStyle,
    },
}

impl DrawOp {
    /// Short tag used in logs and tests.
    pub fn kind(&self) -> &'static str {
        match self {
            DrawOp::Fill { .. } => "fill",
            DrawOp::Image { .. } => "image",
            DrawOp::Text { .. } => "text",
        }
    }
}

/// The composed cover: a logical canvas and its draw operations in painter's order.
#[derive(Clone, Debug)]
pub struct CoverScene {
    /// Logical canvas.
    pub canvas: Canvas,
    /// Operations, bottom to top.
    pub ops: Vec<DrawOp>,
}

impl CoverScene {
    /// Text strings in painter's order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// The background image operation, if the scene has one.
    pub fn image_op(&self) -> Option<&DrawOp> {
        self.ops.iter().find(|op| matches!(op, DrawOp::Image { .. }))
    }
}
