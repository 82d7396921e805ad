use crate::foundation::core::{Affine, Canvas, Vec2};

/// Background image offset in logical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Position {
    /// Horizontal offset.
    pub x: i32,
    /// Vertical offset.
    pub y: i32,
}

/// Opacity, offset and scale applied to the background image.
///
/// The store assigns whatever it is given; range limits belong to the controls
/// (see [`ControlRange`]).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageTransform {
    /// Alpha multiplier, nominally `[0, 1]`.
    pub opacity: f64,
    /// Offset from the centered position.
    pub position: Position,
    /// Uniform scale about the image center, nominally `[0.1, 2.0]`.
    pub scale: f64,
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            position: Position::default(),
            scale: 1.0,
        }
    }
}

impl ImageTransform {
    /// Set opacity.
    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }

    /// Set the horizontal offset.
    pub fn set_x(&mut self, x: i32) {
        self.position.x = x;
    }

    /// Set the vertical offset.
    pub fn set_y(&mut self, y: i32) {
        self.position.y = y;
    }

    /// Set scale.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    /// Restore `{opacity: 1, position: (0, 0), scale: 1}`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Opacity as the renderer consumes it.
    pub fn opacity_f32(&self) -> f32 {
        if self.opacity.is_finite() {
            self.opacity.clamp(0.0, 1.0) as f32
        } else {
            1.0
        }
    }

    /// Map image pixel space into logical canvas space.
    ///
    /// The image is fitted inside the canvas without upscaling and centered, then translated by
    /// `position` and scaled by `scale` about its own center.
    pub fn image_to_canvas(&self, image_w: u32, image_h: u32, canvas: Canvas) -> Affine {
        let (iw, ih) = (f64::from(image_w.max(1)), f64::from(image_h.max(1)));
        let (cw, ch) = (f64::from(canvas.width), f64::from(canvas.height));
        let fit = (cw / iw).min(ch / ih).min(1.0);

        let center = Vec2::new(cw / 2.0, ch / 2.0)
            + Vec2::new(f64::from(self.position.x), f64::from(self.position.y));

        Affine::translate(center)
            * Affine::scale(self.scale)
            * Affine::scale(fit)
            * Affine::translate(Vec2::new(-iw / 2.0, -ih / 2.0))
    }
}

/// Which slider a value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageControl {
    /// Opacity slider.
    Opacity,
    /// Horizontal position slider.
    PositionX,
    /// Vertical position slider.
    PositionY,
    /// Scale slider.
    Scale,
}

/// Slider bounds and step for one image control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlRange {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
    /// Step size.
    pub step: f64,
}

impl ControlRange {
    /// Bounds for `control`.
    pub fn for_control(control: ImageControl) -> Self {
        match control {
            ImageControl::Opacity => Self {
                min: 0.0,
                max: 1.0,
                step: 0.01,
            },
            ImageControl::PositionX | ImageControl::PositionY => Self {
                min: -200.0,
                max: 200.0,
                step: 1.0,
            },
            ImageControl::Scale => Self {
                min: 0.1,
                max: 2.0,
                step: 0.1,
            },
        }
    }

    /// Clamp into the range, snapping to the nearest step. Non-finite input snaps to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.min;
        }
        let snapped = self.min + ((value - self.min) / self.step).round() * self.step;
        // Round away accumulated float error from the step arithmetic.
        let snapped = (snapped * 1e6).round() / 1e6;
        snapped.clamp(self.min, self.max)
    }
}

/// Human readout shown next to a slider.
pub fn readout(control: ImageControl, t: &ImageTransform) -> String {
    match control {
        ImageControl::Opacity => format!("{:.0}%", t.opacity * 100.0),
        ImageControl::Scale => format!("{:.0}%", t.scale * 100.0),
        ImageControl::PositionX => format!("{}px", t.position.x),
        ImageControl::PositionY => format!("{}px", t.position.y),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/transform.rs"]
mod tests;
