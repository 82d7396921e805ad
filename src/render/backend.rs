use crate::{
    foundation::{
        core::Canvas,
        error::{CoverError, CoverResult},
    },
    surface::scene::CoverScene,
};

/// Output resolution for one render: the logical canvas times a pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RasterTarget {
    /// Logical canvas the scene is laid out in.
    pub logical: Canvas,
    /// Output pixels per logical pixel.
    pub pixel_ratio: f64,
}

impl RasterTarget {
    /// Pixel dimensions of the output raster. Each side is rounded and at least one pixel.
    pub fn output_size(&self) -> Canvas {
        let side = |v: u32| -> u32 {
            let px = (f64::from(v) * self.pixel_ratio).round();
            if px.is_finite() && px >= 1.0 {
                px.min(f64::from(u32::MAX)) as u32
            } else {
                1
            }
        };
        Canvas {
            width: side(self.logical.width),
            height: side(self.logical.height),
        }
    }
}

/// A rendered raster as straight-alpha RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major, straight alpha.
    pub data: Vec<u8>,
}

impl RasterImage {
    /// Wrap pixel bytes, checking the length matches the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> CoverResult<Self> {
        let expected = Canvas { width, height }.rgba8_len();
        if width == 0 || height == 0 || data.len() != expected {
            return Err(CoverError::capture(format!(
                "raster {width}x{height} needs {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Pixel dimensions.
    pub fn size(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// RGBA of one pixel, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// A rasterizer for composed covers.
///
/// The editor only depends on this trait; [`crate::CpuRenderer`] is the production implementation.
pub trait SurfaceRenderer {
    /// Rasterize `scene` at `target` resolution.
    fn render(&mut self, scene: &CoverScene, target: RasterTarget) -> CoverResult<RasterImage>;
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
