use crate::{
    foundation::{
        core::Canvas,
        error::{CoverError, CoverResult},
    },
    render::backend::RasterTarget,
    template::{kind::TemplateKind, layout::TemplateLayout},
};

/// Logical cover width (e-reader cover, 1.6:1 portrait).
pub const LOGICAL_WIDTH: u32 = 1600;
/// Logical cover height.
pub const LOGICAL_HEIGHT: u32 = 2560;
/// On-screen down-scale used while editing (1600 * 0.375 = 600).
pub const DISPLAY_SCALE: f64 = 0.375;
/// Device pixel multiplier applied when capturing for export.
pub const CAPTURE_PIXEL_RATIO: f64 = 2.0;
/// File name offered when the exported cover is saved.
pub const DEFAULT_EXPORT_FILENAME: &str = "ATI-TEAS-Study-Guide-Cover.png";

/// Fixed surface geometry shared by the display and capture paths.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SurfaceConfig {
    /// Logical canvas all layout and image transforms are expressed in.
    pub logical: Canvas,
    /// Uniform scale used for the on-screen editing view.
    pub display_scale: f64,
    /// Pixel multiplier for export capture.
    pub capture_pixel_ratio: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            logical: Canvas {
                width: LOGICAL_WIDTH,
                height: LOGICAL_HEIGHT,
            },
            display_scale: DISPLAY_SCALE,
            capture_pixel_ratio: CAPTURE_PIXEL_RATIO,
        }
    }
}

impl SurfaceConfig {
    /// Check the scales are finite and positive and the logical canvas is non-empty.
    pub fn validate(&self) -> CoverResult<()> {
        if self.logical.width == 0 || self.logical.height == 0 {
            return Err(CoverError::validation("logical canvas must be non-empty"));
        }
        for (name, v) in [
            ("display_scale", self.display_scale),
            ("capture_pixel_ratio", self.capture_pixel_ratio),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(CoverError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }

    /// Export capture target. Always derived from the logical canvas, never the display scale.
    pub fn capture_target(&self) -> RasterTarget {
        RasterTarget {
            logical: self.logical,
            pixel_ratio: self.capture_pixel_ratio,
        }
    }

    /// On-screen preview target.
    pub fn display_target(&self) -> RasterTarget {
        RasterTarget {
            logical: self.logical,
            pixel_ratio: self.display_scale,
        }
    }

    /// Pixel size of the on-screen view.
    pub fn display_size(&self) -> Canvas {
        self.display_target().output_size()
    }
}

/// Everything fixed about one template: where it is routed, how it lays out, how it exports.
#[derive(Clone, Debug)]
pub struct TemplateConfig {
    /// Template identity.
    pub kind: TemplateKind,
    /// Surface geometry.
    pub surface: SurfaceConfig,
    /// Save-as file name for exports.
    pub export_filename: String,
    /// Fixed layout table.
    pub layout: TemplateLayout,
}

impl TemplateConfig {
    /// Built-in configuration for `kind`.
    pub fn for_kind(kind: TemplateKind) -> Self {
        Self {
            kind,
            surface: SurfaceConfig::default(),
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
            layout: TemplateLayout::for_kind(kind),
        }
    }

    /// Route the template is mounted at.
    pub fn route(&self) -> &'static str {
        self.kind.route()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/config.rs"]
mod tests;
