use std::io::Cursor;

use crate::{
    foundation::error::{CoverError, CoverResult},
    render::backend::RasterImage,
};

/// Encode a straight-alpha raster as PNG bytes.
pub fn encode_png(image: &RasterImage) -> CoverResult<Vec<u8>> {
    let rgba = image::RgbaImage::from_raw(image.width, image.height, image.data.clone())
        .ok_or_else(|| CoverError::export("raster byte length does not match its dimensions"))?;
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(rgba)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| CoverError::export(format!("png encode failed: {e}")))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
