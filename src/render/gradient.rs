use crate::foundation::core::Rgba8;

/// Rasterize a two-stop linear gradient into premultiplied RGBA8 bytes.
///
/// `angle_deg` uses CSS `linear-gradient` conventions: 0 points up, 90 right, 180 down. The
/// gradient line passes through the center and is long enough that the two corners it points
/// away from and towards get exactly `from` and `to`.
pub(crate) fn linear_gradient_premul(
    angle_deg: f64,
    from: Rgba8,
    to: Rgba8,
    width: u32,
    height: u32,
) -> Vec<u8> {
    let (w, h) = (f64::from(width), f64::from(height));
    let theta = angle_deg.to_radians();
    let (dx, dy) = (theta.sin(), -theta.cos());
    let line_len = (w * dx).abs() + (h * dy).abs();
    let (cx, cy) = (w / 2.0, h / 2.0);

    let mut bytes = vec![0u8; (width as usize) * (height as usize) * 4];
    for y in 0..height {
        let py = f64::from(y) + 0.5 - cy;
        for x in 0..width {
            let px = f64::from(x) + 0.5 - cx;
            let t = if line_len > 0.0 {
                (px * dx + py * dy) / line_len + 0.5
            } else {
                0.0
            };
            let c = from.lerp(to, t as f32).premultiplied();
            let idx = ((y as usize) * (width as usize) + (x as usize)) * 4;
            bytes[idx..idx + 4].copy_from_slice(&c);
        }
    }
    bytes
}

#[cfg(test)]
#[path = "../../tests/unit/render/gradient.rs"]
mod tests;
