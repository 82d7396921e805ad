use super::*;
use crate::{assets::fonts::TextAlign, foundation::core::Canvas};

const BLUE: Rgba8 = Rgba8::opaque(0, 0, 255);
const RED: Rgba8 = Rgba8::opaque(255, 0, 0);

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas {
        width: w,
        height: h,
    }
}

fn target(c: Canvas, pixel_ratio: f64) -> RasterTarget {
    RasterTarget {
        logical: c,
        pixel_ratio,
    }
}

fn fill(c: Canvas, color: Rgba8) -> DrawOp {
    DrawOp::Fill {
        rect: c.rect(),
        radius: 0.0,
        paint: Paint::Solid(color),
    }
}

fn solid_image(w: u32, h: u32, color: Rgba8) -> PreparedImage {
    let px = color.premultiplied();
    let mut bytes = Vec::with_capacity((w * h * 4) as usize);
    for _ in 0..w * h {
        bytes.extend_from_slice(&px);
    }
    PreparedImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(bytes),
    }
}

fn close(a: [u8; 4], b: [u8; 4]) -> bool {
    a.iter().zip(b).all(|(x, y)| x.abs_diff(y) <= 2)
}

#[test]
fn solid_fill_covers_output_at_pixel_ratio() {
    let c = canvas(8, 12);
    let scene = CoverScene {
        canvas: c,
        ops: vec![fill(c, BLUE)],
    };
    let mut r = CpuRenderer::default();
    let out = r.render(&scene, target(c, 2.0)).unwrap();
    assert_eq!((out.width, out.height), (16, 24));
    assert!(out.data.chunks_exact(4).all(|px| px == [0, 0, 255, 255]));
}

#[test]
fn image_opacity_blends_over_background() {
    let c = canvas(8, 8);
    let scene = CoverScene {
        canvas: c,
        ops: vec![
            fill(c, Rgba8::WHITE),
            DrawOp::Image {
                image: solid_image(8, 8, RED),
                transform: Affine::IDENTITY,
                opacity: 0.5,
                clip: c.rect(),
            },
        ],
    };
    let out = CpuRenderer::default()
        .render(&scene, target(c, 1.0))
        .unwrap();
    let px = out.pixel(4, 4).unwrap();
    assert!(close(px, [255, 128, 128, 255]), "{px:?}");
}

#[test]
fn image_is_clipped() {
    let c = canvas(8, 8);
    let scene = CoverScene {
        canvas: c,
        ops: vec![
            fill(c, BLUE),
            DrawOp::Image {
                image: solid_image(8, 8, RED),
                transform: Affine::IDENTITY,
                opacity: 1.0,
                clip: Rect::new(0.0, 0.0, 4.0, 8.0),
            },
        ],
    };
    let out = CpuRenderer::default()
        .render(&scene, target(c, 1.0))
        .unwrap();
    assert!(close(out.pixel(1, 4).unwrap(), [255, 0, 0, 255]));
    assert!(close(out.pixel(6, 4).unwrap(), [0, 0, 255, 255]));
}

#[test]
fn zero_opacity_or_degenerate_scale_draws_nothing() {
    let c = canvas(4, 4);
    let background = CoverScene {
        canvas: c,
        ops: vec![fill(c, BLUE)],
    };
    let mut with_image = background.clone();
    with_image.ops.push(DrawOp::Image {
        image: solid_image(4, 4, RED),
        transform: Affine::IDENTITY,
        opacity: 0.0,
        clip: c.rect(),
    });
    with_image.ops.push(DrawOp::Image {
        image: solid_image(4, 4, RED),
        transform: Affine::scale(0.0),
        opacity: 1.0,
        clip: c.rect(),
    });

    let mut r = CpuRenderer::default();
    let a = r.render(&background, target(c, 1.0)).unwrap();
    let b = r.render(&with_image, target(c, 1.0)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn rounded_fill_leaves_corners_open() {
    let c = canvas(40, 40);
    let scene = CoverScene {
        canvas: c,
        ops: vec![DrawOp::Fill {
            rect: c.rect(),
            radius: 16.0,
            paint: Paint::Solid(RED),
        }],
    };
    let out = CpuRenderer::default()
        .render(&scene, target(c, 1.0))
        .unwrap();
    assert_eq!(out.pixel(0, 0).unwrap()[3], 0);
    assert_eq!(out.pixel(20, 20).unwrap(), [255, 0, 0, 255]);
}

#[test]
fn gradient_fill_runs_between_stops() {
    let c = canvas(64, 8);
    let scene = CoverScene {
        canvas: c,
        ops: vec![DrawOp::Fill {
            rect: c.rect(),
            radius: 0.0,
            paint: Paint::LinearGradient {
                angle_deg: 90.0,
                from: RED,
                to: BLUE,
            },
        }],
    };
    let out = CpuRenderer::default()
        .render(&scene, target(c, 1.0))
        .unwrap();
    let left = out.pixel(1, 4).unwrap();
    let right = out.pixel(62, 4).unwrap();
    assert!(left[0] > 230 && left[2] < 25, "{left:?}");
    assert!(right[2] > 230 && right[0] < 25, "{right:?}");
}

#[test]
fn text_without_font_is_skipped() {
    let c = canvas(16, 16);
    let plain = CoverScene {
        canvas: c,
        ops: vec![fill(c, BLUE)],
    };
    let mut with_text = plain.clone();
    with_text.ops.push(DrawOp::Text {
        text: "VTNE".to_string(),
        frame: c.rect(),
        style: TextStyle {
            size_px: 8.0,
            weight: 700.0,
            color: Rgba8::WHITE,
            align: TextAlign::Center,
            wrap: false,
        },
    });

    let mut r = CpuRenderer::default();
    assert!(r.font_family().is_none());
    let a = r.render(&plain, target(c, 1.0)).unwrap();
    let b = r.render(&with_text, target(c, 1.0)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn renders_are_deterministic_across_sizes() {
    let c = canvas(20, 32);
    let scene = CoverScene {
        canvas: c,
        ops: vec![
            DrawOp::Fill {
                rect: c.rect(),
                radius: 0.0,
                paint: Paint::LinearGradient {
                    angle_deg: 135.0,
                    from: Rgba8::hex(0x003366),
                    to: Rgba8::hex(0x001a33),
                },
            },
            DrawOp::Image {
                image: solid_image(6, 4, RED),
                transform: Affine::translate(Vec2::new(7.0, 14.0)) * Affine::scale(1.5),
                opacity: 0.6,
                clip: c.rect(),
            },
        ],
    };

    let mut r = CpuRenderer::default();
    let big = r.render(&scene, target(c, 2.0)).unwrap();
    let small = r.render(&scene, target(c, 0.5)).unwrap();
    let again = r.render(&scene, target(c, 2.0)).unwrap();
    assert_eq!((small.width, small.height), (10, 16));
    assert_eq!(big, again);
}

fn fixture_font() -> FontSet {
    FontSet::from_path(std::path::Path::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/data/fonts/DejaVuSans-Bold.ttf"
    )))
    .unwrap()
}

/// Bounding box and pixel count of white-ish ink over the blue background.
fn ink_bounds(out: &RasterImage) -> Option<(u32, u32, u32, u32, usize)> {
    let mut bounds: Option<(u32, u32, u32, u32, usize)> = None;
    for y in 0..out.height {
        for x in 0..out.width {
            if out.pixel(x, y).unwrap()[0] < 128 {
                continue;
            }
            let b = bounds.get_or_insert((x, y, x, y, 0));
            b.0 = b.0.min(x);
            b.1 = b.1.min(y);
            b.2 = b.2.max(x);
            b.3 = b.3.max(y);
            b.4 += 1;
        }
    }
    bounds
}

fn text_scene(c: Canvas, text: &str, frame: Rect, size_px: f32, wrap: bool) -> CoverScene {
    CoverScene {
        canvas: c,
        ops: vec![
            fill(c, BLUE),
            DrawOp::Text {
                text: text.to_string(),
                frame,
                style: TextStyle {
                    size_px,
                    weight: 700.0,
                    color: Rgba8::WHITE,
                    align: TextAlign::Center,
                    wrap,
                },
            },
        ],
    }
}

#[test]
fn centered_text_lands_inside_its_frame() {
    let c = canvas(240, 80);
    let frame = Rect::new(20.0, 16.0, 220.0, 64.0);
    let mut r = CpuRenderer::new(Some(fixture_font()));
    assert!(r.font_family().unwrap().starts_with("DejaVu"));

    let out = r
        .render(&text_scene(c, "TEAS", frame, 32.0, false), target(c, 1.0))
        .unwrap();
    let (x0, y0, x1, y1, count) = ink_bounds(&out).expect("no text ink");

    assert!(count > 150, "only {count} ink pixels");
    assert!(x1 - x0 > 40, "glyphs collapsed: {x0}..{x1}");
    assert!(x0 >= 20 && x1 <= 220, "x {x0}..{x1}");
    assert!(y0 >= 16 && y1 <= 64, "y {y0}..{y1}");
    let center = f64::from(x0 + x1) / 2.0;
    assert!((center - 120.0).abs() < 12.0, "center {center}");
}

#[test]
fn text_scales_with_pixel_ratio() {
    let c = canvas(240, 80);
    let frame = Rect::new(20.0, 16.0, 220.0, 64.0);
    let scene = text_scene(c, "TEAS", frame, 32.0, false);
    let mut r = CpuRenderer::new(Some(fixture_font()));

    let (a0, _, a1, _, _) = ink_bounds(&r.render(&scene, target(c, 1.0)).unwrap()).unwrap();
    let (b0, _, b1, _, _) = ink_bounds(&r.render(&scene, target(c, 2.0)).unwrap()).unwrap();
    let (wa, wb) = (f64::from(a1 - a0), f64::from(b1 - b0));
    assert!((wb / wa - 2.0).abs() < 0.15, "{wa} -> {wb}");
}

#[test]
fn wrapped_text_breaks_into_lines_within_frame() {
    let c = canvas(200, 240);
    let frame = Rect::new(20.0, 20.0, 180.0, 220.0);
    let mut r = CpuRenderer::new(Some(fixture_font()));

    let out = r
        .render(
            &text_scene(
                c,
                "The Most Updated Guide with Practice Tests",
                frame,
                20.0,
                true,
            ),
            target(c, 1.0),
        )
        .unwrap();
    let (x0, y0, x1, y1, _) = ink_bounds(&out).expect("no text ink");

    assert!(x0 >= 20 && x1 <= 180, "x {x0}..{x1}");
    assert!(y0 >= 20 && y1 <= 220, "y {y0}..{y1}");
    assert!(y1 - y0 > 50, "expected several lines, ink spans {y0}..{y1}");
}
