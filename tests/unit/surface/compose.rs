use std::sync::Arc;

use super::*;
use crate::{
    assets::decode::PreparedImage,
    editor::transform::Position,
    foundation::core::{Point, Rect},
    surface::scene::Paint,
    template::{fields::FieldKey, kind::TemplateKind},
};

const CANVAS: Canvas = Canvas {
    width: 1600,
    height: 2560,
};

fn handle(w: u32, h: u32) -> ImageHandle {
    ImageHandle {
        image: PreparedImage {
            width: w,
            height: h,
            rgba8_premul: Arc::new(vec![255; (w * h * 4) as usize]),
        },
        file_name: "bg.jpg".to_string(),
        mime: Some("image/jpeg".to_string()),
    }
}

fn scene_for(kind: TemplateKind, bg: Option<&ImageHandle>, t: &ImageTransform) -> CoverScene {
    let layout = TemplateLayout::for_kind(kind);
    let fields = TextFields::defaults(kind);
    compose_scene(&layout, &fields, bg, t, CANVAS)
}

#[test]
fn first_op_is_the_full_canvas_gradient() {
    let scene = scene_for(TemplateKind::Study, None, &ImageTransform::default());
    match &scene.ops[0] {
        DrawOp::Fill { rect, paint, .. } => {
            assert_eq!(*rect, Rect::new(0.0, 0.0, 1600.0, 2560.0));
            assert!(matches!(
                paint,
                Paint::LinearGradient {
                    angle_deg,
                    ..
                } if *angle_deg == 135.0
            ));
        }
        other => panic!("unexpected first op {}", other.kind()),
    }
    assert!(scene.image_op().is_none());
}

#[test]
fn image_sits_directly_above_background() {
    let bg = handle(400, 300);
    let t = ImageTransform {
        opacity: 0.6,
        position: Position { x: 100, y: -50 },
        scale: 0.5,
    };
    let scene = scene_for(TemplateKind::Teas, Some(&bg), &t);
    assert_eq!(scene.ops[1].kind(), "image");

    let DrawOp::Image {
        transform,
        opacity,
        clip,
        image,
    } = &scene.ops[1]
    else {
        unreachable!()
    };
    assert_eq!(*opacity, 0.6);
    assert_eq!(*clip, CANVAS.rect());
    assert_eq!((image.width, image.height), (400, 300));
    let center = *transform * Point::new(200.0, 150.0);
    assert!((center.x - 900.0).abs() < 1e-9 && (center.y - 1230.0).abs() < 1e-9);
}

#[test]
fn study_texts_follow_fields_in_paint_order() {
    let scene = scene_for(TemplateKind::Study, None, &ImageTransform::default());
    let texts: Vec<_> = scene.texts().collect();
    assert_eq!(
        texts,
        [
            "VTNE",
            "PREP STUDY GUIDE",
            "2025-2026",
            "AIDEN WHITLOCK",
            "VETERINARY TECHNICIAN LICENSE",
            "EXTRA 399+ STUDY TOOLS",
        ]
    );
}

#[test]
fn teas_features_get_check_marks_and_chrome_text_comes_first() {
    let layout = TemplateLayout::for_kind(TemplateKind::Teas);
    let mut fields = TextFields::defaults(TemplateKind::Teas);
    fields.set(FieldKey::Feature2, "").unwrap();
    let scene = compose_scene(
        &layout,
        &fields,
        None,
        &ImageTransform::default(),
        CANVAS,
    );
    let texts: Vec<_> = scene.texts().collect();
    assert_eq!(texts[0], "EXAM ELITE ACADEMY");
    assert!(texts.contains(&"✓ 200 Flashcards"));
    assert!(texts.contains(&"✓ "));
    assert!(texts.contains(&"✓ 50 HRs E-Learning"));
    assert_eq!(
        *texts.last().unwrap(),
        "The Most Updated Guide with Practice Tests to Pass the Exam on Your First Attempt"
    );
}

#[test]
fn each_panel_block_precedes_its_text() {
    let scene = scene_for(TemplateKind::Teas, None, &ImageTransform::default());
    let kinds: Vec<_> = scene.ops.iter().map(DrawOp::kind).collect();
    let tail = &kinds[kinds.len() - 8..];
    assert_eq!(
        tail,
        ["fill", "text", "fill", "text", "fill", "text", "fill", "text"]
    );
}

#[test]
fn composition_is_pure() {
    let bg = handle(10, 10);
    let t = ImageTransform::default();
    let a = scene_for(TemplateKind::Teas, Some(&bg), &t);
    let b = scene_for(TemplateKind::Teas, Some(&bg), &t);
    assert_eq!(a.ops.len(), b.ops.len());
    assert!(a.texts().eq(b.texts()));
}
