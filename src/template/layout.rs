//! Fixed per-template layout tables in logical (1600×2560) coordinates.
//!
//! Each cover flows top to bottom: a banner or header, the title group, then highlight blocks
//! near the bottom edge.

use crate::{
    assets::fonts::TextAlign,
    foundation::core::{Rect, Rgba8},
    surface::scene::{Paint, TextStyle},
    template::{fields::FieldKey, kind::TemplateKind},
};

const NAVY_TOP: Rgba8 = Rgba8::hex(0x003366);
const NAVY_BOTTOM: Rgba8 = Rgba8::hex(0x001a33);
const YELLOW_400: Rgba8 = Rgba8::hex(0xfacc15);
const YELLOW_500: Rgba8 = Rgba8::hex(0xeab308);
const BLUE_900: Rgba8 = Rgba8::hex(0x1e3a8a);
const WHITE: Rgba8 = Rgba8::WHITE;

const PAD: f64 = 96.0;
const RADIUS: f64 = 16.0;

const REGULAR: f32 = 400.0;
const BOLD: f32 = 700.0;
const BLACK: f32 = 900.0;

/// Where a text slot gets its string from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextSource {
    /// An editable field.
    Field(FieldKey),
    /// Fixed template chrome text.
    Static(&'static str),
}

/// A text block at a fixed position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextSlot {
    /// Text source.
    pub source: TextSource,
    /// Prepended to the resolved text (e.g. a check mark).
    pub prefix: &'static str,
    /// Layout frame.
    pub frame: Rect,
    /// Style.
    pub style: TextStyle,
}

/// A filled rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Block {
    /// Rectangle.
    pub rect: Rect,
    /// Corner radius.
    pub radius: f64,
    /// Fill.
    pub paint: Paint,
}

/// A filled block with one text slot drawn on top of it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Panel {
    /// Backing block.
    pub block: Block,
    /// Text drawn inside the block.
    pub text: TextSlot,
}

/// Layout table for one template.
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateLayout {
    /// Full-canvas background fill.
    pub background: Paint,
    /// Banner/header blocks drawn above the background image.
    pub chrome: Vec<Block>,
    /// Text drawn as part of the chrome (not editable).
    pub chrome_text: Vec<TextSlot>,
    /// Free-standing editable text.
    pub fields: Vec<TextSlot>,
    /// Highlight blocks with their text, drawn last.
    pub panels: Vec<Panel>,
}

impl TemplateLayout {
    /// Built-in layout for `kind`.
    pub fn for_kind(kind: TemplateKind) -> Self {
        match kind {
            TemplateKind::Study => study_layout(),
            TemplateKind::Teas => teas_layout(),
        }
    }

    /// All slots bound to editable fields, in draw order.
    pub fn field_slots(&self) -> impl Iterator<Item = &TextSlot> + '_ {
        self.fields
            .iter()
            .chain(self.panels.iter().map(|p| &p.text))
            .filter(|s| matches!(s.source, TextSource::Field(_)))
    }
}

fn style(size_px: f32, weight: f32, color: Rgba8, align: TextAlign) -> TextStyle {
    TextStyle {
        size_px,
        weight,
        color,
        align,
        wrap: false,
    }
}

fn centered(source: TextSource, top: f64, bottom: f64, s: TextStyle) -> TextSlot {
    TextSlot {
        source,
        prefix: "",
        frame: Rect::new(PAD, top, 1600.0 - PAD, bottom),
        style: s,
    }
}

fn background() -> Paint {
    Paint::LinearGradient {
        angle_deg: 135.0,
        from: NAVY_TOP,
        to: NAVY_BOTTOM,
    }
}

fn study_layout() -> TemplateLayout {
    let banner = Rect::new(0.0, 0.0, 1600.0, 334.0);
    let feature_box = Rect::new(PAD, 1780.0, 1600.0 - PAD, 1948.0);

    TemplateLayout {
        background: background(),
        chrome: vec![Block {
            rect: banner,
            radius: 0.0,
            paint: Paint::Solid(YELLOW_400),
        }],
        chrome_text: vec![],
        fields: vec![
            TextSlot {
                source: TextSource::Field(FieldKey::Title),
                prefix: "",
                frame: Rect::new(0.0, 32.0, 1600.0, banner.y1 - 32.0),
                style: style(180.0, BLACK, BLUE_900, TextAlign::Center),
            },
            centered(
                TextSource::Field(FieldKey::Subtitle),
                526.0,
                706.0,
                style(120.0, BOLD, YELLOW_400, TextAlign::Center),
            ),
            centered(
                TextSource::Field(FieldKey::Year),
                754.0,
                904.0,
                style(100.0, BOLD, WHITE, TextAlign::Center),
            ),
            centered(
                TextSource::Field(FieldKey::Author),
                2140.0,
                2200.0,
                style(60.0, BOLD, WHITE, TextAlign::Center),
            ),
            centered(
                TextSource::Field(FieldKey::BottomText),
                2248.0,
                2296.0,
                style(48.0, BOLD, YELLOW_400, TextAlign::Center),
            ),
        ],
        panels: vec![Panel {
            block: Block {
                rect: feature_box,
                radius: RADIUS,
                paint: Paint::Solid(YELLOW_400),
            },
            text: TextSlot {
                source: TextSource::Field(FieldKey::Feature1),
                prefix: "",
                frame: feature_box.inset(-48.0),
                style: style(72.0, BOLD, BLUE_900, TextAlign::Center),
            },
        }],
    }
}

fn teas_layout() -> TemplateLayout {
    let header = Rect::new(0.0, 0.0, 1600.0, 156.0);
    let yellow_bar = Paint::LinearGradient {
        angle_deg: 90.0,
        from: YELLOW_400,
        to: YELLOW_500,
    };

    let feature = |key: FieldKey, top: f64| -> Panel {
        let rect = Rect::new(PAD, top, 1600.0 - PAD, top + 112.0);
        Panel {
            block: Block {
                rect,
                radius: RADIUS,
                paint: yellow_bar,
            },
            text: TextSlot {
                source: TextSource::Field(key),
                prefix: "✓ ",
                frame: rect.inset(-32.0),
                style: style(48.0, BOLD, BLUE_900, TextAlign::Start),
            },
        }
    };

    let closing = Rect::new(PAD, 2292.0, 1600.0 - PAD, 2476.0);

    TemplateLayout {
        background: background(),
        chrome: vec![Block {
            rect: header,
            radius: 0.0,
            paint: yellow_bar,
        }],
        chrome_text: vec![TextSlot {
            source: TextSource::Static("EXAM ELITE ACADEMY"),
            prefix: "",
            frame: Rect::new(64.0, 48.0, 1600.0 - 64.0, 108.0),
            style: style(60.0, BOLD, BLUE_900, TextAlign::Start),
        }],
        fields: vec![
            centered(
                TextSource::Field(FieldKey::Title),
                header.y1 + PAD,
                502.0,
                style(200.0, BLACK, WHITE, TextAlign::Center),
            ),
            centered(
                TextSource::Field(FieldKey::Subtitle),
                550.0,
                775.0,
                style(150.0, BOLD, YELLOW_400, TextAlign::Center),
            ),
            centered(
                TextSource::Field(FieldKey::Year),
                823.0,
                919.0,
                style(96.0, BOLD, WHITE, TextAlign::Center),
            ),
        ],
        panels: vec![
            feature(FieldKey::Feature1, 1764.0),
            feature(FieldKey::Feature2, 1924.0),
            feature(FieldKey::Feature3, 2084.0),
            Panel {
                block: Block {
                    rect: closing,
                    radius: RADIUS,
                    paint: Paint::Solid(BLUE_900.with_alpha(0.5)),
                },
                text: TextSlot {
                    source: TextSource::Field(FieldKey::BottomText),
                    prefix: "",
                    frame: closing.inset(-32.0),
                    style: TextStyle {
                        wrap: true,
                        ..style(36.0, REGULAR, WHITE.with_alpha(0.9), TextAlign::Center)
                    },
                },
            },
        ],
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/layout.rs"]
mod tests;
