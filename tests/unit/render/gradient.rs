use super::*;

const RED: Rgba8 = Rgba8::opaque(255, 0, 0);
const BLUE: Rgba8 = Rgba8::opaque(0, 0, 255);

fn px(bytes: &[u8], w: u32, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * w + x) * 4) as usize;
    [bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]
}

#[test]
fn ninety_degrees_runs_left_to_right() {
    let b = linear_gradient_premul(90.0, RED, BLUE, 100, 4);
    let left = px(&b, 100, 0, 2);
    let right = px(&b, 100, 99, 2);
    assert!(left[0] > 250 && left[2] < 5, "{left:?}");
    assert!(right[2] > 250 && right[0] < 5, "{right:?}");
    // Columns are uniform.
    assert_eq!(px(&b, 100, 50, 0), px(&b, 100, 50, 3));
}

#[test]
fn one_eighty_degrees_runs_top_to_bottom() {
    let b = linear_gradient_premul(180.0, RED, BLUE, 4, 100);
    assert!(px(&b, 4, 1, 0)[0] > 250);
    assert!(px(&b, 4, 1, 99)[2] > 250);
    assert_eq!(px(&b, 4, 0, 40), px(&b, 4, 3, 40));
}

#[test]
fn diagonal_hits_endpoints_at_corners() {
    let b = linear_gradient_premul(135.0, RED, BLUE, 64, 128);
    let top_left = px(&b, 64, 0, 0);
    let bottom_right = px(&b, 64, 63, 127);
    assert!(top_left[0] > 245, "{top_left:?}");
    assert!(bottom_right[2] > 245, "{bottom_right:?}");
    // Center is halfway.
    let mid = px(&b, 64, 32, 64);
    assert!((120..=136).contains(&mid[0]), "{mid:?}");
}

#[test]
fn output_is_premultiplied() {
    let clear = Rgba8 { a: 0, ..RED };
    let b = linear_gradient_premul(90.0, clear, clear, 2, 2);
    assert!(b.iter().all(|&v| v == 0));
}
