use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

const W: u32 = 200;
const H: u32 = 150;

fn render(frame: Frame, seed: u64) -> Canvas {
    let mut canvas = Canvas::new(W, H).unwrap();
    let mut rng = StdRng::seed_from_u64(seed);
    let bounds = canvas.bounds();
    draw_frame_with_rng(&mut canvas, bounds, frame, &mut rng);
    canvas
}

fn painted(canvas: &Canvas) -> usize {
    canvas.to_rgba().pixels().filter(|p| p.0[3] > 0).count()
}

#[test]
fn catalogue_has_twenty_three_styles() {
    assert_eq!(Frame::ALL.len(), 24);
    assert_eq!(Frame::ALL.iter().filter(|f| !f.is_none()).count(), 23);
    assert_eq!(Frame::from_tag("pastel-1"), Frame::Pastel1);
    assert_eq!(Frame::Kawaii.as_str(), "kawaii");
}

#[test]
fn unknown_tag_is_none() {
    assert_eq!(Frame::from_tag("glitter-bomb"), Frame::None);
    assert_eq!(Frame::default(), Frame::None);
}

#[test]
fn none_draws_nothing() {
    assert_eq!(painted(&render(Frame::None, 1)), 0);
}

#[test]
fn every_style_decorates_the_border() {
    for frame in Frame::ALL.iter().copied().filter(|f| !f.is_none()) {
        let canvas = render(frame, 7);
        assert!(painted(&canvas) > 100, "{frame} drew too little");
    }
}

#[test]
fn every_style_leaves_the_center_clear() {
    for frame in Frame::ALL.iter().copied().filter(|f| !f.is_none()) {
        let canvas = render(frame, 11);
        assert_eq!(canvas.pixel(W / 2, H / 2).unwrap()[3], 0, "{frame} covered the photo");
    }
}

#[test]
fn drawing_does_not_leak_state() {
    let mut canvas = Canvas::new(W, H).unwrap();
    let bounds = canvas.bounds();
    draw_frame(&mut canvas, bounds, Frame::Neon);
    canvas.fill_rect(
        Rect::new(96.0, 71.0, 8.0, 8.0),
        &Brush::Solid(tiny_skia::Color::BLACK),
    );
    assert_eq!(canvas.pixel(100, 75), Some([0, 0, 0, 255]));
    // no glow left behind around the later fill
    assert_eq!(canvas.pixel(108, 75).unwrap()[3], 0);
}

#[test]
fn seeded_scatter_is_reproducible() {
    let a = render(Frame::Christmas, 42).to_rgba();
    let b = render(Frame::Christmas, 42).to_rgba();
    assert_eq!(a, b);
}

#[test]
fn scatter_varies_but_border_stays() {
    let a = render(Frame::Christmas, 1);
    let b = render(Frame::Christmas, 2);
    assert_ne!(a.to_rgba(), b.to_rgba());
    // pad = 10, line width 8 centered on the inset edge
    for canvas in [&a, &b] {
        assert_eq!(canvas.pixel(10, H / 2).unwrap()[3], 255);
        assert_eq!(canvas.pixel(W - 10, H / 2).unwrap()[3], 255);
    }
}

#[test]
fn scatter_only_lands_on_the_edge_band() {
    let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
    let mut rng = StdRng::seed_from_u64(3);
    let mut placed = Vec::new();
    scatter_edge(&mut rng, rect, 15.0, 200, |_, x, y| placed.push((x, y)));
    assert!(!placed.is_empty());
    assert!(placed.len() < 200);
    assert!(placed.iter().all(|&(x, y)| on_edge(rect, 15.0, x, y)));
}

#[test]
fn polaroid_bottom_strip_is_thicker() {
    let canvas = render(Frame::Polaroid, 0);
    // t = 8, bottom = 24
    assert_eq!(canvas.pixel(W / 2, 4), Some([255, 255, 255, 242]));
    assert_eq!(canvas.pixel(W / 2, H - 20).unwrap()[3], 242);
    assert_eq!(canvas.pixel(W / 2, 12).unwrap()[3], 0);
}

#[test]
fn film_has_sprocket_holes() {
    let canvas = render(Frame::Film, 0);
    let bar = canvas.pixel(1, 6).unwrap();
    let hole = canvas.pixel(5, 6).unwrap();
    assert!(bar[0] < 10 && bar[3] > 200);
    assert!(hole[0] > 200);
}

#[test]
fn tape_sits_in_the_corners() {
    let canvas = render(Frame::Tape, 0);
    // tapeW = 40, tapeH = 14, pad = 8
    let px = canvas.pixel(28, 15).unwrap();
    assert_eq!(px[0], 255);
    assert!(px[1].abs_diff(247) <= 1);
}

#[test]
fn small_rectangles_clamp_to_pixel_floors() {
    let mut canvas = Canvas::new(30, 30).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    for frame in Frame::ALL {
        draw_frame_with_rng(&mut canvas, Rect::new(0.0, 0.0, 30.0, 30.0), *frame, &mut rng);
    }
    draw_frame_with_rng(&mut canvas, Rect::new(5.0, 5.0, 0.0, 10.0), Frame::Gold, &mut rng);
}
