use super::*;
use image::{Rgba, RgbaImage};
use rand::SeedableRng;
use rand::rngs::StdRng;

const RED: [u8; 4] = [220, 20, 60, 255];
const BLUE: [u8; 4] = [30, 60, 200, 255];
const GREEN: [u8; 4] = [20, 160, 80, 255];
const GOLD: [u8; 4] = [230, 180, 20, 255];
const SWATCH: [u8; 4] = [247, 247, 247, 255];

fn photo(color: [u8; 4]) -> String {
    EncodedImage::from_rgba(&RgbaImage::from_pixel(40, 30, Rgba(color)))
        .unwrap()
        .into_string()
}

fn grid() -> CollageLayout {
    CollageLayout::new(2, 2)
}

async fn render(images: &[String], layout: CollageLayout, options: &CollageOptions) -> EncodedImage {
    let mut rng = StdRng::seed_from_u64(7);
    render_collage(Arc::new(FontBook::empty()), images, layout, options, &mut rng).await
}

fn pixels(image: &EncodedImage) -> RgbaImage {
    let bytes = image.to_bytes().unwrap();
    image::load_from_memory(&bytes).unwrap().to_rgba8()
}

fn at(img: &RgbaImage, x: u32, y: u32) -> [u8; 4] {
    img.get_pixel(x, y).0
}

#[test]
fn options_fill_in_defaults() {
    let parsed: CollageOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(parsed, CollageOptions::default());
    assert_eq!(parsed.mask, CellMask::Rounded);
    assert_eq!(parsed.emojis.len(), 5);

    let parsed: CollageOptions =
        serde_json::from_str(r#"{"cellWidth": 10, "mask": "blob", "style": "emoji", "templateId": "sticker-sheet"}"#)
            .unwrap();
    assert_eq!(parsed.cell_width, 10);
    assert_eq!(parsed.mask, CellMask::None);
    assert_eq!(parsed.style, CollageStyle::Emoji);
    assert_eq!(parsed.template_id, Some(TemplateId::StickerSheet));
}

#[test]
fn mask_and_style_parse_from_str() {
    assert_eq!("oval".parse::<CellMask>(), Ok(CellMask::Oval));
    assert_eq!("retro".parse::<CollageStyle>(), Ok(CollageStyle::Classic));
}

#[test]
fn vertical_overrides_the_grid() {
    assert_eq!(effective_grid(3, grid(), true), (3, 1));
    assert_eq!(effective_grid(0, grid(), true), (1, 1));
    assert_eq!(effective_grid(3, grid(), false), (2, 2));
}

#[tokio::test]
async fn no_images_yields_background_page() {
    let options = CollageOptions {
        bg_color: "#102030".into(),
        ..CollageOptions::default()
    };
    let out = pixels(&render(&[], grid(), &options).await);
    assert_eq!(out.dimensions(), (800, 600));
    assert_eq!(at(&out, 400, 300), [0x10, 0x20, 0x30, 255]);
}

#[tokio::test]
async fn cells_fill_row_major_and_drop_surplus() {
    let images = [RED, BLUE, GREEN, GOLD, RED, RED].map(photo);
    let out = pixels(&render(&images, grid(), &CollageOptions::default()).await);
    assert_eq!(out.dimensions(), (800, 600));
    assert_eq!(at(&out, 200, 150), RED);
    assert_eq!(at(&out, 600, 150), BLUE);
    assert_eq!(at(&out, 200, 450), GREEN);
    assert_eq!(at(&out, 600, 450), GOLD);
    // padding gutter keeps the background
    assert_eq!(at(&out, 400, 150), [255, 255, 255, 255]);
}

#[tokio::test]
async fn vertical_stacks_every_image() {
    let images = [RED, BLUE, GREEN].map(photo);
    let options = CollageOptions {
        vertical: true,
        ..CollageOptions::default()
    };
    let out = pixels(&render(&images, grid(), &options).await);
    assert_eq!(out.dimensions(), (400, 900));
    assert_eq!(at(&out, 200, 750), GREEN);
}

#[tokio::test]
async fn failed_load_leaves_a_plain_swatch() {
    let images = vec![
        photo(RED),
        "/no/such/photo.png".to_string(),
        photo(GREEN),
        "data:image/png;base64,AAAA".to_string(),
    ];
    let out = pixels(&render(&images, grid(), &CollageOptions::default()).await);
    assert_eq!(at(&out, 200, 150), RED);
    assert_eq!(at(&out, 600, 150), SWATCH);
    assert_eq!(at(&out, 200, 450), GREEN);
    assert_eq!(at(&out, 600, 450), SWATCH);
}

#[tokio::test]
async fn page_decoration_runs_even_when_every_load_fails() {
    let options = CollageOptions {
        overlay_url: Some(photo(GOLD)),
        ..CollageOptions::default()
    };
    let images = vec!["/missing.png".to_string()];
    let out = pixels(&render(&images, grid(), &options).await);
    assert_eq!(at(&out, 5, 5), GOLD);
    assert_eq!(at(&out, 795, 595), GOLD);
}

#[tokio::test]
async fn unusable_surface_yields_empty_result() {
    let options = CollageOptions {
        cell_width: 0,
        ..CollageOptions::default()
    };
    assert!(render(&[photo(RED)], grid(), &options).await.is_empty());
}

#[tokio::test]
async fn masks_shape_the_photo() {
    let images = [photo(BLUE)];
    let circle = CollageOptions {
        mask: CellMask::Circle,
        ..CollageOptions::default()
    };
    let out = pixels(&render(&images, CollageLayout::new(1, 1), &circle).await);
    assert_eq!(at(&out, 200, 150), BLUE);
    assert_eq!(at(&out, 30, 150), SWATCH);

    let plain = CollageOptions {
        mask: CellMask::from_tag("nonsense"),
        ..CollageOptions::default()
    };
    let out = pixels(&render(&images, CollageLayout::new(1, 1), &plain).await);
    assert_eq!(at(&out, 10, 10), BLUE);

    let rounded = pixels(&render(&images, CollageLayout::new(1, 1), &CollageOptions::default()).await);
    assert_ne!(at(&rounded, 9, 9), BLUE);
}

#[tokio::test]
async fn polaroid_style_adds_caption_strip() {
    let options = CollageOptions {
        style: CollageStyle::Polaroid,
        ..CollageOptions::default()
    };
    let out = pixels(&render(&[photo(RED)], CollageLayout::new(1, 1), &options).await);
    // inner height 284 -> strip of 40px ending at y = 292
    assert_eq!(at(&out, 50, 270), [255, 255, 255, 255]);
    assert_eq!(at(&out, 50, 240), RED);
}

#[tokio::test]
async fn emoji_style_stamps_top_right_corner() {
    let options = CollageOptions {
        style: CollageStyle::Emoji,
        ..CollageOptions::default()
    };
    let out = pixels(&render(&[photo(BLUE)], CollageLayout::new(1, 1), &options).await);
    let stamped = (330..392)
        .flat_map(|x| (8..50).map(move |y| (x, y)))
        .filter(|&(x, y)| at(&out, x, y) != BLUE)
        .count();
    assert!(stamped > 20, "only {stamped} stamped pixels");
    assert_eq!(at(&out, 100, 200), BLUE);
}

#[tokio::test]
async fn modern_style_titles_the_page() {
    let options = CollageOptions {
        style: CollageStyle::Modern,
        bg_color: "#000000".into(),
        ..CollageOptions::default()
    };
    let out = pixels(&render(&[photo(BLUE)], CollageLayout::new(1, 2), &options).await);
    assert_eq!(at(&out, 100, 200), BLUE);
    let bright = (270..302)
        .flat_map(|x| (28..60).map(move |y| (x, y)))
        .filter(|&(x, y)| at(&out, x, y)[0] > 100)
        .count();
    assert!(bright > 10, "only {bright} sparkle pixels");
}

#[tokio::test]
async fn template_and_overlays_draw_over_cells() {
    let star = serde_json::from_value(serde_json::json!({
        "type": "shape", "id": "s1", "x": 0.25, "y": 0.25,
        "shape": "star", "size": 40, "fill": "#ff0000"
    }))
    .unwrap();
    let options = CollageOptions {
        template_id: Some(TemplateId::DualStripPink),
        overlays: vec![star],
        ..CollageOptions::default()
    };
    let images = [BLUE, BLUE, BLUE, BLUE].map(photo);
    let out = pixels(&render(&images, grid(), &options).await);
    assert_eq!(at(&out, 200, 150), [255, 0, 0, 255]);
    // banner: border 9, margin 18, 48px tall
    assert_eq!(at(&out, 200, 558), [0xec, 0x48, 0x99, 255]);
    assert_eq!(at(&out, 600, 450), BLUE);
}

fn draw_cells_in_order(order: [usize; 2], options: &CollageOptions) -> RgbaImage {
    let mut canvas = Canvas::new(options.cell_width * 2, options.cell_height).unwrap();
    canvas.fill_background(Color::WHITE);
    let images = [RED, BLUE].map(|c| {
        pixmap_from_rgba(&RgbaImage::from_pixel(40, 30, Rgba(c))).unwrap()
    });
    for index in order {
        let mut rng = StdRng::seed_from_u64(index as u64);
        draw_cell(&mut canvas, index, 2, Some(&images[index]), options, &mut rng);
    }
    canvas.to_rgba()
}

#[test]
fn cells_stay_inside_their_own_region() {
    for frame in [Frame::Neon, Frame::Gold, Frame::Hearts] {
        let options = CollageOptions {
            padding: 0.0,
            frame,
            ..CollageOptions::default()
        };
        let forward = draw_cells_in_order([0, 1], &options);
        let backward = draw_cells_in_order([1, 0], &options);
        let differing = forward
            .pixels()
            .zip(backward.pixels())
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(differing, 0, "{frame}: cells overlap their neighbour");
    }
}

#[test]
fn cell_bounds_tile_the_page() {
    let options = CollageOptions::default();
    assert_eq!(cell_bounds(3, 2, &options), Rect::new(400.0, 300.0, 400.0, 300.0));
    assert_eq!(cell_rect(3, 2, &options), Rect::new(416.0, 316.0, 368.0, 268.0));
}

#[tokio::test]
async fn seeded_scatter_frames_are_reproducible() {
    let options = CollageOptions {
        frame: Frame::Hearts,
        ..CollageOptions::default()
    };
    let images = [RED, BLUE, GREEN, GOLD].map(photo);
    let a = render(&images, grid(), &options).await;
    let b = render(&images, grid(), &options).await;
    assert_eq!(a, b);
}
