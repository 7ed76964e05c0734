use super::*;

use crate::foundation::core::Rgba8Premul;
use crate::render::renderer::{DrawCall, RecordingRenderer};

fn red_image(width: u32, height: u32) -> PixelImage {
    PixelImage::solid(
        width,
        height,
        Rgba8Premul {
            r: 255,
            g: 0,
            b: 0,
            a: 255,
        },
    )
}

fn alpha_map(width: u32, height: u32, alpha: u8) -> PixelImage {
    PixelImage::solid(
        width,
        height,
        Rgba8Premul {
            r: 0,
            g: 0,
            b: 0,
            a: alpha,
        },
    )
}

struct StubResolver(Option<Resolution>);

impl ImageResolver for StubResolver {
    fn resolve(&mut self, _key: &str) -> VexelResult<Resolution> {
        Ok(self.0.take().unwrap())
    }
}

#[test]
fn initialize_derives_full_source_region() {
    let bitmap = Bitmap::from_image(red_image(64, 32));
    assert!(bitmap.is_ready());
    assert_eq!(bitmap.source_rect(), Some(SourceRect::from_size(64.0, 32.0)));
    assert_eq!(bitmap.base().bounds(), Rect::new(0.0, 0.0, 64.0, 32.0));
    assert_eq!(
        bitmap.draw_params().as_slice(),
        &[0.0, 0.0, 64.0, 32.0, 0.0, 0.0, 64.0, 32.0, 0.0, 0.0, 0.0, 0.0],
    );
}

#[test]
fn zero_sized_image_is_not_ready() {
    let bitmap = Bitmap::from_image(PixelImage::new(0, 0, Vec::new()).unwrap());
    assert!(!bitmap.is_ready());
    assert!(!bitmap.is_visible());
}

#[test]
fn visibility_requires_ready_and_base() {
    let mut bitmap = Bitmap::from_image(red_image(8, 8));
    assert!(bitmap.is_visible());
    bitmap.base_mut().set_hidden(true);
    assert!(!bitmap.is_visible());
}

#[test]
fn set_source_rect_selects_without_recentering() {
    let mut bitmap = Bitmap::from_image(red_image(64, 32))
        .with_nominal_bounds(Rect::new(0.0, 0.0, 100.0, 100.0));
    bitmap.set_source_rect(SourceRect::new(16.0, 8.0, 32.0, 16.0).unwrap());

    assert_eq!(bitmap.base().bounds(), Rect::new(0.0, 0.0, 32.0, 16.0));
    assert_eq!(
        bitmap.draw_params().as_slice(),
        &[16.0, 8.0, 32.0, 16.0, 0.0, 0.0, 32.0, 16.0, 0.0, 0.0, 0.0, 0.0],
    );
}

#[test]
fn nominal_bounds_center_smaller_images() {
    let bitmap =
        Bitmap::from_image(red_image(50, 30)).with_nominal_bounds(Rect::new(0.0, 0.0, 60.0, 40.0));
    assert_eq!(bitmap.draw_params().offset_x(), 5.0);
    assert_eq!(bitmap.draw_params().offset_y(), 5.0);

    let bitmap =
        Bitmap::from_image(red_image(61, 41)).with_nominal_bounds(Rect::new(0.0, 0.0, 60.0, 40.0));
    assert_eq!(bitmap.draw_params().offset_x(), 0.0);
    assert_eq!(bitmap.draw_params().offset_y(), 0.0);
}

#[test]
fn attach_before_ready_is_a_no_op() {
    let mut renderer = RecordingRenderer::new();
    let mut bitmap = Bitmap::new();
    bitmap.on_attach(&mut renderer, AttachFlags::CACHE);
    bitmap.paint(&mut renderer);
    assert!(renderer.calls().is_empty());
}

#[test]
fn attach_detach_round_trip_releases_cache() {
    let mut renderer = RecordingRenderer::new();
    let mut bitmap = Bitmap::from_image(red_image(8, 8));

    bitmap.on_attach(&mut renderer, AttachFlags::CACHE);
    assert_eq!(renderer.live_handles(), 1);

    bitmap.on_detach(&mut renderer);
    assert_eq!(renderer.live_handles(), 0);
    assert!(bitmap.image().is_some());
    assert!(bitmap.is_ready());

    let releases = renderer.released().len();
    bitmap.on_detach(&mut renderer);
    assert_eq!(renderer.released().len(), releases);
}

#[test]
fn set_image_swaps_cache_and_keeps_region() {
    let mut renderer = RecordingRenderer::new();
    let mut bitmap = Bitmap::from_image(red_image(8, 8));
    bitmap.on_attach(&mut renderer, AttachFlags::CACHE);

    bitmap.set_image(&mut renderer, red_image(16, 4));
    assert_eq!(renderer.live_handles(), 1);
    assert_eq!(renderer.released().len(), 1);
    assert_eq!(bitmap.base().bounds(), Rect::new(0.0, 0.0, 16.0, 4.0));
    // The derived region survives a hot swap; only an async load rebuilds it.
    assert_eq!(bitmap.source_rect(), Some(SourceRect::from_size(8.0, 8.0)));
}

#[test]
fn pending_load_installs_and_attaches_once() {
    let mut renderer = RecordingRenderer::new();
    let mut resolver = StubResolver(Some(Resolution::Pending(ImageTicket::new(7))));
    let mut bitmap = Bitmap::from_key(&mut resolver, "hero").unwrap();
    assert!(!bitmap.is_ready());
    assert_eq!(bitmap.pending_ticket(), Some(ImageTicket::new(7)));
    bitmap.set_source_rect(SourceRect::new(2.0, 2.0, 4.0, 4.0).unwrap());

    let event = ImageEvent {
        ticket: ImageTicket::new(7),
        kind: ImageEventKind::Loaded(red_image(64, 32)),
    };
    assert!(bitmap.handle_image_event(&mut renderer, &event));
    assert!(bitmap.is_ready());
    assert_eq!(bitmap.pending_ticket(), None);
    assert_eq!(bitmap.source_rect(), Some(SourceRect::from_size(64.0, 32.0)));
    assert_eq!(bitmap.base().bounds(), Rect::new(0.0, 0.0, 64.0, 32.0));
    assert_eq!(renderer.live_handles(), 1);

    // The ticket was consumed; redelivery is not claimed.
    assert!(!bitmap.handle_image_event(&mut renderer, &event));
    assert_eq!(renderer.live_handles(), 1);
}

#[test]
fn load_failure_leaves_leaf_not_ready() {
    let mut renderer = RecordingRenderer::new();
    let mut resolver = StubResolver(Some(Resolution::Pending(ImageTicket::new(3))));
    let mut bitmap = Bitmap::from_key(&mut resolver, "missing").unwrap();

    let event = ImageEvent {
        ticket: ImageTicket::new(3),
        kind: ImageEventKind::Failed("not found".into()),
    };
    assert!(bitmap.handle_image_event(&mut renderer, &event));
    assert!(!bitmap.is_ready());
    assert!(!bitmap.is_visible());
    assert!(bitmap.image().is_none());
    assert_eq!(bitmap.pending_ticket(), None);

    assert!(!bitmap.handle_image_event(&mut renderer, &event));
}

#[test]
fn mismatched_ticket_is_ignored() {
    let mut renderer = RecordingRenderer::new();
    let mut resolver = StubResolver(Some(Resolution::Pending(ImageTicket::new(7))));
    let mut bitmap = Bitmap::from_key(&mut resolver, "hero").unwrap();

    let stray = ImageEvent {
        ticket: ImageTicket::new(9),
        kind: ImageEventKind::Loaded(red_image(8, 8)),
    };
    assert!(!bitmap.handle_image_event(&mut renderer, &stray));
    assert!(!bitmap.is_ready());
    assert_eq!(bitmap.pending_ticket(), Some(ImageTicket::new(7)));
}

#[test]
fn from_key_with_ready_resolution_initializes() {
    let mut resolver = StubResolver(Some(Resolution::Ready(red_image(8, 8))));
    let bitmap = Bitmap::from_key(&mut resolver, "hero").unwrap();
    assert!(bitmap.is_ready());
    assert_eq!(bitmap.pending_ticket(), None);
}

#[test]
fn alpha_map_composes_into_the_cached_image() {
    let mut renderer = RecordingRenderer::new();
    let mut bitmap = Bitmap::from_image(red_image(8, 8));
    bitmap.set_alpha_map(Some(alpha_map(8, 8, 128)));

    bitmap.on_attach(&mut renderer, AttachFlags::CACHE);
    let Some(DrawCall::CacheImage { top_left, .. }) = renderer.calls().first() else {
        panic!("expected a cached image");
    };
    assert_eq!(*top_left, [128, 0, 0, 128]);

    renderer.clear_calls();
    bitmap.paint(&mut renderer);
    let [DrawCall::Partial { top_left, .. }] = renderer.calls() else {
        panic!("expected a partial draw");
    };
    assert_eq!(*top_left, [128, 0, 0, 128]);
}

#[test]
fn mismatched_alpha_map_falls_back_to_raw_image() {
    let mut renderer = RecordingRenderer::new();
    let mut bitmap = Bitmap::from_image(red_image(8, 8));
    bitmap.set_alpha_map(Some(alpha_map(4, 4, 128)));

    bitmap.on_attach(&mut renderer, AttachFlags::CACHE);
    let Some(DrawCall::CacheImage { top_left, .. }) = renderer.calls().first() else {
        panic!("expected a cached image");
    };
    assert_eq!(*top_left, [255, 0, 0, 255]);
}

#[test]
fn color_matrix_brackets_the_draw() {
    let mut renderer = RecordingRenderer::new();
    let mut bitmap = Bitmap::from_image(red_image(8, 8));
    let mut matrix = [0.0_f32; 20];
    matrix[0] = 1.0;
    bitmap.set_color_matrix(Some(matrix));

    bitmap.paint(&mut renderer);
    let calls = renderer.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0], DrawCall::SetColorMatrix(Some(matrix)));
    assert!(matches!(calls[1], DrawCall::Partial { .. }));
    assert_eq!(calls[2], DrawCall::SetColorMatrix(None));

    renderer.clear_calls();
    bitmap.set_color_matrix(None);
    bitmap.paint(&mut renderer);
    assert_eq!(renderer.calls().len(), 1);
}

#[test]
fn remove_all_children_clears_leaf_state() {
    let mut renderer = RecordingRenderer::new();
    let mut bitmap = Bitmap::from_image(red_image(8, 8));
    bitmap.on_attach(&mut renderer, AttachFlags::CACHE);

    bitmap.remove_all_children(&mut renderer);
    assert_eq!(renderer.live_handles(), 0);
    assert!(bitmap.image().is_none());
    assert!(bitmap.source_rect().is_none());
    assert!(!bitmap.is_ready());
    assert_eq!(bitmap.draw_params(), DrawParams::zeroed());
}
