use image::{DynamicImage, GenericImageView, Rgb, RgbImage};

use docpix_core::error::ErrorKind;
use docpix_core::geometry::{Point, Size};
use docpix_core::io::crop::{apply_crop, CropRect};
use docpix_core::view::{CropEngine, CropOutcome, InputMode, ViewportTransform};

fn drag(engine: &mut CropEngine, from: (f64, f64), to: (f64, f64)) {
    engine.begin();
    engine.press(Point::new(from.0, from.1));
    engine.drag(Point::new(to.0, to.1));
    engine.release(Point::new(to.0, to.1));
}

// ---------------------------------------------------------------------------
// CropEngine
// ---------------------------------------------------------------------------

#[test]
fn test_crop_maps_through_viewport_inverse() {
    // 200x100 image centred on a 400x300 surface at scale 1: image origin at (100, 100)
    let vp = ViewportTransform::new(Size::new(200.0, 100.0), Size::new(400.0, 300.0));
    let mut engine = CropEngine::default();
    drag(&mut engine, (110.0, 120.0), (160.0, 170.0));

    assert_eq!(
        engine.commit(&vp),
        CropOutcome::Accepted(CropRect {
            left: 10,
            top: 20,
            right: 60,
            bottom: 70,
        })
    );
    assert_eq!(engine.mode(), InputMode::Navigate);
}

#[test]
fn test_crop_accounts_for_zoom_and_pan() {
    let mut vp = ViewportTransform::new(Size::new(200.0, 200.0), Size::new(200.0, 200.0));
    vp.zoom(2.0, None);
    vp.pan(-50.0, 0.0);
    // surface x = 100 - 50 + (ix - 100) * 2
    let mut engine = CropEngine::default();
    drag(&mut engine, (50.0, 100.0), (150.0, 140.0));

    assert_eq!(
        engine.commit(&vp),
        CropOutcome::Accepted(CropRect {
            left: 100,
            top: 100,
            right: 150,
            bottom: 120,
        })
    );
}

#[test]
fn test_reverse_drag_is_normalised() {
    let vp = ViewportTransform::new(Size::new(100.0, 100.0), Size::new(100.0, 100.0));
    let mut engine = CropEngine::default();
    drag(&mut engine, (80.0, 90.0), (20.0, 30.0));

    assert_eq!(
        engine.commit(&vp),
        CropOutcome::Accepted(CropRect {
            left: 20,
            top: 30,
            right: 80,
            bottom: 90,
        })
    );
}

#[test]
fn test_selection_clamped_to_image_bounds() {
    let vp = ViewportTransform::new(Size::new(100.0, 100.0), Size::new(300.0, 300.0));
    let mut engine = CropEngine::default();
    drag(&mut engine, (0.0, 0.0), (170.0, 300.0));

    assert_eq!(
        engine.commit(&vp),
        CropOutcome::Accepted(CropRect {
            left: 0,
            top: 0,
            right: 70,
            bottom: 100,
        })
    );
}

#[test]
fn test_tiny_selection_rejected() {
    let mut vp = ViewportTransform::new(Size::new(100.0, 100.0), Size::new(100.0, 100.0));
    vp.zoom(4.0, None);
    let mut engine = CropEngine::default();
    // 30 surface px at scale 4 is 7.5 image px
    drag(&mut engine, (10.0, 10.0), (40.0, 90.0));

    match engine.commit(&vp) {
        CropOutcome::Rejected { width, height } => {
            assert!(width < 10.0);
            assert!(height >= 10.0);
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(engine.mode(), InputMode::Navigate);
}

#[test]
fn test_commit_without_selection() {
    let vp = ViewportTransform::new(Size::new(100.0, 100.0), Size::new(100.0, 100.0));
    let mut engine = CropEngine::default();
    engine.begin();
    assert_eq!(engine.commit(&vp), CropOutcome::NoSelection);
}

#[test]
fn test_press_ignored_outside_capture() {
    let mut engine = CropEngine::default();
    engine.press(Point::new(1.0, 1.0));
    assert!(engine.selection().is_none());
    assert!(engine.live_rect().is_none());
}

#[test]
fn test_live_rect_and_cancel() {
    let mut engine = CropEngine::default();
    engine.begin();
    engine.press(Point::new(50.0, 10.0));
    engine.drag(Point::new(5.0, 40.0));

    let (tl, br) = engine.live_rect().unwrap();
    assert_eq!(tl, Point::new(5.0, 10.0));
    assert_eq!(br, Point::new(50.0, 40.0));

    engine.cancel();
    assert_eq!(engine.mode(), InputMode::Navigate);
    assert!(engine.selection().is_none());
}

#[test]
fn test_drag_after_release_does_not_move_selection() {
    let mut engine = CropEngine::default();
    drag(&mut engine, (0.0, 0.0), (20.0, 20.0));
    engine.drag(Point::new(90.0, 90.0));
    assert_eq!(engine.selection().unwrap().end, Point::new(20.0, 20.0));
}

// ---------------------------------------------------------------------------
// CropRect / apply_crop
// ---------------------------------------------------------------------------

#[test]
fn test_apply_crop_extracts_region() {
    let img = RgbImage::from_fn(20, 10, |x, y| Rgb([x as u8, y as u8, 0]));
    let img = DynamicImage::ImageRgb8(img);
    let rect = CropRect {
        left: 5,
        top: 2,
        right: 15,
        bottom: 8,
    };

    let cropped = apply_crop(&img, &rect).unwrap();
    assert_eq!(cropped.dimensions(), (10, 6));
    assert_eq!(cropped.to_rgb8().get_pixel(0, 0).0, [5, 2, 0]);
}

#[test]
fn test_crop_rect_validation() {
    let empty = CropRect {
        left: 4,
        top: 4,
        right: 4,
        bottom: 10,
    };
    assert_eq!(empty.validated(10, 10).unwrap_err().kind(), ErrorKind::InvalidInput);

    let outside = CropRect {
        left: 0,
        top: 0,
        right: 11,
        bottom: 10,
    };
    assert!(outside.validated(10, 10).is_err());
}
