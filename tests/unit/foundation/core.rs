use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
}

#[test]
fn frame_range_progress_is_clamped() {
    let r = FrameRange::new(FrameIndex(10), FrameIndex(20)).unwrap();
    assert_eq!(r.progress(FrameIndex(0)), 0.0);
    assert_eq!(r.progress(FrameIndex(15)), 0.5);
    assert_eq!(r.progress(FrameIndex(20)), 1.0);

    let empty = FrameRange::new(FrameIndex(4), FrameIndex(4)).unwrap();
    assert_eq!(empty.progress(FrameIndex(4)), 1.0);
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(4)).is_err());
}

#[test]
fn fps_rounds_seconds_to_frames() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_round(0.5), 15);
    assert_eq!(fps.secs_to_frames_round(1.0 / 3.0), 10);
    assert_eq!(fps.frames_to_secs(45), 1.5);
    assert!(Fps::new(30, 0).is_err());
    assert!(Fps::new(0, 1).is_err());
}

#[test]
fn hex_colors_parse_and_print() {
    let c = Rgba8::from_hex("#E13238").unwrap();
    assert_eq!(c, Rgba8::rgb(0xe1, 0x32, 0x38));
    assert_eq!(c.to_hex(), "#e13238");

    let translucent = Rgba8::from_hex("ffffff80").unwrap();
    assert_eq!(translucent.a, 0x80);
    assert_eq!(translucent.to_hex(), "#ffffff80");

    assert!(Rgba8::from_hex("#fff").is_err());
    assert!(Rgba8::from_hex("#gg0000").is_err());
}

#[test]
fn colors_serialize_as_hex_strings() {
    let json = serde_json::to_string(&Rgba8::rgb(32, 32, 32)).unwrap();
    assert_eq!(json, "\"#202020\"");
    let back: Rgba8 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Rgba8::rgb(32, 32, 32));
}

#[test]
fn transform_to_affine_identity_and_translation() {
    let t = Transform2D::default();
    assert_eq!(t.to_affine(), Affine::IDENTITY);

    let t = Transform2D {
        translate: Vec2::new(10.0, -2.5),
        ..Transform2D::default()
    };
    assert_eq!(t.to_affine(), Affine::translate(Vec2::new(10.0, -2.5)));
}

#[test]
fn anchor_is_the_scale_pivot() {
    let t = Transform2D {
        scale: Vec2::new(0.0, 0.0),
        anchor: Vec2::new(0.0, 10.0),
        ..Transform2D::default()
    };
    let p = t.to_affine() * Point::new(5.0, -10.0);
    assert_eq!(p, Point::new(0.0, 10.0));
}
