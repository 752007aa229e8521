use super::*;

#[test]
fn scalars_and_colors_interpolate() {
    let v = Value::Scalar(0.0).lerp_to(&Value::Scalar(10.0), 0.25).unwrap();
    assert_eq!(v, Value::Scalar(2.5));

    let c = Value::Color(Rgba8::BLACK)
        .lerp_to(&Value::Color(Rgba8::WHITE), 0.5)
        .unwrap();
    assert_eq!(c, Value::Color(Rgba8::rgb(128, 128, 128)));
}

#[test]
fn vectors_interpolate_through_the_trait() {
    let v = Value::Vec2(Vec2::new(0.0, 1.0))
        .lerp_to(&Value::Vec2(Vec2::new(4.0, 3.0)), 0.5)
        .unwrap();
    assert_eq!(v, Value::Vec2(Vec2::new(2.0, 2.0)));
    assert_eq!(
        <Point as Lerp>::lerp(&Point::new(1.0, 1.0), &Point::new(3.0, -1.0), 0.25),
        Point::new(1.5, 0.5)
    );
}

#[test]
fn segments_interpolate_both_endpoints() {
    let from = Value::Segment([Point::new(0.0, 0.0), Point::new(0.0, 0.0)]);
    let to = Value::Segment([Point::new(0.0, 0.0), Point::new(-400.0, 128.0)]);
    let mid = from.lerp_to(&to, 0.5).unwrap();
    assert_eq!(
        mid,
        Value::Segment([Point::new(0.0, 0.0), Point::new(-200.0, 64.0)])
    );
}

#[test]
fn text_and_flags_hold_until_complete() {
    let a = Value::Text("1".to_string());
    let b = Value::Text("2".to_string());
    assert_eq!(a.lerp_to(&b, 0.99).unwrap(), a);
    assert_eq!(a.lerp_to(&b, 1.0).unwrap(), b);

    let on = Value::Flag(true);
    assert_eq!(on.lerp_to(&Value::Flag(false), 0.5).unwrap(), on);
}

#[test]
fn mismatched_kinds_are_rejected() {
    let err = Value::Scalar(1.0)
        .lerp_to(&Value::Flag(true), 0.5)
        .unwrap_err();
    assert!(err.to_string().contains("cannot interpolate scalar toward flag"));
}

#[test]
fn props_check_value_kinds() {
    assert!(Prop::Fill.check(&Value::Color(Rgba8::WHITE)).is_ok());
    assert!(Prop::Fill.check(&Value::Scalar(1.0)).is_err());
    assert!(Prop::Present.check(&Value::Flag(false)).is_ok());
    assert!(Prop::Scale.check(&Value::Vec2(Vec2::new(1.0, 1.0))).is_ok());
}
