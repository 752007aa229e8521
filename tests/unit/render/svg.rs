use super::*;
use crate::{
    foundation::core::{Affine, FrameIndex, Point},
    scene::model::{HandleId, Props, Shape},
};

fn shape(s: Shape, transform: Affine, opacity: f64) -> EvaluatedShape {
    EvaluatedShape {
        handle: HandleId(0),
        kind: s.kind,
        transform,
        opacity,
        props: s.props,
    }
}

fn frame(shapes: Vec<EvaluatedShape>) -> EvaluatedFrame {
    EvaluatedFrame {
        frame: FrameIndex(0),
        shapes,
    }
}

const CANVAS: Canvas = Canvas {
    width: 200,
    height: 100,
};

#[test]
fn document_is_centred_on_the_canvas() {
    let svg = frame_to_svg(&frame(vec![]), CANVAS, Rgba8::BLACK);
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100""#));
    assert!(svg.contains(r##"<rect width="200" height="100" fill="#000000"/>"##));
    assert!(svg.contains(r#"<g transform="translate(100 50)">"#));
    assert!(svg.ends_with("</g></svg>"));
}

#[test]
fn transparent_background_is_omitted() {
    let svg = frame_to_svg(&frame(vec![]), CANVAS, Rgba8::TRANSPARENT);
    assert!(!svg.contains("<rect"));
}

#[test]
fn shapes_carry_matrix_and_opacity() {
    let circle = shape(
        Shape::circle(64.0).fill(Rgba8::rgb(255, 0, 0)),
        Affine::translate((10.0, 20.0)),
        0.5,
    );
    let svg = frame_to_svg(&frame(vec![circle]), CANVAS, Rgba8::TRANSPARENT);
    assert!(svg.contains(r#"<g transform="matrix(1 0 0 1 10 20)" opacity="0.5">"#));
    assert!(svg.contains(r##"<circle r="32" fill="#ff0000"/>"##));
}

#[test]
fn lines_use_round_caps() {
    let line = shape(
        Shape::line(Point::new(0.0, 0.0), Point::new(30.0, 40.0), 8.0).stroke(Rgba8::WHITE, 8.0),
        Affine::IDENTITY,
        1.0,
    );
    let svg = frame_to_svg(&frame(vec![line]), CANVAS, Rgba8::TRANSPARENT);
    assert!(svg.contains(r##"<line x1="0" y1="0" x2="30" y2="40" fill="none" stroke="#ffffff" stroke-width="8" stroke-linecap="round"/>"##));
    assert!(!svg.contains("opacity="));
}

#[test]
fn rect_radius_is_clamped_and_translucent_fill_split() {
    let rect = shape(
        Shape::rect(20.0, 10.0).radius(12.0).fill(Rgba8 {
            r: 0x20,
            g: 0x20,
            b: 0x20,
            a: 51,
        }),
        Affine::IDENTITY,
        1.0,
    );
    let svg = frame_to_svg(&frame(vec![rect]), CANVAS, Rgba8::TRANSPARENT);
    assert!(svg.contains(r##"<rect x="-10" y="-5" width="20" height="10" rx="5" fill="#202020" fill-opacity="0.2"/>"##));
}

#[test]
fn text_is_escaped_and_centred() {
    let mut props = Props::default();
    props.text = "a<b & \"c\"".into();
    props.font_size = 32.0;
    let text = EvaluatedShape {
        handle: HandleId(1),
        kind: ShapeKind::Text,
        transform: Affine::IDENTITY,
        opacity: 1.0,
        props,
    };
    let svg = frame_to_svg(&frame(vec![text]), CANVAS, Rgba8::TRANSPARENT);
    assert!(svg.contains("a&lt;b &amp; &quot;c&quot;</text>"));
    assert!(svg.contains(r#"font-size="32" text-anchor="middle" dominant-baseline="central""#));
    assert!(svg.contains(FONT_FAMILY));
}

#[test]
fn every_shape_kind_yields_a_parseable_document() {
    let shapes = vec![
        shape(Shape::circle(20.0), Affine::IDENTITY, 1.0),
        shape(
            Shape::line(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 2.0)
                .stroke(Rgba8::WHITE, 2.0),
            Affine::IDENTITY,
            1.0,
        ),
        shape(Shape::rect(10.0, 10.0).radius(3.0), Affine::IDENTITY, 0.25),
        shape(Shape::text("<&>", 12.0), Affine::scale(2.0), 1.0),
    ];
    let svg = frame_to_svg(&frame(shapes), CANVAS, Rgba8::rgb(0x14, 0x14, 0x14));
    // one wrapper per shape plus the centring group
    assert_eq!(svg.matches("<g ").count(), 5);
    assert_eq!(svg.matches("</g>").count(), 5);
    assert!(svg.contains("&lt;&amp;&gt;"));
    let tree = usvg::Tree::from_str(&svg, &usvg::Options::default()).unwrap();
    assert_eq!(tree.size().width(), 200.0);
}
