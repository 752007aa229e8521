use super::*;
use crate::{
    animation::schedule::Schedule,
    animation::timeline::Timeline,
    foundation::core::{Fps, FrameIndex},
    scene::evaluator::Evaluator,
};

fn mounted(values: &[&str]) -> (Scene, List) {
    let mut scene = Scene::new();
    let list = List::mount(
        &mut scene,
        None,
        values.iter().map(|v| v.to_string()).collect(),
        Vec2::ZERO,
        ListStyle {
            background: Rgba8::rgb(0x30, 0x30, 0x30),
            ..ListStyle::default()
        },
    )
    .unwrap();
    (scene, list)
}

fn row_width_at(scene: &Scene, timeline: &Timeline, list: &List, frame: u64) -> f64 {
    let schedule = Schedule::build(timeline, scene, Fps::new(10, 1).unwrap()).unwrap();
    let out = Evaluator::eval_scene(scene, &schedule, FrameIndex(frame)).unwrap();
    out.shapes
        .iter()
        .find(|s| s.handle == list.row())
        .map(|s| s.props.width)
        .unwrap()
}

#[test]
fn mount_lays_out_initial_cells() {
    let (scene, list) = mounted(&["1", "2", "3"]);
    assert_eq!(list.values(), ["1", "2", "3"]);
    let (rect, text) = list.cell(1).unwrap();
    assert_eq!(scene.shape(rect).unwrap().props.width, CELL_SIZE);
    assert_eq!(scene.shape(text).unwrap().props.text, "2");
    // 12 + 3 * 128 + 2 * 12 + 12
    assert_eq!(
        row_width_at(&scene, &Timeline::new(), &list, 0),
        3.0 * CELL_SIZE + 4.0 * SPACING
    );
}

#[test]
fn push_grows_a_new_cell_after_padding_bump() {
    let (mut scene, mut list) = mounted(&["a"]);
    let step = list.push(&mut scene, "b", 2.0).unwrap();
    assert_eq!(step.duration_secs(), 2.0);
    assert_eq!(list.values(), ["a", "b"]);

    let (rect, _) = list.cell(1).unwrap();
    assert!(!scene.shape(rect).unwrap().props.present);

    let mut timeline = Timeline::new();
    timeline.play(step);
    let before = row_width_at(&scene, &timeline, &list, 0);
    assert_eq!(before, CELL_SIZE + 2.0 * SPACING);
    let after = row_width_at(&scene, &timeline, &list, 20);
    assert_eq!(after, 2.0 * CELL_SIZE + 3.0 * SPACING);
}

#[test]
fn pop_removes_the_last_value() {
    let (_, mut list) = mounted(&["a", "b"]);
    let step = list.pop(1.0).unwrap();
    assert_eq!(step.duration_secs(), 1.0);
    assert_eq!(list.values(), ["a"]);
    list.pop(1.0).unwrap();
    assert!(list.is_empty());
    assert!(list.pop(1.0).is_err());
}

#[test]
fn place_keeps_scene_order_consistent() {
    let (mut scene, mut list) = mounted(&["a", "c"]);
    list.place(&mut scene, "b", 1, 1.0).unwrap();
    assert_eq!(list.values(), ["a", "b", "c"]);
    let rects: Vec<HandleId> = (0..3).map(|i| list.cell(i).unwrap().0).collect();
    assert_eq!(scene.children(list.row()).unwrap(), rects.as_slice());

    list.place(&mut scene, "d", 3, 1.0).unwrap();
    assert_eq!(list.values(), ["a", "b", "c", "d"]);
    assert!(list.place(&mut scene, "x", 9, 1.0).is_err());
}

#[test]
fn delete_hides_the_cell_after_shrinking() {
    let (scene, mut list) = mounted(&["a", "b", "c"]);
    let (gone, _) = list.cell(1).unwrap();
    let mut timeline = Timeline::new();
    timeline.play(list.delete(1, 2.0).unwrap());
    assert_eq!(list.values(), ["a", "c"]);

    let schedule = Schedule::build(&timeline, &scene, Fps::new(10, 1).unwrap()).unwrap();
    let end = Evaluator::eval_scene(&scene, &schedule, FrameIndex(20)).unwrap();
    assert!(end.shapes.iter().all(|s| s.handle != gone));
    assert_eq!(
        row_width_at(&scene, &timeline, &list, 20),
        2.0 * CELL_SIZE + 3.0 * SPACING
    );
}

#[test]
fn delete_last_behaves_like_pop() {
    let (_, mut list) = mounted(&["a", "b"]);
    let step = list.delete(1, 1.0).unwrap();
    assert_eq!(step.duration_secs(), 1.0);
    assert_eq!(list.values(), ["a"]);
    assert!(list.delete(5, 1.0).is_err());
}

#[test]
fn set_swaps_text_halfway() {
    let (scene, mut list) = mounted(&["a"]);
    let mut timeline = Timeline::new();
    timeline.play(list.set("z", 0, 2.0).unwrap());
    assert_eq!(list.values(), ["z"]);

    let schedule = Schedule::build(&timeline, &scene, Fps::new(10, 1).unwrap()).unwrap();
    let (_, text) = list.cell(0).unwrap();
    let base = scene.shape(text).unwrap().props.get(Prop::Text);
    let early = schedule.sample(text, Prop::Text, &base, FrameIndex(5)).unwrap();
    let late = schedule.sample(text, Prop::Text, &base, FrameIndex(15)).unwrap();
    assert_eq!(early, Value::Text("a".into()));
    assert_eq!(late, Value::Text("z".into()));
}

#[test]
fn highlight_dims_others_and_unhighlight_restores() {
    let (_, list) = mounted(&["a", "b", "c"]);
    let Step::All(steps) = list.highlight(1, 1.0).unwrap() else {
        panic!("highlight should run in parallel");
    };
    let props: Vec<Prop> = steps
        .iter()
        .map(|s| match s {
            Step::Tween(t) => t.prop,
            other => panic!("unexpected step {other:?}"),
        })
        .collect();
    assert_eq!(props, vec![Prop::Opacity, Prop::LineWidth, Prop::Opacity]);
    assert!(list.highlight(3, 1.0).is_err());

    let Step::All(steps) = list.unhighlight(1.0) else {
        panic!("unhighlight should run in parallel");
    };
    assert_eq!(steps.len(), 6);
}

#[test]
fn turn_rotates_every_text() {
    let (_, list) = mounted(&["a", "b"]);
    let Step::All(steps) = list.turn(90.0, 1.0) else {
        panic!("turn should run in parallel");
    };
    assert_eq!(steps.len(), 2);
    assert_eq!(list.turn(90.0, 1.0).duration_secs(), 1.0);
}
