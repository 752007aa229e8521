use super::*;
use crate::{
    animation::schedule::Schedule,
    animation::timeline::Timeline,
    foundation::core::{Fps, FrameIndex},
    scene::evaluator::Evaluator,
};

fn mounted(powers: &[f64]) -> (Scene, Composite) {
    let mut scene = Scene::new();
    let comp =
        Composite::mount(&mut scene, None, powers.to_vec(), Vec2::ZERO, Rgba8::WHITE).unwrap();
    (scene, comp)
}

fn delays(step: &Step) -> Vec<f64> {
    let Step::All(steps) = step else {
        panic!("expected a parallel step, got {step:?}");
    };
    steps
        .iter()
        .map(|s| match s {
            Step::Delay { secs, .. } => *secs,
            other => panic!("expected a delay, got {other:?}"),
        })
        .collect()
}

#[test]
fn create_staggers_bars_by_half_a_slot() {
    let (_, mut comp) = mounted(&[2.0, 1.0, 3.0]);
    let step = comp.create(4.0);
    // time = 4 / (1 + 2/2) = 2
    assert_eq!(delays(&step), vec![0.0, 1.0, 2.0]);
    assert_eq!(step.duration_secs(), 4.0);
}

#[test]
fn create_grows_bars_downward_from_the_baseline() {
    let (scene, mut comp) = mounted(&[2.0, 1.0]);
    let mut timeline = Timeline::new();
    timeline.play(comp.create(1.5));
    let schedule = Schedule::build(&timeline, &scene, Fps::new(10, 1).unwrap()).unwrap();
    let out = Evaluator::eval_scene(&scene, &schedule, FrameIndex(15)).unwrap();

    let first = out
        .shapes
        .iter()
        .find(|s| Some(s.handle) == comp.bar(0))
        .unwrap();
    assert_eq!(first.props.height, 160.0);
    assert_eq!(first.props.line_width, 1.0);
    // Top edge sits on the row origin.
    assert_eq!(first.props.position, Vec2::new(-40.0, 80.0));
}

#[test]
fn zero_leading_power_becomes_a_placeholder() {
    let (_, mut comp) = mounted(&[0.0, 1.0, 0.0]);
    let Step::All(steps) = comp.create(1.0) else {
        panic!("create runs in parallel");
    };
    // bar 2 has power 0 and is not the first, so it gets no animation
    assert_eq!(steps.len(), 2);
    let Step::Delay { inner, .. } = &steps[0] else {
        panic!("expected a delay");
    };
    let Step::All(tweens) = inner.as_ref() else {
        panic!("expected parallel tweens");
    };
    let props: Vec<Prop> = tweens
        .iter()
        .map(|t| match t {
            Step::Tween(t) => t.prop,
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(
        props,
        vec![Prop::Height, Prop::Width, Prop::MarginRight, Prop::LineWidth]
    );
}

#[test]
fn change_adds_and_removes_bars() {
    let (mut scene, mut comp) = mounted(&[1.0, 1.0, 1.0]);
    let before = scene.len();
    comp.change(&mut scene, vec![2.0], 1.0).unwrap();
    assert_eq!(comp.powers(), [2.0]);
    assert!(comp.bar(1).is_none());
    assert_eq!(scene.len(), before);

    comp.change(&mut scene, vec![1.0, 2.0, 1.0, 1.0], 1.0).unwrap();
    assert_eq!(comp.powers().len(), 4);
    assert_eq!(scene.len(), before + 3);
    let fresh = comp.bar(3).unwrap();
    assert_eq!(scene.shape(fresh).unwrap().props.width, 0.0);
}

#[test]
fn change_hides_surplus_bars_at_the_end() {
    let (mut scene, mut comp) = mounted(&[1.0, 1.0]);
    let surplus = comp.bar(1).unwrap();
    let mut timeline = Timeline::new();
    timeline.play(comp.change(&mut scene, vec![3.0], 1.0).unwrap());
    let schedule = Schedule::build(&timeline, &scene, Fps::new(10, 1).unwrap()).unwrap();
    let end = schedule.end_frame();
    let base = Value::Flag(true);
    assert_eq!(
        schedule
            .sample(surplus, Prop::Present, &base, FrameIndex(end.0 - 1))
            .unwrap(),
        Value::Flag(true)
    );
    assert_eq!(
        schedule.sample(surplus, Prop::Present, &base, end).unwrap(),
        Value::Flag(false)
    );
}

#[test]
fn shade_runs_serially_and_reset_restores_outlines() {
    let (_, mut comp) = mounted(&[1.0, 0.0, 2.0]);
    comp.create(1.0);
    let red = Rgba8::rgb(200, 0, 0);
    let step = comp.shade(&[red, red], 1.0);
    assert_eq!(step.duration_secs(), 1.0);

    let Step::Chain(steps) = comp.shade(&[], 0.9) else {
        panic!("shade is serial");
    };
    // three fills then the outline restore
    assert_eq!(steps.len(), 4);
    let Step::All(restore) = &steps[3] else {
        panic!("expected outline restore");
    };
    assert_eq!(restore.len(), 2);
}

#[test]
fn hide_and_show_touch_only_the_placeholder() {
    let (_, mut comp) = mounted(&[0.0, 1.0]);
    assert_eq!(comp.hide().duration_secs(), 0.0);
    match comp.show() {
        Step::Set { target, value, .. } => {
            assert_eq!(Some(target), comp.bar(0));
            assert_eq!(value, Value::Scalar(40.0));
        }
        other => panic!("expected a set, got {other:?}"),
    }

    let (_, mut plain) = mounted(&[1.0]);
    assert_eq!(plain.hide(), Step::noop());
    assert_eq!(plain.show(), Step::noop());
}

#[test]
fn destroy_flattens_every_bar() {
    let (_, mut comp) = mounted(&[1.0, 2.0]);
    let Step::All(sets) = comp.destroy() else {
        panic!("destroy is parallel");
    };
    assert_eq!(sets.len(), 4);
}
