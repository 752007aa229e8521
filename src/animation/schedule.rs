use std::collections::BTreeMap;

use crate::{
    animation::ease::Ease,
    animation::timeline::{Step, Timeline},
    animation::value::{Prop, Value},
    foundation::core::{Fps, FrameIndex, FrameRange},
    foundation::error::{SaplingError, SaplingResult},
    scene::model::{HandleId, Scene},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A tween placed on the frame timeline with its start value resolved.
pub struct ScheduledTween {
    /// Position in script order; breaks ties between tweens starting on the same frame.
    pub seq: u32,
    pub target: HandleId,
    pub prop: Prop,
    /// Frames over which the tween runs; empty for instantaneous sets.
    pub range: FrameRange,
    /// Property value when the tween starts.
    pub from: Value,
    pub to: Value,
    pub ease: Ease,
}

impl ScheduledTween {
    fn value_at(&self, frame: FrameIndex) -> SaplingResult<Value> {
        let p = self.range.progress(frame);
        if p >= 1.0 {
            return Ok(self.to.clone());
        }
        self.from.lerp_to(&self.to, self.ease.apply(p))
    }
}

#[derive(Clone, Debug, serde::Serialize)]
/// Flat, frame-resolved form of a [`Timeline`].
pub struct Schedule {
    fps: Fps,
    end: FrameIndex,
    tweens: Vec<ScheduledTween>,
    #[serde(skip)]
    by_key: BTreeMap<(HandleId, Prop), Vec<usize>>,
}

struct FlatTween {
    seq: u32,
    target: HandleId,
    prop: Prop,
    start_secs: f64,
    end_secs: f64,
    to: Value,
    ease: Ease,
}

impl Schedule {
    #[tracing::instrument(skip(timeline, scene))]
    pub fn build(timeline: &Timeline, scene: &Scene, fps: Fps) -> SaplingResult<Self> {
        let root = timeline.clone().into_step();
        let mut flat = Vec::new();
        let end_secs = flatten(&root, 0.0, &mut flat)?;

        let mut tweens = Vec::with_capacity(flat.len());
        for f in flat {
            f.prop.check(&f.to)?;
            // Resolve the shape now so unknown handles fail at build time.
            scene.shape(f.target)?;
            let range = FrameRange::new(
                FrameIndex(fps.secs_to_frames_round(f.start_secs)),
                FrameIndex(fps.secs_to_frames_round(f.end_secs)),
            )?;
            tweens.push(ScheduledTween {
                seq: f.seq,
                target: f.target,
                prop: f.prop,
                range,
                from: f.to.clone(),
                to: f.to,
                ease: f.ease,
            });
        }
        tweens.sort_by_key(|t| (t.range.start, t.seq));

        let mut by_key: BTreeMap<(HandleId, Prop), Vec<usize>> = BTreeMap::new();
        for idx in 0..tweens.len() {
            let key = (tweens[idx].target, tweens[idx].prop);
            let base = scene.shape(key.0)?.props.get(key.1);
            let prior = by_key.entry(key).or_default();
            let from = fold(&tweens, prior, base, tweens[idx].range.start)?;
            tweens[idx].from = from;
            prior.push(idx);
        }

        let end = FrameIndex(fps.secs_to_frames_round(end_secs));
        tracing::debug!(tweens = tweens.len(), end_frame = end.0, "schedule built");
        Ok(Self {
            fps,
            end,
            tweens,
            by_key,
        })
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Frame at which the last step completes.
    pub fn end_frame(&self) -> FrameIndex {
        self.end
    }

    pub fn tweens(&self) -> &[ScheduledTween] {
        &self.tweens
    }

    /// Value of `prop` on `target` at `frame`, starting from `base`.
    pub fn sample(
        &self,
        target: HandleId,
        prop: Prop,
        base: &Value,
        frame: FrameIndex,
    ) -> SaplingResult<Value> {
        match self.by_key.get(&(target, prop)) {
            Some(indices) => fold(&self.tweens, indices, base.clone(), frame),
            None => Ok(base.clone()),
        }
    }

    /// Properties of `target` that have at least one tween.
    pub fn animated_props(&self, target: HandleId) -> impl Iterator<Item = Prop> + '_ {
        self.by_key
            .range((target, Prop::Position)..=(target, Prop::Present))
            .map(|((_, prop), _)| *prop)
    }
}

fn fold(
    tweens: &[ScheduledTween],
    indices: &[usize],
    base: Value,
    frame: FrameIndex,
) -> SaplingResult<Value> {
    let mut value = base;
    for &i in indices {
        let tw = &tweens[i];
        if tw.range.start > frame {
            break;
        }
        value = tw.value_at(frame)?;
    }
    Ok(value)
}

fn check_secs(secs: f64, what: &str) -> SaplingResult<()> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(SaplingError::animation(format!(
            "{what} duration must be finite and >= 0, got {secs}"
        )));
    }
    Ok(())
}

fn push_flat(
    out: &mut Vec<FlatTween>,
    start: f64,
    target: HandleId,
    prop: Prop,
    to: &Value,
    secs: f64,
    ease: Ease,
) -> SaplingResult<f64> {
    let seq = u32::try_from(out.len())
        .map_err(|_| SaplingError::animation("too many tweens in timeline"))?;
    out.push(FlatTween {
        seq,
        target,
        prop,
        start_secs: start,
        end_secs: start + secs,
        to: to.clone(),
        ease,
    });
    Ok(start + secs)
}

fn flatten(step: &Step, start: f64, out: &mut Vec<FlatTween>) -> SaplingResult<f64> {
    match step {
        Step::Tween(t) => {
            check_secs(t.secs, "tween")?;
            push_flat(out, start, t.target, t.prop, &t.to, t.secs, t.ease)
        }
        Step::Set {
            target,
            prop,
            value,
        } => push_flat(out, start, *target, *prop, value, 0.0, Ease::Linear),
        Step::Wait(secs) => {
            check_secs(*secs, "wait")?;
            Ok(start + secs)
        }
        Step::Delay { secs, inner } => {
            check_secs(*secs, "delay")?;
            flatten(inner, start + secs, out)
        }
        Step::All(steps) => {
            let mut end = start;
            for s in steps {
                end = end.max(flatten(s, start, out)?);
            }
            Ok(end)
        }
        Step::Chain(steps) => {
            let mut cursor = start;
            for s in steps {
                cursor = flatten(s, cursor, out)?;
            }
            Ok(cursor)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/schedule.rs"]
mod tests;
