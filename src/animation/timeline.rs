use crate::{
    animation::ease::Ease,
    animation::value::{Prop, Value},
    scene::model::HandleId,
};

/// One property tween on one shape.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TweenStep {
    pub target: HandleId,
    pub prop: Prop,
    pub to: Value,
    pub secs: f64,
    pub ease: Ease,
}

/// A resumable unit of animation, composed declaratively.
///
/// `All` runs its children from the same start and finishes with the longest one;
/// `Chain` runs them one after another.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Tween(TweenStep),
    /// Zero-length assignment.
    Set {
        target: HandleId,
        prop: Prop,
        value: Value,
    },
    Wait(f64),
    Delay {
        secs: f64,
        inner: Box<Step>,
    },
    All(Vec<Step>),
    Chain(Vec<Step>),
}

impl Step {
    /// Total wall time of the step in seconds.
    pub fn duration_secs(&self) -> f64 {
        match self {
            Self::Tween(t) => t.secs,
            Self::Set { .. } => 0.0,
            Self::Wait(secs) => *secs,
            Self::Delay { secs, inner } => secs + inner.duration_secs(),
            Self::All(steps) => steps
                .iter()
                .map(Step::duration_secs)
                .fold(0.0, f64::max),
            Self::Chain(steps) => steps.iter().map(Step::duration_secs).sum(),
        }
    }

    /// An empty step that completes immediately.
    pub fn noop() -> Self {
        Self::Chain(Vec::new())
    }
}

pub fn tween(target: HandleId, prop: Prop, to: Value, secs: f64) -> Step {
    tween_eased(target, prop, to, secs, Ease::default())
}

pub fn tween_eased(target: HandleId, prop: Prop, to: Value, secs: f64, ease: Ease) -> Step {
    Step::Tween(TweenStep {
        target,
        prop,
        to,
        secs,
        ease,
    })
}

pub fn set(target: HandleId, prop: Prop, value: Value) -> Step {
    Step::Set {
        target,
        prop,
        value,
    }
}

pub fn wait(secs: f64) -> Step {
    Step::Wait(secs)
}

pub fn delay(secs: f64, inner: Step) -> Step {
    Step::Delay {
        secs,
        inner: Box::new(inner),
    }
}

pub fn all(steps: impl IntoIterator<Item = Step>) -> Step {
    Step::All(steps.into_iter().collect())
}

pub fn chain(steps: impl IntoIterator<Item = Step>) -> Step {
    Step::Chain(steps.into_iter().collect())
}

/// Start each step `every` seconds after the previous one, all in parallel.
pub fn stagger(every: f64, steps: impl IntoIterator<Item = Step>) -> Step {
    all(steps
        .into_iter()
        .enumerate()
        .map(|(i, step)| delay(every * i as f64, step)))
}

/// Top-level script: steps played one after another.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    steps: Vec<Step>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step after everything played so far.
    pub fn play(&mut self, step: Step) -> &mut Self {
        self.steps.push(step);
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn duration_secs(&self) -> f64 {
        self.steps.iter().map(Step::duration_secs).sum()
    }

    pub(crate) fn into_step(self) -> Step {
        Step::Chain(self.steps)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
