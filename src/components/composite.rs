use crate::{
    animation::timeline::{Step, all, chain, delay, set, tween},
    animation::value::{Prop, Value},
    foundation::core::{Rgba8, Vec2},
    foundation::error::SaplingResult,
    scene::model::{Align, HandleId, RowLayout, Scene, Shape},
};

/// Bar width; one unit of power is this tall.
pub const BAR_WIDTH: f64 = 80.0;
/// Stagger divisor: bar `i` starts `i * time / FACTOR` into the animation.
pub const FACTOR: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Bar {
    rect: HandleId,
}

/// Bar chart of a number's prime-power exponents, one bar per prime.
///
/// Bars hang from a zero-height baseline. A zero exponent on the first prime is drawn as a
/// half-size placeholder so the chart never starts empty.
#[derive(Clone, Debug)]
pub struct Composite {
    row: HandleId,
    color: Rgba8,
    powers: Vec<f64>,
    bars: Vec<Bar>,
    /// Bar heights once every step built so far has played.
    heights: Vec<f64>,
}

fn stagger_time(count: usize, duration: f64) -> f64 {
    let divisor = 1.0 + (count as f64 - 1.0) / FACTOR;
    duration / divisor
}

fn outline(value: f64) -> f64 {
    if value > 0.0 { 1.0 } else { 0.0 }
}

impl Composite {
    pub fn mount(
        scene: &mut Scene,
        parent: Option<HandleId>,
        powers: Vec<f64>,
        position: Vec2,
        color: Rgba8,
    ) -> SaplingResult<Self> {
        let row = scene.add(
            parent,
            Shape::row(RowLayout {
                align: Align::Start,
                fixed_height: Some(0.0),
                ..RowLayout::default()
            })
            .at(position.x, position.y),
        )?;
        let mut comp = Self {
            row,
            color,
            powers: Vec::new(),
            bars: Vec::new(),
            heights: Vec::new(),
        };
        for _ in &powers {
            comp.add_bar(scene, BAR_WIDTH)?;
        }
        comp.powers = powers;
        Ok(comp)
    }

    pub fn row(&self) -> HandleId {
        self.row
    }

    /// Exponents currently shown.
    pub fn powers(&self) -> &[f64] {
        &self.powers
    }

    pub fn bar(&self, index: usize) -> Option<HandleId> {
        self.bars.get(index).map(|b| b.rect)
    }

    fn add_bar(&mut self, scene: &mut Scene, width: f64) -> SaplingResult<Bar> {
        let rect = scene.add(
            Some(self.row),
            Shape::rect(width, 0.0).fill(self.color).stroke(self.color, 0.0),
        )?;
        let bar = Bar { rect };
        self.bars.push(bar);
        self.heights.push(0.0);
        Ok(bar)
    }

    /// Grow every bar to its power, staggered left to right.
    pub fn create(&mut self, duration: f64) -> Step {
        let time = stagger_time(self.powers.len(), duration);
        let mut steps = Vec::new();
        for (i, &power) in self.powers.iter().enumerate() {
            let rect = self.bars[i].rect;
            let start = i as f64 * time / FACTOR;
            if power > 0.0 {
                let height = power * BAR_WIDTH;
                self.heights[i] = height;
                steps.push(delay(
                    start,
                    all([
                        tween(rect, Prop::Height, Value::Scalar(height), time),
                        tween(rect, Prop::LineWidth, Value::Scalar(1.0), time),
                    ]),
                ));
            } else if i == 0 {
                let half = 0.5 * BAR_WIDTH;
                self.heights[i] = half;
                steps.push(delay(
                    start,
                    all([
                        tween(rect, Prop::Height, Value::Scalar(half), time),
                        tween(rect, Prop::Width, Value::Scalar(half), time),
                        tween(rect, Prop::MarginRight, Value::Scalar(half), time),
                        tween(rect, Prop::LineWidth, Value::Scalar(1.0), time),
                    ]),
                ));
            }
        }
        all(steps)
    }

    /// Animate to a new set of powers. New bars grow in from zero width; surplus bars shrink
    /// away from the right and are removed once the animation ends.
    pub fn change(&mut self, scene: &mut Scene, values: Vec<f64>, duration: f64) -> SaplingResult<Step> {
        let old = self.powers.len();
        let time = stagger_time(values.len(), duration);
        let mut steps = Vec::new();
        for (i, &value) in values.iter().enumerate() {
            let fresh = i >= self.bars.len();
            if fresh {
                self.add_bar(scene, 0.0)?;
            }
            let rect = self.bars[i].rect;
            let start = i as f64 * time / FACTOR;
            let mut tweens = Vec::new();
            if i == 0 {
                tweens.push(tween(rect, Prop::Width, Value::Scalar(BAR_WIDTH), time));
                tweens.push(tween(rect, Prop::MarginRight, Value::Scalar(0.0), time));
            }
            tweens.push(tween(rect, Prop::Height, Value::Scalar(value * BAR_WIDTH), time));
            tweens.push(tween(rect, Prop::LineWidth, Value::Scalar(outline(value)), time));
            if fresh {
                tweens.push(tween(rect, Prop::Width, Value::Scalar(BAR_WIDTH), time));
            }
            self.heights[i] = value * BAR_WIDTH;
            steps.push(delay(start, all(tweens)));
        }

        let mut removals = Vec::new();
        for i in (values.len()..old).rev() {
            let rect = self.bars[i].rect;
            let point = (old - i) as f64;
            steps.push(delay(
                point * time / FACTOR,
                all([
                    tween(rect, Prop::Height, Value::Scalar(0.0), time),
                    tween(rect, Prop::Width, Value::Scalar(0.0), time),
                ]),
            ));
            removals.push(set(rect, Prop::Present, Value::Flag(false)));
        }
        self.bars.truncate(values.len());
        self.heights.truncate(values.len());
        self.powers = values;
        Ok(chain([all(steps), all(removals)]))
    }

    /// Fill bars one after another with `colors`; an empty list resets every bar to white.
    pub fn shade(&self, colors: &[Rgba8], duration: f64) -> Step {
        let reset = colors.is_empty();
        let colors: Vec<Rgba8> = if reset {
            vec![Rgba8::WHITE; self.bars.len()]
        } else {
            colors.to_vec()
        };
        let mut steps = Vec::new();
        if !reset {
            steps.push(all(self
                .bars
                .iter()
                .map(|b| set(b.rect, Prop::LineWidth, Value::Scalar(0.0)))));
        }
        let each = duration / colors.len().max(1) as f64;
        for (bar, color) in self.bars.iter().zip(colors) {
            steps.push(tween(bar.rect, Prop::Fill, Value::Color(color), each));
        }
        if reset {
            steps.push(all(self
                .bars
                .iter()
                .zip(&self.heights)
                .filter(|(_, h)| **h > 0.0)
                .map(|(b, _)| set(b.rect, Prop::LineWidth, Value::Scalar(1.0)))));
        }
        chain(steps)
    }

    /// Collapse every bar instantly.
    pub fn destroy(&mut self) -> Step {
        self.heights.iter_mut().for_each(|h| *h = 0.0);
        all(self.bars.iter().flat_map(|b| {
            [
                set(b.rect, Prop::Height, Value::Scalar(0.0)),
                set(b.rect, Prop::LineWidth, Value::Scalar(0.0)),
            ]
        }))
    }

    /// Hide the placeholder bar, if the first power is zero.
    pub fn hide(&mut self) -> Step {
        match self.placeholder() {
            Some(rect) => {
                self.heights[0] = 0.0;
                all([
                    set(rect, Prop::Height, Value::Scalar(0.0)),
                    set(rect, Prop::LineWidth, Value::Scalar(0.0)),
                ])
            }
            None => Step::noop(),
        }
    }

    /// Bring the placeholder bar back after [`Composite::hide`].
    pub fn show(&mut self) -> Step {
        match self.placeholder() {
            Some(rect) => {
                self.heights[0] = 0.5 * BAR_WIDTH;
                set(rect, Prop::Height, Value::Scalar(0.5 * BAR_WIDTH))
            }
            None => Step::noop(),
        }
    }

    fn placeholder(&self) -> Option<HandleId> {
        match self.powers.first() {
            Some(&p) if p == 0.0 => self.bars.first().map(|b| b.rect),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/components/composite.rs"]
mod tests;
