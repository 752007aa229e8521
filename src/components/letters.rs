use crate::{
    animation::ease::Ease,
    animation::timeline::{Step, all, delay, set, tween},
    animation::value::{Prop, Value},
    foundation::core::{Rgba8, Vec2},
    foundation::error::SaplingResult,
    scene::model::{HandleId, Scene, Shape},
};

/// Share of the total time each letter spends scaling.
const INTERVAL_SHARE: f64 = 0.5;
/// Horizontal advance of a monospace glyph, in font sizes.
pub const ADVANCE: f64 = 0.6;

/// Text split into one shape per character so letters can pop in one by one.
#[derive(Clone, Debug)]
pub struct Letters {
    group: HandleId,
    text: String,
    letters: Vec<HandleId>,
}

impl Letters {
    pub fn mount(scene: &mut Scene, parent: Option<HandleId>, position: Vec2) -> SaplingResult<Self> {
        let group = scene.add(parent, Shape::group().at(position.x, position.y))?;
        Ok(Self {
            group,
            text: String::new(),
            letters: Vec::new(),
        })
    }

    pub fn group(&self) -> HandleId {
        self.group
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn letters(&self) -> &[HandleId] {
        &self.letters
    }

    /// Replace the text. New letters start at scale 0, anchored at their bottom centre; the
    /// returned step removes the previous letters.
    pub fn edit(
        &mut self,
        scene: &mut Scene,
        text: impl Into<String>,
        font_size: f64,
        fill: Rgba8,
    ) -> SaplingResult<Step> {
        let text = text.into();
        let clear = all(self
            .letters
            .iter()
            .map(|&h| set(h, Prop::Present, Value::Flag(false))));

        let advance = ADVANCE * font_size;
        let width = advance * text.chars().count() as f64;
        let mut letters = Vec::with_capacity(text.len());
        for (i, ch) in text.chars().enumerate() {
            let x = (i as f64 + 0.5) * advance - width / 2.0;
            let handle = scene.add(
                Some(self.group),
                Shape::text(ch.to_string(), font_size)
                    .fill(fill)
                    .at(x, 0.0)
                    .anchor(0.0, font_size / 2.0)
                    .scale(0.0),
            )?;
            letters.push(handle);
        }
        self.text = text;
        self.letters = letters;
        Ok(clear)
    }

    pub fn show(&self, time: f64) -> Step {
        self.scale_all(1.0, time)
    }

    pub fn hide(&self, time: f64) -> Step {
        self.scale_all(0.0, time)
    }

    fn scale_all(&self, to: f64, time: f64) -> Step {
        let interval = time * INTERVAL_SHARE;
        let n = self.letters.len();
        let lag = if n > 1 {
            (time - interval) / (n - 1) as f64
        } else {
            0.0
        };
        all(self.letters.iter().enumerate().map(|(i, &h)| {
            let offset = Ease::OutCubic.apply(i as f64 / n as f64) * i as f64 * lag;
            delay(offset, tween(h, Prop::Scale, Value::Vec2(Vec2::new(to, to)), interval))
        }))
    }

    /// Handles of the letters forming the first occurrence of `value`.
    pub fn select(&self, value: &str) -> Option<&[HandleId]> {
        let byte_start = self.text.find(value)?;
        let start = self.text[..byte_start].chars().count();
        self.letters.get(start..start + value.chars().count())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/components/letters.rs"]
mod tests;
