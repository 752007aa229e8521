use crate::{
    animation::schedule::Schedule,
    animation::timeline::Timeline,
    composition::model::Composition,
    foundation::core::{Canvas, Fps, FrameIndex, Rgba8},
    foundation::error::SaplingResult,
    scene::model::Scene,
};

/// Collects a scene, a script and output settings into a [`Composition`].
pub struct CompositionBuilder {
    fps: Fps,
    canvas: Canvas,
    background: Rgba8,
    scene: Scene,
    timeline: Timeline,
}

impl CompositionBuilder {
    pub fn new(scene: Scene, timeline: Timeline) -> Self {
        Self {
            fps: Fps::default(),
            canvas: Canvas::default(),
            background: Rgba8::rgb(0x14, 0x14, 0x14),
            scene,
            timeline,
        }
    }

    pub fn fps(mut self, fps: Fps) -> Self {
        self.fps = fps;
        self
    }

    pub fn canvas(mut self, canvas: Canvas) -> Self {
        self.canvas = canvas;
        self
    }

    pub fn background(mut self, background: Rgba8) -> Self {
        self.background = background;
        self
    }

    #[tracing::instrument(skip(self), fields(shapes = self.scene.len()))]
    pub fn build(self) -> SaplingResult<Composition> {
        let schedule = Schedule::build(&self.timeline, &self.scene, self.fps)?;
        let duration = FrameIndex(schedule.end_frame().0 + 1);
        let comp = Composition {
            fps: self.fps,
            canvas: self.canvas,
            background: self.background,
            scene: self.scene,
            schedule,
            duration,
        };
        comp.validate()?;
        Ok(comp)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/dsl.rs"]
mod tests;
