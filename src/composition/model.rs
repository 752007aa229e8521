use crate::{
    animation::schedule::Schedule,
    foundation::core::{Canvas, Fps, FrameIndex, Rgba8},
    foundation::error::{SaplingError, SaplingResult},
    scene::model::Scene,
};

/// A fully scheduled scene, ready to be evaluated frame by frame.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Composition {
    pub fps: Fps,
    pub canvas: Canvas,
    pub background: Rgba8,
    pub scene: Scene,
    pub schedule: Schedule,
    /// Total frames, including one hold frame after the last step ends.
    pub duration: FrameIndex,
}

impl Composition {
    pub fn validate(&self) -> SaplingResult<()> {
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(SaplingError::validation("fps must have num>0 and den>0"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(SaplingError::validation("canvas width/height must be > 0"));
        }
        if self.duration.0 == 0 {
            return Err(SaplingError::validation("duration must be > 0 frames"));
        }
        if self.schedule.end_frame().0 >= self.duration.0 {
            return Err(SaplingError::validation(
                "schedule runs past the composition duration",
            ));
        }
        if self.schedule.fps() != self.fps {
            return Err(SaplingError::validation(
                "schedule fps does not match composition fps",
            ));
        }
        Ok(())
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.fps.frames_to_secs(self.duration.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
