pub(crate) mod cpu;
pub(crate) mod pipeline;
pub(crate) mod svg;

use crate::{
    foundation::core::{Canvas, Rgba8},
    foundation::error::SaplingResult,
    scene::evaluator::EvaluatedFrame,
};

/// Rendered pixels, row-major RGBA8.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Copy of the pixels with straight (non-premultiplied) alpha, as PNG expects.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 {
                px[0] = 0;
                px[1] = 0;
                px[2] = 0;
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// Turns evaluated frames into pixels.
pub trait RenderBackend {
    fn render(
        &mut self,
        frame: &EvaluatedFrame,
        canvas: Canvas,
        background: Rgba8,
    ) -> SaplingResult<FrameRGBA>;

    /// A fresh renderer for a worker thread, if this backend supports parallel rendering.
    fn worker(&self) -> Option<cpu::CpuRenderer> {
        None
    }
}
