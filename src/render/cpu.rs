use std::{path::Path, sync::Arc};

use crate::{
    foundation::core::{Canvas, Rgba8},
    foundation::error::{SaplingError, SaplingResult},
    render::svg::frame_to_svg,
    render::{FrameRGBA, RenderBackend},
    scene::evaluator::EvaluatedFrame,
};

/// Rasterizes frames by round-tripping through SVG: `usvg` parses, `resvg` paints.
#[derive(Clone)]
pub struct CpuRenderer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl CpuRenderer {
    /// Renderer using system fonts plus any font files found in `font_dir`.
    pub fn new(font_dir: Option<&Path>) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        if let Some(dir) = font_dir {
            db.load_fonts_dir(dir);
        }
        tracing::debug!(faces = db.len(), "font database loaded");
        Self { fontdb: Arc::new(db) }
    }

    /// Number of font faces available to text shapes.
    pub fn font_faces(&self) -> usize {
        self.fontdb.len()
    }

    pub fn rasterize_svg(&self, svg: &str, width: u32, height: u32) -> SaplingResult<FrameRGBA> {
        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(svg, &opts)
            .map_err(|e| SaplingError::render(format!("parse frame svg: {e}")))?;
        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| SaplingError::render("failed to allocate frame pixmap"))?;
        resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap.as_mut());
        Ok(FrameRGBA {
            width,
            height,
            data: pixmap.take(),
            premultiplied: true,
        })
    }
}

impl std::fmt::Debug for CpuRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuRenderer")
            .field("font_faces", &self.fontdb.len())
            .finish()
    }
}

impl RenderBackend for CpuRenderer {
    fn render(
        &mut self,
        frame: &EvaluatedFrame,
        canvas: Canvas,
        background: Rgba8,
    ) -> SaplingResult<FrameRGBA> {
        let svg = frame_to_svg(frame, canvas, background);
        self.rasterize_svg(&svg, canvas.width, canvas.height)
    }

    fn worker(&self) -> Option<CpuRenderer> {
        Some(self.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
