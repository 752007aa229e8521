use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::{
    composition::model::Composition,
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{SaplingError, SaplingResult},
    render::cpu::CpuRenderer,
    render::{FrameRGBA, RenderBackend},
    scene::evaluator::Evaluator,
};

/// Evaluate and render a single frame.
///
/// Returns a [`FrameRGBA`] containing **premultiplied** RGBA8 pixels.
pub fn render_frame(
    comp: &Composition,
    frame: FrameIndex,
    backend: &mut dyn RenderBackend,
) -> SaplingResult<FrameRGBA> {
    let eval = Evaluator::eval_frame(comp, frame)?;
    backend.render(&eval, comp.canvas, comp.background)
}

#[derive(Clone, Debug)]
pub struct RenderThreading {
    pub parallel: bool,
    pub chunk_size: usize,
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Render `range` (start inclusive, end exclusive). Output order always matches frame order.
pub fn render_frames(
    comp: &Composition,
    range: FrameRange,
    backend: &mut dyn RenderBackend,
    threading: &RenderThreading,
) -> SaplingResult<Vec<FrameRGBA>> {
    check_range(comp, range)?;
    if !threading.parallel {
        return render_chunk_sequential(comp, range, backend);
    }
    let worker = worker_for(backend)?;
    let pool = build_thread_pool(threading.threads)?;
    render_chunk_parallel(comp, range, &worker, &pool)
}

/// Render every frame of `comp` into `out_dir` as `frame_00000.png`, `frame_00001.png`, ...
///
/// A parallel render builds one thread pool and reuses it for every chunk.
#[tracing::instrument(skip(comp, backend, threading))]
pub fn render_to_dir(
    comp: &Composition,
    out_dir: &Path,
    backend: &mut dyn RenderBackend,
    threading: &RenderThreading,
) -> SaplingResult<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir).map_err(|e| {
        SaplingError::render(format!("create output dir '{}': {e}", out_dir.display()))
    })?;
    tracing::info!(
        frames = comp.duration.0,
        parallel = threading.parallel,
        "rendering frames"
    );

    let mut maybe_parallel = None;
    if threading.parallel {
        maybe_parallel = Some((worker_for(backend)?, build_thread_pool(threading.threads)?));
    }

    let chunk = normalized_chunk_size(threading.chunk_size);
    let mut written = Vec::with_capacity(comp.duration.0 as usize);
    let mut start = 0;
    while start < comp.duration.0 {
        let end = (start + chunk).min(comp.duration.0);
        let range = FrameRange::new(FrameIndex(start), FrameIndex(end))?;
        let frames = match &maybe_parallel {
            Some((worker, pool)) => render_chunk_parallel(comp, range, worker, pool)?,
            None => render_chunk_sequential(comp, range, backend)?,
        };
        for (offset, frame) in frames.iter().enumerate() {
            let path = out_dir.join(format!("frame_{:05}.png", start + offset as u64));
            write_png(&path, frame)?;
            written.push(path);
        }
        tracing::debug!(start, end, "chunk written");
        start = end;
    }
    Ok(written)
}

fn render_chunk_sequential(
    comp: &Composition,
    range: FrameRange,
    backend: &mut dyn RenderBackend,
) -> SaplingResult<Vec<FrameRGBA>> {
    (range.start.0..range.end.0)
        .map(|f| render_frame(comp, FrameIndex(f), &mut *backend))
        .collect()
}

fn render_chunk_parallel(
    comp: &Composition,
    range: FrameRange,
    worker: &CpuRenderer,
    pool: &rayon::ThreadPool,
) -> SaplingResult<Vec<FrameRGBA>> {
    pool.install(|| {
        (range.start.0..range.end.0)
            .into_par_iter()
            .map_init(
                || worker.clone(),
                |w, f| render_frame(comp, FrameIndex(f), w),
            )
            .collect()
    })
}

fn worker_for(backend: &dyn RenderBackend) -> SaplingResult<CpuRenderer> {
    backend.worker().ok_or_else(|| {
        SaplingError::render("parallel render requires a backend with worker support")
    })
}

/// Write a frame as PNG, converting to straight alpha first.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> SaplingResult<()> {
    let data = frame.to_straight_rgba8();
    image::save_buffer_with_format(
        path,
        &data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| SaplingError::render(format!("write png '{}': {e}", path.display())))
}

fn check_range(comp: &Composition, range: FrameRange) -> SaplingResult<()> {
    if range.is_empty() {
        return Err(SaplingError::validation("render range must be non-empty"));
    }
    if range.end.0 > comp.duration.0 {
        return Err(SaplingError::validation(
            "render range must be within composition duration",
        ));
    }
    Ok(())
}

fn build_thread_pool(threads: Option<usize>) -> SaplingResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SaplingError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SaplingError::render(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 { 1 } else { chunk_size as u64 }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
