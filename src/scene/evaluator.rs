use crate::{
    animation::schedule::Schedule,
    composition::model::Composition,
    foundation::core::{Affine, FrameIndex},
    foundation::error::{SaplingError, SaplingResult},
    scene::layout::apply_row_layout,
    scene::model::{HandleId, Props, Scene, ShapeKind},
};

#[derive(Clone, Debug, serde::Serialize)]
/// Visible shapes of one frame in painter's order.
pub struct EvaluatedFrame {
    /// Evaluated frame index.
    pub frame: FrameIndex,
    /// Shapes to draw, back to front.
    pub shapes: Vec<EvaluatedShape>,
}

#[derive(Clone, Debug, serde::Serialize)]
/// A shape with its sampled properties and resolved world transform.
pub struct EvaluatedShape {
    /// Source shape handle.
    pub handle: HandleId,
    /// What to draw.
    pub kind: ShapeKind,
    /// Local-to-canvas transform (origin at canvas centre).
    pub transform: Affine,
    /// Accumulated opacity in `[0, 1]`.
    pub opacity: f64,
    /// Sampled, laid-out local properties.
    pub props: Props,
}

/// Stateless evaluator from scene + schedule to drawable shapes.
pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(comp))]
    /// Evaluate one frame of a composition.
    pub fn eval_frame(comp: &Composition, frame: FrameIndex) -> SaplingResult<EvaluatedFrame> {
        if frame.0 >= comp.duration.0 {
            return Err(SaplingError::evaluation(format!(
                "frame {} is out of bounds (duration {})",
                frame.0, comp.duration.0
            )));
        }
        Self::eval_scene(&comp.scene, &comp.schedule, frame)
    }

    /// Evaluate `scene` at `frame` without a duration check.
    pub fn eval_scene(
        scene: &Scene,
        schedule: &Schedule,
        frame: FrameIndex,
    ) -> SaplingResult<EvaluatedFrame> {
        let mut props = sample_props(scene, schedule, frame)?;
        apply_row_layout(scene, &mut props)?;

        let order = scene.tree_order();
        let mut tree_index = vec![0usize; scene.len()];
        for (i, id) in order.iter().enumerate() {
            tree_index[id.0 as usize] = i;
        }

        let mut shapes = Vec::new();
        let mut stack: Vec<(HandleId, Affine, f64)> = scene
            .roots()
            .iter()
            .rev()
            .map(|&r| (r, Affine::IDENTITY, 1.0))
            .collect();
        while let Some((id, parent_xf, parent_opacity)) = stack.pop() {
            let p = &props[id.0 as usize];
            if !p.present {
                continue;
            }
            let transform = parent_xf * p.transform().to_affine();
            let opacity = parent_opacity * p.opacity.clamp(0.0, 1.0);

            let kind = scene.shape(id)?.kind;
            if is_visible(kind, p, transform, opacity) {
                shapes.push(EvaluatedShape {
                    handle: id,
                    kind,
                    transform,
                    opacity,
                    props: p.clone(),
                });
            }
            for &child in scene.children(id)?.iter().rev() {
                stack.push((child, transform, opacity));
            }
        }

        shapes.sort_by_key(|s| {
            let z = scene.shape(s.handle).map(|sh| sh.z).unwrap_or_default();
            (z, tree_index[s.handle.0 as usize])
        });

        Ok(EvaluatedFrame { frame, shapes })
    }
}

fn sample_props(scene: &Scene, schedule: &Schedule, frame: FrameIndex) -> SaplingResult<Vec<Props>> {
    let mut out = Vec::with_capacity(scene.len());
    for i in 0..scene.len() {
        let id = HandleId(
            u32::try_from(i).map_err(|_| SaplingError::evaluation("shape index overflow"))?,
        );
        let mut props = scene.shape(id)?.props.clone();
        for prop in schedule.animated_props(id) {
            let base = props.get(prop);
            let v = schedule.sample(id, prop, &base, frame)?;
            props.set(prop, v)?;
        }
        out.push(props);
    }
    Ok(out)
}

fn is_visible(kind: ShapeKind, p: &Props, transform: Affine, opacity: f64) -> bool {
    if opacity <= 0.0 || transform.determinant().abs() < 1e-12 {
        return false;
    }
    match kind {
        ShapeKind::Group => false,
        ShapeKind::Circle => p.width > 0.0 && (p.fill.a > 0 || has_stroke(p)),
        ShapeKind::Line => {
            p.line_width > 0.0 && p.stroke.a > 0 && p.points[0] != p.points[1]
        }
        ShapeKind::Text => p.font_size > 0.0 && !p.text.is_empty(),
        ShapeKind::Rect | ShapeKind::Row(_) => {
            p.width > 0.0 && p.height > 0.0 && (p.fill.a > 0 || has_stroke(p))
        }
    }
}

fn has_stroke(p: &Props) -> bool {
    p.line_width > 0.0 && p.stroke.a > 0
}

#[cfg(test)]
#[path = "../../tests/unit/scene/evaluator.rs"]
mod tests;
