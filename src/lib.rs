//! Sapling builds animated teaching scenes (binary search trees, lists, prime-power bar charts,
//! letter-by-letter titles) and renders them to SVG or PNG frames.
//!
//! # Pipeline overview
//!
//! 1. **Mount**: components add their shapes to a retained [`Scene`], all hidden up front.
//! 2. **Script**: component operations return [`Step`]s, composed with [`all`] / [`chain`] into
//!    a [`Timeline`].
//! 3. **Schedule**: [`CompositionBuilder::build`] flattens the timeline into frame-ranged tweens.
//! 4. **Evaluate**: `Composition + FrameIndex -> EvaluatedFrame` (sampled props, row layout,
//!    world transforms, painter's order).
//! 5. **Render**: [`frame_to_svg`] for vector output, [`CpuRenderer`] for pixels.
//!
//! Scenes can also be described in JSON and compiled with [`SceneFile`].
#![forbid(unsafe_code)]

mod animation;
mod components;
mod composition;
mod foundation;
mod render;
mod scene;

pub use animation::ease::Ease;
pub use animation::schedule::{Schedule, ScheduledTween};
pub use animation::timeline::{
    Step, Timeline, TweenStep, all, chain, delay, set, stagger, tween, tween_eased, wait,
};
pub use animation::value::{Lerp, Prop, Value};
pub use components::binary_tree::{
    BinaryTree, BinaryTreeStyle, NodeId, NodeLayout, RevealStep, Timing, Tree, VisualHandles,
    initial_offset, layout,
};
pub use components::composite::Composite;
pub use components::letters::Letters;
pub use components::list::{List, ListStyle};
pub use composition::dsl::CompositionBuilder;
pub use composition::model::Composition;
pub use composition::script::{ComponentSpec, Cue, SceneFile, TreeSpec, load_scene_file};
pub use foundation::core::{
    Affine, Canvas, Fps, FrameIndex, FrameRange, Point, Rgba8, Transform2D, Vec2,
};
pub use foundation::error::{SaplingError, SaplingResult};
pub use render::cpu::CpuRenderer;
pub use render::pipeline::{RenderThreading, render_frame, render_frames, render_to_dir, write_png};
pub use render::svg::frame_to_svg;
pub use render::{FrameRGBA, RenderBackend};
pub use scene::evaluator::{EvaluatedFrame, EvaluatedShape, Evaluator};
pub use scene::model::{Align, HandleId, Props, RowLayout, Scene, Shape, ShapeKind};
