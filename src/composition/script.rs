//! JSON scene files: components to mount plus a script of cues that animate them.
//!
//! ```json
//! {
//!   "canvas": { "width": 1280, "height": 720 },
//!   "fps": { "num": 30, "den": 1 },
//!   "components": {
//!     "bst": { "kind": "binary_tree", "tree": [5, 3, 8] }
//!   },
//!   "script": [
//!     { "op": "tree_create", "target": "bst", "secs": 0.4 },
//!     { "op": "wait", "secs": 1 },
//!     { "op": "tree_fade_fill", "target": "bst", "key": 3, "color": "#e06c75", "secs": 0.5 }
//!   ]
//! }
//! ```

use std::{collections::BTreeMap, path::Path};

use crate::{
    animation::timeline::{Step, Timeline, all, chain, delay, wait},
    components::binary_tree::{BinaryTree, BinaryTreeStyle, Timing, Tree},
    components::composite::Composite,
    components::letters::Letters,
    components::list::{List, ListStyle},
    composition::dsl::CompositionBuilder,
    composition::model::Composition,
    foundation::core::{Canvas, Fps, Rgba8, Vec2},
    foundation::error::{SaplingError, SaplingResult},
    scene::model::Scene,
};

fn default_background() -> Rgba8 {
    Rgba8::rgb(0x14, 0x14, 0x14)
}

fn default_font_size() -> f64 {
    64.0
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneFile {
    #[serde(default)]
    pub canvas: Canvas,
    #[serde(default)]
    pub fps: Fps,
    #[serde(default = "default_background")]
    pub background: Rgba8,
    /// Components by name. Mounted in name order.
    #[serde(default)]
    pub components: BTreeMap<String, ComponentSpec>,
    #[serde(default)]
    pub script: Vec<Cue>,
}

/// A tree given either as BST insertion order or as an explicit nested structure.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum TreeSpec {
    Keys(Vec<i64>),
    Nested(Tree),
}

impl TreeSpec {
    fn build(&self) -> SaplingResult<Tree> {
        match self {
            Self::Keys(keys) => Tree::from_keys(keys)
                .ok_or_else(|| SaplingError::validation("binary_tree needs at least one key")),
            Self::Nested(tree) => Ok(tree.clone()),
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentSpec {
    BinaryTree {
        tree: TreeSpec,
        #[serde(default)]
        position: [f64; 2],
        #[serde(default)]
        fill: Option<Rgba8>,
        #[serde(default)]
        color: Option<Rgba8>,
    },
    List {
        #[serde(default)]
        values: Vec<String>,
        #[serde(default)]
        position: [f64; 2],
        #[serde(default)]
        background: Option<Rgba8>,
    },
    Composite {
        powers: Vec<f64>,
        #[serde(default)]
        position: [f64; 2],
        #[serde(default)]
        color: Option<Rgba8>,
    },
    Letters {
        text: String,
        #[serde(default)]
        position: [f64; 2],
        #[serde(default = "default_font_size")]
        font_size: f64,
        #[serde(default)]
        fill: Option<Rgba8>,
    },
}

/// One script entry. Top-level cues play one after another.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Cue {
    Wait {
        secs: f64,
    },
    All {
        cues: Vec<Cue>,
    },
    Chain {
        cues: Vec<Cue>,
    },
    Delay {
        secs: f64,
        cue: Box<Cue>,
    },
    /// Reveal a tree. `secs` is per edge/node; `total` spreads the time over the whole reveal.
    TreeCreate {
        target: String,
        #[serde(default)]
        secs: Option<f64>,
        #[serde(default)]
        total: Option<f64>,
    },
    TreeDestroy {
        target: String,
        secs: f64,
    },
    TreeFadeFill {
        target: String,
        key: i64,
        color: Rgba8,
        secs: f64,
    },
    ListPush {
        target: String,
        value: String,
        secs: f64,
    },
    ListPop {
        target: String,
        secs: f64,
    },
    ListPlace {
        target: String,
        value: String,
        index: usize,
        secs: f64,
    },
    ListDelete {
        target: String,
        index: usize,
        secs: f64,
    },
    ListSet {
        target: String,
        value: String,
        index: usize,
        secs: f64,
    },
    ListHighlight {
        target: String,
        index: usize,
        secs: f64,
    },
    ListUnhighlight {
        target: String,
        secs: f64,
    },
    ListTurn {
        target: String,
        degrees: f64,
        secs: f64,
    },
    CompositeCreate {
        target: String,
        secs: f64,
    },
    CompositeChange {
        target: String,
        powers: Vec<f64>,
        secs: f64,
    },
    CompositeShade {
        target: String,
        #[serde(default)]
        colors: Vec<Rgba8>,
        secs: f64,
    },
    CompositeDestroy {
        target: String,
    },
    CompositeHide {
        target: String,
    },
    CompositeShow {
        target: String,
    },
    LettersShow {
        target: String,
        secs: f64,
    },
    LettersHide {
        target: String,
        secs: f64,
    },
    LettersEdit {
        target: String,
        text: String,
        #[serde(default = "default_font_size")]
        font_size: f64,
        #[serde(default)]
        fill: Option<Rgba8>,
    },
}

enum Mounted {
    Tree(BinaryTree),
    List(List),
    Composite(Composite),
    Letters(Letters),
}

impl Mounted {
    fn kind_name(&self) -> &'static str {
        match self {
            Self::Tree(_) => "binary_tree",
            Self::List(_) => "list",
            Self::Composite(_) => "composite",
            Self::Letters(_) => "letters",
        }
    }
}

struct Stage {
    scene: Scene,
    mounted: BTreeMap<String, Mounted>,
}

fn wrong_kind(name: &str, found: &Mounted, wanted: &str) -> SaplingError {
    SaplingError::validation(format!(
        "component '{name}' is a {}, not a {wanted}",
        found.kind_name()
    ))
}

macro_rules! component {
    ($stage:expr, $name:expr, $variant:ident, $wanted:literal) => {
        match $stage.mounted.get_mut($name.as_str()) {
            Some(Mounted::$variant(c)) => c,
            Some(other) => return Err(wrong_kind($name, other, $wanted)),
            None => {
                return Err(SaplingError::validation(format!(
                    "script references unknown component '{}'",
                    $name
                )));
            }
        }
    };
}

impl Stage {
    fn mount(name: &str, spec: &ComponentSpec, scene: &mut Scene) -> SaplingResult<Mounted> {
        let at = |p: [f64; 2]| Vec2::new(p[0], p[1]);
        Ok(match spec {
            ComponentSpec::BinaryTree {
                tree,
                position,
                fill,
                color,
            } => {
                let defaults = BinaryTreeStyle::default();
                let style = BinaryTreeStyle {
                    fill: fill.unwrap_or(defaults.fill),
                    color: color.unwrap_or(defaults.color),
                };
                Mounted::Tree(BinaryTree::mount(
                    scene,
                    None,
                    tree.build()?,
                    at(*position),
                    style,
                )?)
            }
            ComponentSpec::List {
                values,
                position,
                background,
            } => {
                let style = ListStyle {
                    background: background.unwrap_or(Rgba8::TRANSPARENT),
                    ..ListStyle::default()
                };
                Mounted::List(List::mount(scene, None, values.clone(), at(*position), style)?)
            }
            ComponentSpec::Composite {
                powers,
                position,
                color,
            } => Mounted::Composite(Composite::mount(
                scene,
                None,
                powers.clone(),
                at(*position),
                color.unwrap_or(Rgba8::WHITE),
            )?),
            ComponentSpec::Letters {
                text,
                position,
                font_size,
                fill,
            } => {
                check_positive(*font_size, &format!("letters '{name}' font_size"))?;
                let mut letters = Letters::mount(scene, None, at(*position))?;
                letters.edit(scene, text.as_str(), *font_size, fill.unwrap_or(Rgba8::WHITE))?;
                Mounted::Letters(letters)
            }
        })
    }

    fn cue(&mut self, cue: &Cue) -> SaplingResult<Step> {
        Ok(match cue {
            Cue::Wait { secs } => wait(*secs),
            Cue::All { cues } => all(self.cues(cues)?),
            Cue::Chain { cues } => chain(self.cues(cues)?),
            Cue::Delay { secs, cue } => delay(*secs, self.cue(cue)?),
            Cue::TreeCreate {
                target,
                secs,
                total,
            } => {
                let timing = match (secs, total) {
                    (Some(s), None) => Timing::PerStep(*s),
                    (None, Some(t)) => Timing::Total(*t),
                    _ => {
                        return Err(SaplingError::validation(format!(
                            "tree_create on '{target}' needs exactly one of 'secs' or 'total'"
                        )));
                    }
                };
                component!(self, target, Tree, "binary_tree").create(timing)?
            }
            Cue::TreeDestroy { target, secs } => {
                component!(self, target, Tree, "binary_tree").destroy(*secs)?
            }
            Cue::TreeFadeFill {
                target,
                key,
                color,
                secs,
            } => component!(self, target, Tree, "binary_tree").fade_fill(*key, *color, *secs)?,
            Cue::ListPush {
                target,
                value,
                secs,
            } => {
                let list = component!(self, target, List, "list");
                list.push(&mut self.scene, value.as_str(), *secs)?
            }
            Cue::ListPop { target, secs } => component!(self, target, List, "list").pop(*secs)?,
            Cue::ListPlace {
                target,
                value,
                index,
                secs,
            } => {
                let list = component!(self, target, List, "list");
                list.place(&mut self.scene, value.as_str(), *index, *secs)?
            }
            Cue::ListDelete {
                target,
                index,
                secs,
            } => component!(self, target, List, "list").delete(*index, *secs)?,
            Cue::ListSet {
                target,
                value,
                index,
                secs,
            } => component!(self, target, List, "list").set(value.as_str(), *index, *secs)?,
            Cue::ListHighlight {
                target,
                index,
                secs,
            } => component!(self, target, List, "list").highlight(*index, *secs)?,
            Cue::ListUnhighlight { target, secs } => {
                component!(self, target, List, "list").unhighlight(*secs)
            }
            Cue::ListTurn {
                target,
                degrees,
                secs,
            } => component!(self, target, List, "list").turn(*degrees, *secs),
            Cue::CompositeCreate { target, secs } => {
                component!(self, target, Composite, "composite").create(*secs)
            }
            Cue::CompositeChange {
                target,
                powers,
                secs,
            } => {
                let comp = component!(self, target, Composite, "composite");
                comp.change(&mut self.scene, powers.clone(), *secs)?
            }
            Cue::CompositeShade {
                target,
                colors,
                secs,
            } => component!(self, target, Composite, "composite").shade(colors, *secs),
            Cue::CompositeDestroy { target } => {
                component!(self, target, Composite, "composite").destroy()
            }
            Cue::CompositeHide { target } => component!(self, target, Composite, "composite").hide(),
            Cue::CompositeShow { target } => component!(self, target, Composite, "composite").show(),
            Cue::LettersShow { target, secs } => {
                component!(self, target, Letters, "letters").show(*secs)
            }
            Cue::LettersHide { target, secs } => {
                component!(self, target, Letters, "letters").hide(*secs)
            }
            Cue::LettersEdit {
                target,
                text,
                font_size,
                fill,
            } => {
                check_positive(*font_size, &format!("letters '{target}' font_size"))?;
                let letters = component!(self, target, Letters, "letters");
                letters.edit(
                    &mut self.scene,
                    text.as_str(),
                    *font_size,
                    fill.unwrap_or(Rgba8::WHITE),
                )?
            }
        })
    }

    fn cues(&mut self, cues: &[Cue]) -> SaplingResult<Vec<Step>> {
        cues.iter().map(|c| self.cue(c)).collect()
    }
}

fn check_positive(v: f64, what: &str) -> SaplingResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(SaplingError::validation(format!("{what} must be > 0, got {v}")));
    }
    Ok(())
}

impl SceneFile {
    pub fn from_json_str(s: &str) -> SaplingResult<Self> {
        serde_json::from_str(s).map_err(|e| SaplingError::serde(e.to_string()))
    }

    pub fn from_path(path: &Path) -> SaplingResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            SaplingError::validation(format!("read scene file '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Mount every component, translate the script into steps and schedule it.
    #[tracing::instrument(skip(self), fields(components = self.components.len(), cues = self.script.len()))]
    pub fn compile(&self) -> SaplingResult<Composition> {
        let fps = Fps::new(self.fps.num, self.fps.den)?;
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(SaplingError::validation("canvas width/height must be > 0"));
        }

        let mut stage = Stage {
            scene: Scene::new(),
            mounted: BTreeMap::new(),
        };
        for (name, spec) in &self.components {
            let mounted = Stage::mount(name, spec, &mut stage.scene)?;
            stage.mounted.insert(name.clone(), mounted);
        }

        let mut timeline = Timeline::new();
        for cue in &self.script {
            let step = stage.cue(cue)?;
            timeline.play(step);
        }
        tracing::debug!(shapes = stage.scene.len(), "scene mounted");

        CompositionBuilder::new(stage.scene, timeline)
            .fps(fps)
            .canvas(self.canvas)
            .background(self.background)
            .build()
    }
}

/// Read and compile a scene file in one go.
pub fn load_scene_file(path: &Path) -> SaplingResult<Composition> {
    SceneFile::from_path(path)?.compile()
}

#[cfg(test)]
#[path = "../../tests/unit/composition/script.rs"]
mod tests;
