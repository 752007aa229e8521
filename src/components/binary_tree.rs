//! Binary search tree visualiser: layered layout plus a serial top-down reveal.

use std::collections::BTreeMap;

use crate::{
    animation::timeline::{Step, chain, tween},
    animation::value::{Prop, Value},
    foundation::core::{Point, Rgba8, Vec2},
    foundation::error::{SaplingError, SaplingResult},
    scene::model::{HandleId, Scene, Shape},
};

/// Horizontal extent budget shared by all levels.
pub const SPAN: f64 = 800.0;
/// Vertical distance between levels.
pub const STEP: f64 = 128.0;
pub const NODE_DIAMETER: f64 = 64.0;
pub const LABEL_SIZE: f64 = 32.0;
pub const EDGE_WIDTH: f64 = 8.0;

/// A binary tree of integer keys. Lookups assume BST ordering.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Tree {
    pub key: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<Tree>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<Tree>>,
}

impl Tree {
    pub fn leaf(key: i64) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }

    pub fn with_left(mut self, left: Tree) -> Self {
        self.left = Some(Box::new(left));
        self
    }

    pub fn with_right(mut self, right: Tree) -> Self {
        self.right = Some(Box::new(right));
        self
    }

    /// Build a BST by inserting `keys` in order. Duplicates are ignored.
    pub fn from_keys(keys: &[i64]) -> Option<Self> {
        let (&first, rest) = keys.split_first()?;
        let mut root = Self::leaf(first);
        for &k in rest {
            root.insert(k);
        }
        Some(root)
    }

    fn insert(&mut self, key: i64) {
        let slot = match key.cmp(&self.key) {
            std::cmp::Ordering::Less => &mut self.left,
            std::cmp::Ordering::Greater => &mut self.right,
            std::cmp::Ordering::Equal => return,
        };
        match slot {
            Some(child) => child.insert(key),
            None => *slot = Some(Box::new(Self::leaf(key))),
        }
    }

    /// Number of levels; a leaf has depth 1.
    pub fn depth(&self) -> u32 {
        1 + self.children().map(Tree::depth).max().unwrap_or(0)
    }

    /// Number of nodes; a leaf counts 1.
    pub fn count(&self) -> usize {
        1 + self.children().map(Tree::count).sum::<usize>()
    }

    /// BST descent. Returns `None` when the key is not in the tree.
    pub fn find(&self, key: i64) -> Option<&Tree> {
        match key.cmp(&self.key) {
            std::cmp::Ordering::Less => self.left.as_deref()?.find(key),
            std::cmp::Ordering::Greater => self.right.as_deref()?.find(key),
            std::cmp::Ordering::Equal => Some(self),
        }
    }

    /// Left child first, then right.
    pub fn children(&self) -> impl Iterator<Item = &Tree> {
        self.left.as_deref().into_iter().chain(self.right.as_deref())
    }
}

/// Pre-order index of a node.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u32);

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Placement of one node, in the tree component's local space.
pub struct NodeLayout {
    pub id: NodeId,
    pub key: i64,
    pub parent: Option<NodeId>,
    /// Distance from the root level.
    pub level: u32,
    pub position: Point,
    /// Horizontal offset applied to this node's children.
    pub child_offset: f64,
}

/// Horizontal offset between the root and its children for a tree of `depth` levels.
pub fn initial_offset(depth: u32) -> f64 {
    if depth <= 1 {
        return 0.0;
    }
    // span * 2^(d-2) / (2^(d-1) - 1), rearranged so deep trees stay finite
    SPAN / (2.0 - 2f64.powi(2 - depth as i32))
}

/// Position every node. The result is in pre-order, so `result[id.0]` is node `id`.
pub fn layout(tree: &Tree) -> Vec<NodeLayout> {
    let depth = tree.depth();
    let root = Point::new(0.0, -f64::from(depth - 1) * STEP / 2.0);
    let mut out = Vec::with_capacity(tree.count());
    place(tree, None, 0, root, initial_offset(depth), &mut out);
    out
}

fn place(
    tree: &Tree,
    parent: Option<NodeId>,
    level: u32,
    at: Point,
    offset: f64,
    out: &mut Vec<NodeLayout>,
) {
    let id = NodeId(out.len() as u32);
    out.push(NodeLayout {
        id,
        key: tree.key,
        parent,
        level,
        position: at,
        child_offset: offset,
    });
    let y = at.y + STEP;
    if let Some(left) = tree.left.as_deref() {
        place(left, Some(id), level + 1, Point::new(at.x - offset, y), offset / 2.0, out);
    }
    if let Some(right) = tree.right.as_deref() {
        place(right, Some(id), level + 1, Point::new(at.x + offset, y), offset / 2.0, out);
    }
}

/// Shapes drawn for one node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct VisualHandles {
    pub circle: HandleId,
    pub label: HandleId,
    /// Edge from the parent; the root has none.
    pub edge: Option<HandleId>,
}

/// One serial step of the reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealStep {
    /// Grow (or collapse) the edge leading into the node.
    Edge(NodeId),
    /// Scale the node circle in (or out).
    Node(NodeId),
}

/// How `create` spends its time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timing {
    /// Every edge and every node takes this many seconds.
    PerStep(f64),
    /// The whole reveal takes this many seconds, split evenly across steps.
    Total(f64),
}

impl Timing {
    fn step_secs(self, steps: usize) -> f64 {
        match self {
            Self::PerStep(secs) => secs,
            Self::Total(secs) if steps > 0 => secs / steps as f64,
            Self::Total(_) => 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BinaryTreeStyle {
    /// Circle fill and edge colour.
    pub fill: Rgba8,
    /// Label colour.
    pub color: Rgba8,
}

impl Default for BinaryTreeStyle {
    fn default() -> Self {
        Self {
            fill: Rgba8::WHITE,
            color: Rgba8::rgb(0x14, 0x14, 0x14),
        }
    }
}

/// A tree mounted into a scene. Every shape exists up front at zero size and is revealed by
/// [`BinaryTree::create`].
#[derive(Clone, Debug)]
pub struct BinaryTree {
    tree: Tree,
    group: HandleId,
    nodes: Vec<NodeLayout>,
    visuals: BTreeMap<NodeId, VisualHandles>,
}

impl BinaryTree {
    #[tracing::instrument(skip(scene, tree), fields(nodes = tree.count()))]
    pub fn mount(
        scene: &mut Scene,
        parent: Option<HandleId>,
        tree: Tree,
        position: Vec2,
        style: BinaryTreeStyle,
    ) -> SaplingResult<Self> {
        let group = scene.add(parent, Shape::group().at(position.x, position.y))?;
        let nodes = layout(&tree);
        let mut visuals = BTreeMap::new();
        for node in &nodes {
            let edge = match node.parent {
                Some(p) => {
                    let from = nodes[p.0 as usize].position;
                    Some(scene.add(
                        Some(group),
                        Shape::line(from, from, EDGE_WIDTH).stroke(style.fill, EDGE_WIDTH),
                    )?)
                }
                None => None,
            };
            let circle = scene.add(
                Some(group),
                Shape::circle(NODE_DIAMETER)
                    .at(node.position.x, node.position.y)
                    .fill(style.fill)
                    .scale(0.0)
                    .z(1),
            )?;
            let label = scene.add(
                Some(circle),
                Shape::text(node.key.to_string(), LABEL_SIZE)
                    .fill(style.color)
                    .z(1),
            )?;
            visuals.insert(
                node.id,
                VisualHandles {
                    circle,
                    label,
                    edge,
                },
            );
        }
        Ok(Self {
            tree,
            group,
            nodes,
            visuals,
        })
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Root group of every shape this tree owns.
    pub fn group(&self) -> HandleId {
        self.group
    }

    pub fn nodes(&self) -> &[NodeLayout] {
        &self.nodes
    }

    pub fn visuals(&self, id: NodeId) -> Option<&VisualHandles> {
        self.visuals.get(&id)
    }

    /// Node id for `key`, following BST descent. Ids are pre-order, so a left child is the
    /// next id and a right child comes after the whole left subtree.
    pub fn node_for_key(&self, key: i64) -> Option<NodeId> {
        let mut node = &self.tree;
        let mut id = 0u32;
        loop {
            match key.cmp(&node.key) {
                std::cmp::Ordering::Less => {
                    node = node.left.as_deref()?;
                    id += 1;
                }
                std::cmp::Ordering::Greater => {
                    let skip = node.left.as_deref().map_or(0, Tree::count);
                    node = node.right.as_deref()?;
                    id += 1 + skip as u32;
                }
                std::cmp::Ordering::Equal => return Some(NodeId(id)),
            }
        }
    }

    /// Serial order used by [`BinaryTree::create`]: each node, preceded by its incoming edge,
    /// with the left subtree finished before the right one starts.
    pub fn reveal_order(&self) -> Vec<RevealStep> {
        let mut out = Vec::with_capacity(self.nodes.len() * 2);
        for node in &self.nodes {
            if node.parent.is_some() {
                out.push(RevealStep::Edge(node.id));
            }
            out.push(RevealStep::Node(node.id));
        }
        out
    }

    /// Serial order used by [`BinaryTree::destroy`]: children right to left, then the node,
    /// then its incoming edge.
    pub fn destroy_order(&self) -> Vec<RevealStep> {
        let mut out = Vec::with_capacity(self.nodes.len() * 2);
        self.push_destroy(NodeId(0), &mut out);
        out
    }

    fn push_destroy(&self, id: NodeId, out: &mut Vec<RevealStep>) {
        let children: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|n| n.parent == Some(id))
            .map(|n| n.id)
            .collect();
        for &child in children.iter().rev() {
            self.push_destroy(child, out);
        }
        out.push(RevealStep::Node(id));
        if self.nodes[id.0 as usize].parent.is_some() {
            out.push(RevealStep::Edge(id));
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn create(&self, timing: Timing) -> SaplingResult<Step> {
        let order = self.reveal_order();
        let secs = timing.step_secs(order.len());
        let mut steps = Vec::with_capacity(order.len());
        for item in order {
            steps.push(match item {
                RevealStep::Edge(id) => {
                    let (edge, from, to) = self.edge_points(id)?;
                    tween(edge, Prop::Points, Value::Segment([from, to]), secs)
                }
                RevealStep::Node(id) => tween(
                    self.handles(id)?.circle,
                    Prop::Scale,
                    Value::Vec2(Vec2::new(1.0, 1.0)),
                    secs,
                ),
            });
        }
        Ok(chain(steps))
    }

    #[tracing::instrument(skip(self))]
    pub fn destroy(&self, secs: f64) -> SaplingResult<Step> {
        let order = self.destroy_order();
        let mut steps = Vec::with_capacity(order.len());
        for item in order {
            steps.push(match item {
                RevealStep::Edge(id) => {
                    let (edge, from, _) = self.edge_points(id)?;
                    tween(edge, Prop::Points, Value::Segment([from, from]), secs)
                }
                RevealStep::Node(id) => tween(
                    self.handles(id)?.circle,
                    Prop::Scale,
                    Value::Vec2(Vec2::ZERO),
                    secs,
                ),
            });
        }
        Ok(chain(steps))
    }

    /// Tween the circle fill of the node holding `key`.
    pub fn fade_fill(&self, key: i64, color: Rgba8, secs: f64) -> SaplingResult<Step> {
        let id = self
            .node_for_key(key)
            .ok_or_else(|| SaplingError::lookup(format!("key {key} is not in the tree")))?;
        Ok(tween(
            self.handles(id)?.circle,
            Prop::Fill,
            Value::Color(color),
            secs,
        ))
    }

    fn handles(&self, id: NodeId) -> SaplingResult<&VisualHandles> {
        self.visuals
            .get(&id)
            .ok_or_else(|| SaplingError::lookup(format!("no visuals for tree node {}", id.0)))
    }

    fn edge_points(&self, id: NodeId) -> SaplingResult<(HandleId, Point, Point)> {
        let node = &self.nodes[id.0 as usize];
        let parent = node
            .parent
            .ok_or_else(|| SaplingError::lookup(format!("tree node {} has no edge", id.0)))?;
        let edge = self
            .handles(id)?
            .edge
            .ok_or_else(|| SaplingError::lookup(format!("tree node {} has no edge", id.0)))?;
        Ok((edge, self.nodes[parent.0 as usize].position, node.position))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/components/binary_tree.rs"]
mod tests;
