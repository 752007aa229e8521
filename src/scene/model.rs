use crate::{
    animation::value::{Prop, Value},
    foundation::core::{Point, Rgba8, Transform2D, Vec2},
    foundation::error::{SaplingError, SaplingResult},
};

/// Stable address of a shape inside a [`Scene`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct HandleId(pub u32);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Cross-axis alignment of row children.
pub enum Align {
    /// Top edges line up.
    Start,
    /// Vertical centres line up.
    #[default]
    Center,
    /// Bottom edges line up.
    End,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Static configuration of a row container. Horizontal padding is animatable and lives in
/// [`Props`].
pub struct RowLayout {
    /// Space between consecutive present children.
    pub gap: f64,
    /// Cross-axis alignment.
    pub align: Align,
    /// Padding above the children.
    pub padding_top: f64,
    /// Padding below the children.
    pub padding_bottom: f64,
    /// Fixed container height; `None` sizes the row to its tallest child.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_height: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// What a shape draws.
pub enum ShapeKind {
    /// Draws nothing; only carries a transform for its children.
    Group,
    /// Circle with diameter `width`.
    Circle,
    /// Stroked two-point line with round caps.
    Line,
    /// Centred single-line monospace text.
    Text,
    /// Rectangle of `width` x `height` centred on its origin.
    Rect,
    /// Rectangle that lays its children out left to right.
    Row(RowLayout),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Full property set of a shape. Every field is addressable through [`Prop`] except `anchor`.
pub struct Props {
    /// Origin in parent space.
    pub position: Vec2,
    /// Local scale.
    pub scale: Vec2,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Scale/rotation pivot in local space.
    pub anchor: Vec2,
    /// Opacity multiplier in `[0, 1]`.
    pub opacity: f64,
    /// Fill colour.
    pub fill: Rgba8,
    /// Stroke colour.
    pub stroke: Rgba8,
    /// Stroke width; 0 disables the stroke.
    pub line_width: f64,
    /// Width (diameter for circles).
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Corner radius for rects and rows.
    pub radius: f64,
    /// Endpoints for lines.
    pub points: [Point; 2],
    /// Font size for text.
    pub font_size: f64,
    /// Text content.
    pub text: String,
    /// Extra space before the shape inside a row.
    pub margin_left: f64,
    /// Extra space after the shape inside a row.
    pub margin_right: f64,
    /// Row padding before the first child.
    pub padding_left: f64,
    /// Row padding after the last child.
    pub padding_right: f64,
    /// Absent shapes (and their subtrees) are neither drawn nor laid out.
    pub present: bool,
}

impl Default for Props {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
            anchor: Vec2::ZERO,
            opacity: 1.0,
            fill: Rgba8::WHITE,
            stroke: Rgba8::TRANSPARENT,
            line_width: 0.0,
            width: 0.0,
            height: 0.0,
            radius: 0.0,
            points: [Point::ORIGIN, Point::ORIGIN],
            font_size: 0.0,
            text: String::new(),
            margin_left: 0.0,
            margin_right: 0.0,
            padding_left: 0.0,
            padding_right: 0.0,
            present: true,
        }
    }
}

impl Props {
    pub fn get(&self, prop: Prop) -> Value {
        match prop {
            Prop::Position => Value::Vec2(self.position),
            Prop::Scale => Value::Vec2(self.scale),
            Prop::Rotation => Value::Scalar(self.rotation),
            Prop::Opacity => Value::Scalar(self.opacity),
            Prop::Fill => Value::Color(self.fill),
            Prop::Stroke => Value::Color(self.stroke),
            Prop::LineWidth => Value::Scalar(self.line_width),
            Prop::Width => Value::Scalar(self.width),
            Prop::Height => Value::Scalar(self.height),
            Prop::Radius => Value::Scalar(self.radius),
            Prop::Points => Value::Segment(self.points),
            Prop::FontSize => Value::Scalar(self.font_size),
            Prop::Text => Value::Text(self.text.clone()),
            Prop::MarginLeft => Value::Scalar(self.margin_left),
            Prop::MarginRight => Value::Scalar(self.margin_right),
            Prop::PaddingLeft => Value::Scalar(self.padding_left),
            Prop::PaddingRight => Value::Scalar(self.padding_right),
            Prop::Present => Value::Flag(self.present),
        }
    }

    pub fn set(&mut self, prop: Prop, value: Value) -> SaplingResult<()> {
        prop.check(&value)?;
        match (prop, value) {
            (Prop::Position, Value::Vec2(v)) => self.position = v,
            (Prop::Scale, Value::Vec2(v)) => self.scale = v,
            (Prop::Rotation, Value::Scalar(v)) => self.rotation = v,
            (Prop::Opacity, Value::Scalar(v)) => self.opacity = v,
            (Prop::Fill, Value::Color(c)) => self.fill = c,
            (Prop::Stroke, Value::Color(c)) => self.stroke = c,
            (Prop::LineWidth, Value::Scalar(v)) => self.line_width = v,
            (Prop::Width, Value::Scalar(v)) => self.width = v,
            (Prop::Height, Value::Scalar(v)) => self.height = v,
            (Prop::Radius, Value::Scalar(v)) => self.radius = v,
            (Prop::Points, Value::Segment(p)) => self.points = p,
            (Prop::FontSize, Value::Scalar(v)) => self.font_size = v,
            (Prop::Text, Value::Text(s)) => self.text = s,
            (Prop::MarginLeft, Value::Scalar(v)) => self.margin_left = v,
            (Prop::MarginRight, Value::Scalar(v)) => self.margin_right = v,
            (Prop::PaddingLeft, Value::Scalar(v)) => self.padding_left = v,
            (Prop::PaddingRight, Value::Scalar(v)) => self.padding_right = v,
            (Prop::Present, Value::Flag(b)) => self.present = b,
            (prop, value) => {
                return Err(SaplingError::animation(format!(
                    "property {prop:?} cannot hold a {} value",
                    value.kind_name()
                )));
            }
        }
        Ok(())
    }

    pub fn transform(&self) -> Transform2D {
        Transform2D {
            translate: self.position,
            rotation_deg: self.rotation,
            scale: self.scale,
            anchor: self.anchor,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A shape plus its base (pre-animation) properties.
pub struct Shape {
    /// What the shape draws.
    pub kind: ShapeKind,
    /// Paint order key; ties keep tree order.
    pub z: i32,
    /// Base properties sampled before any tween applies.
    pub props: Props,
}

impl Shape {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            z: 0,
            props: Props::default(),
        }
    }

    pub fn group() -> Self {
        Self::new(ShapeKind::Group)
    }

    pub fn circle(diameter: f64) -> Self {
        Self::new(ShapeKind::Circle).size(diameter, diameter)
    }

    pub fn line(from: Point, to: Point, width: f64) -> Self {
        let mut s = Self::new(ShapeKind::Line);
        s.props.points = [from, to];
        s.props.line_width = width;
        s
    }

    pub fn text(text: impl Into<String>, font_size: f64) -> Self {
        let mut s = Self::new(ShapeKind::Text);
        s.props.text = text.into();
        s.props.font_size = font_size;
        s
    }

    pub fn rect(width: f64, height: f64) -> Self {
        Self::new(ShapeKind::Rect).size(width, height)
    }

    pub fn row(layout: RowLayout) -> Self {
        let mut s = Self::new(ShapeKind::Row(layout));
        s.props.fill = Rgba8::TRANSPARENT;
        s
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.props.position = Vec2::new(x, y);
        self
    }

    pub fn z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.props.width = width;
        self.props.height = height;
        self
    }

    pub fn fill(mut self, fill: Rgba8) -> Self {
        self.props.fill = fill;
        self
    }

    pub fn stroke(mut self, stroke: Rgba8, width: f64) -> Self {
        self.props.stroke = stroke;
        self.props.line_width = width;
        self
    }

    pub fn scale(mut self, s: f64) -> Self {
        self.props.scale = Vec2::new(s, s);
        self
    }

    pub fn radius(mut self, r: f64) -> Self {
        self.props.radius = r;
        self
    }

    pub fn anchor(mut self, x: f64, y: f64) -> Self {
        self.props.anchor = Vec2::new(x, y);
        self
    }

    pub fn padding(mut self, left: f64, right: f64) -> Self {
        self.props.padding_left = left;
        self.props.padding_right = right;
        self
    }

    pub fn present(mut self, present: bool) -> Self {
        self.props.present = present;
        self
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
struct Slot {
    shape: Shape,
    parent: Option<HandleId>,
    children: Vec<HandleId>,
}

/// Retained shape tree. Shapes are never removed; hide them with [`Prop::Present`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    slots: Vec<Slot>,
    roots: Vec<HandleId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Append `shape` as the last child of `parent` (or as a root).
    pub fn add(&mut self, parent: Option<HandleId>, shape: Shape) -> SaplingResult<HandleId> {
        let id = self.next_id()?;
        match parent {
            Some(p) => self.slot_mut(p)?.children.push(id),
            None => self.roots.push(id),
        }
        self.slots.push(Slot {
            shape,
            parent,
            children: Vec::new(),
        });
        Ok(id)
    }

    /// Insert `shape` as a sibling placed right before `before`.
    pub fn insert_before(&mut self, before: HandleId, shape: Shape) -> SaplingResult<HandleId> {
        let parent = self.slot(before)?.parent;
        let id = self.next_id()?;
        let siblings = match parent {
            Some(p) => &mut self.slot_mut(p)?.children,
            None => &mut self.roots,
        };
        let idx = siblings
            .iter()
            .position(|&h| h == before)
            .ok_or_else(|| SaplingError::validation("sibling missing from its parent"))?;
        siblings.insert(idx, id);
        self.slots.push(Slot {
            shape,
            parent,
            children: Vec::new(),
        });
        Ok(id)
    }

    pub fn shape(&self, id: HandleId) -> SaplingResult<&Shape> {
        Ok(&self.slot(id)?.shape)
    }

    pub fn shape_mut(&mut self, id: HandleId) -> SaplingResult<&mut Shape> {
        Ok(&mut self.slot_mut(id)?.shape)
    }

    pub fn parent(&self, id: HandleId) -> SaplingResult<Option<HandleId>> {
        Ok(self.slot(id)?.parent)
    }

    pub fn children(&self, id: HandleId) -> SaplingResult<&[HandleId]> {
        Ok(&self.slot(id)?.children)
    }

    pub fn roots(&self) -> &[HandleId] {
        &self.roots
    }

    /// All handles in pre-order (parents before children, siblings in order).
    pub fn tree_order(&self) -> Vec<HandleId> {
        let mut out = Vec::with_capacity(self.slots.len());
        let mut stack: Vec<HandleId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(slot) = self.slots.get(id.0 as usize) {
                stack.extend(slot.children.iter().rev().copied());
            }
        }
        out
    }

    fn next_id(&self) -> SaplingResult<HandleId> {
        let n = u32::try_from(self.slots.len())
            .map_err(|_| SaplingError::validation("scene has too many shapes"))?;
        Ok(HandleId(n))
    }

    fn slot(&self, id: HandleId) -> SaplingResult<&Slot> {
        self.slots
            .get(id.0 as usize)
            .ok_or_else(|| SaplingError::validation(format!("unknown shape handle {}", id.0)))
    }

    fn slot_mut(&mut self, id: HandleId) -> SaplingResult<&mut Slot> {
        self.slots
            .get_mut(id.0 as usize)
            .ok_or_else(|| SaplingError::validation(format!("unknown shape handle {}", id.0)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
