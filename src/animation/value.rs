use crate::{
    foundation::core::{Point, Rgba8, Vec2},
    foundation::error::{SaplingError, SaplingResult},
};

/// Linear interpolation between two values of the same type.
pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.lerp(*b, t)
    }
}

impl Lerp for Rgba8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// Animatable shape property.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Prop {
    Position,
    Scale,
    Rotation,
    Opacity,
    Fill,
    Stroke,
    LineWidth,
    Width,
    Height,
    Radius,
    Points,
    FontSize,
    Text,
    MarginLeft,
    MarginRight,
    PaddingLeft,
    PaddingRight,
    Present,
}

/// A property value. Each [`Prop`] accepts exactly one variant.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Scalar(f64),
    Vec2(Vec2),
    Color(Rgba8),
    /// Two-point polyline used by line shapes.
    Segment([Point; 2]),
    Text(String),
    Flag(bool),
}

impl Value {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Vec2(_) => "vec2",
            Self::Color(_) => "color",
            Self::Segment(_) => "segment",
            Self::Text(_) => "text",
            Self::Flag(_) => "flag",
        }
    }

    /// Interpolate toward `to`. Text and flags hold `self` until `t` reaches 1.
    pub fn lerp_to(&self, to: &Value, t: f64) -> SaplingResult<Value> {
        Ok(match (self, to) {
            (Self::Scalar(a), Self::Scalar(b)) => Self::Scalar(<f64 as Lerp>::lerp(a, b, t)),
            (Self::Vec2(a), Self::Vec2(b)) => Self::Vec2(<Vec2 as Lerp>::lerp(a, b, t)),
            (Self::Color(a), Self::Color(b)) => Self::Color(<Rgba8 as Lerp>::lerp(a, b, t)),
            (Self::Segment(a), Self::Segment(b)) => Self::Segment([
                <Point as Lerp>::lerp(&a[0], &b[0], t),
                <Point as Lerp>::lerp(&a[1], &b[1], t),
            ]),
            (Self::Text(_), Self::Text(_)) | (Self::Flag(_), Self::Flag(_)) => {
                if t >= 1.0 {
                    to.clone()
                } else {
                    self.clone()
                }
            }
            (a, b) => {
                return Err(SaplingError::animation(format!(
                    "cannot interpolate {} toward {}",
                    a.kind_name(),
                    b.kind_name()
                )));
            }
        })
    }
}

impl Prop {
    /// Name of the [`Value`] variant this property accepts.
    pub fn value_kind(self) -> &'static str {
        match self {
            Self::Position | Self::Scale => "vec2",
            Self::Fill | Self::Stroke => "color",
            Self::Points => "segment",
            Self::Text => "text",
            Self::Present => "flag",
            Self::Rotation
            | Self::Opacity
            | Self::LineWidth
            | Self::Width
            | Self::Height
            | Self::Radius
            | Self::FontSize
            | Self::MarginLeft
            | Self::MarginRight
            | Self::PaddingLeft
            | Self::PaddingRight => "scalar",
        }
    }

    pub fn check(self, value: &Value) -> SaplingResult<()> {
        if self.value_kind() != value.kind_name() {
            return Err(SaplingError::animation(format!(
                "property {self:?} expects a {} value, got {}",
                self.value_kind(),
                value.kind_name()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/value.rs"]
mod tests;
