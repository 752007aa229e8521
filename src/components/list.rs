use crate::{
    animation::ease::Ease,
    animation::timeline::{Step, all, chain, set, tween, tween_eased},
    animation::value::{Prop, Value},
    foundation::core::{Rgba8, Vec2},
    foundation::error::{SaplingError, SaplingResult},
    scene::model::{Align, HandleId, RowLayout, Scene, Shape},
};

pub const SPACING: f64 = 12.0;
pub const CELL_SIZE: f64 = 128.0;
pub const FONT_SIZE: f64 = 64.0;
pub const CELL_FILL: Rgba8 = Rgba8::rgb(0x20, 0x20, 0x20);

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ListStyle {
    /// Container fill behind the cells.
    pub background: Rgba8,
    pub cell: Rgba8,
    pub text: Rgba8,
}

impl Default for ListStyle {
    fn default() -> Self {
        Self {
            background: Rgba8::TRANSPARENT,
            cell: CELL_FILL,
            text: Rgba8::WHITE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Cell {
    rect: HandleId,
    text: HandleId,
}

/// A row of value cells with animated insertion and removal.
///
/// Operations add their shapes to the scene immediately (absent until their step runs) and
/// return the [`Step`] that animates them. The list tracks its logical contents as steps are
/// produced, so operations must be played in the order they were built.
#[derive(Clone, Debug)]
pub struct List {
    row: HandleId,
    style: ListStyle,
    values: Vec<String>,
    cells: Vec<Cell>,
}

/// Padding / size split of an operation's duration.
fn split(duration: f64) -> (f64, f64) {
    let p = 0.25 * duration;
    (p, duration - p)
}

impl List {
    #[tracing::instrument(skip(scene, values, style), fields(cells = values.len()))]
    pub fn mount(
        scene: &mut Scene,
        parent: Option<HandleId>,
        values: Vec<String>,
        position: Vec2,
        style: ListStyle,
    ) -> SaplingResult<Self> {
        let row = scene.add(
            parent,
            Shape::row(RowLayout {
                gap: SPACING,
                align: Align::Center,
                padding_top: SPACING,
                padding_bottom: SPACING,
                fixed_height: None,
            })
            .at(position.x, position.y)
            .padding(SPACING, SPACING)
            .radius(SPACING)
            .fill(style.background),
        )?;
        let mut list = Self {
            row,
            style,
            values: Vec::with_capacity(values.len()),
            cells: Vec::with_capacity(values.len()),
        };
        for value in values {
            let cell = list.add_cell(scene, None, &value, CELL_SIZE, FONT_SIZE, true)?;
            list.cells.push(cell);
            list.values.push(value);
        }
        Ok(list)
    }

    pub fn row(&self) -> HandleId {
        self.row
    }

    /// Logical contents after every step built so far.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Cell rectangle and text handles at `index`.
    pub fn cell(&self, index: usize) -> Option<(HandleId, HandleId)> {
        self.cells.get(index).map(|c| (c.rect, c.text))
    }

    fn add_cell(
        &self,
        scene: &mut Scene,
        before: Option<HandleId>,
        value: &str,
        size: f64,
        font_size: f64,
        present: bool,
    ) -> SaplingResult<Cell> {
        let shape = Shape::rect(size, size)
            .radius(SPACING)
            .fill(self.style.cell)
            .present(present);
        let rect = match before {
            Some(sibling) => scene.insert_before(sibling, shape)?,
            None => scene.add(Some(self.row), shape)?,
        };
        let text = scene.add(
            Some(rect),
            Shape::text(value, font_size)
                .fill(self.style.text)
                .stroke(self.style.text, 0.0),
        )?;
        Ok(Cell { rect, text })
    }

    fn check_index(&self, index: usize, op: &str) -> SaplingResult<()> {
        if index >= self.cells.len() {
            return Err(SaplingError::validation(format!(
                "list {op}: index {index} out of range for length {}",
                self.cells.len()
            )));
        }
        Ok(())
    }

    fn grow(cell: Cell, secs: f64) -> Step {
        all([
            tween_eased(cell.rect, Prop::Width, Value::Scalar(CELL_SIZE), secs, Ease::OutCubic),
            tween_eased(cell.rect, Prop::Height, Value::Scalar(CELL_SIZE), secs, Ease::OutCubic),
            tween_eased(cell.text, Prop::FontSize, Value::Scalar(FONT_SIZE), secs, Ease::OutCubic),
        ])
    }

    fn shrink(cell: Cell, secs: f64) -> Step {
        all([
            tween_eased(cell.rect, Prop::Width, Value::Scalar(0.0), secs, Ease::InCubic),
            tween_eased(cell.rect, Prop::Height, Value::Scalar(0.0), secs, Ease::InCubic),
            tween_eased(cell.text, Prop::FontSize, Value::Scalar(0.0), secs, Ease::InCubic),
        ])
    }

    /// Append `value` at the end.
    pub fn push(&mut self, scene: &mut Scene, value: impl Into<String>, duration: f64) -> SaplingResult<Step> {
        let value = value.into();
        let (p, s) = split(duration);
        let cell = self.add_cell(scene, None, &value, 0.0, 0.0, false)?;
        self.cells.push(cell);
        self.values.push(value);
        Ok(chain([
            tween_eased(
                self.row,
                Prop::PaddingRight,
                Value::Scalar(2.0 * SPACING),
                p,
                Ease::InCubic,
            ),
            set(cell.rect, Prop::Present, Value::Flag(true)),
            set(self.row, Prop::PaddingRight, Value::Scalar(SPACING)),
            Self::grow(cell, s),
        ]))
    }

    /// Remove the last value.
    pub fn pop(&mut self, duration: f64) -> SaplingResult<Step> {
        let cell = self
            .cells
            .pop()
            .ok_or_else(|| SaplingError::validation("list pop: list is empty"))?;
        self.values.pop();
        let (p, s) = split(duration);
        Ok(chain([
            Self::shrink(cell, s),
            tween_eased(self.row, Prop::PaddingRight, Value::Scalar(0.0), p, Ease::OutCubic),
            set(cell.rect, Prop::Present, Value::Flag(false)),
            set(self.row, Prop::PaddingRight, Value::Scalar(SPACING)),
        ]))
    }

    /// Insert `value` so it ends up at `index`.
    pub fn place(
        &mut self,
        scene: &mut Scene,
        value: impl Into<String>,
        index: usize,
        duration: f64,
    ) -> SaplingResult<Step> {
        if index == self.cells.len() {
            return self.push(scene, value, duration);
        }
        self.check_index(index, "place")?;
        let value = value.into();
        let (p, s) = split(duration);
        let next = self.cells[index];
        let cell = self.add_cell(scene, Some(next.rect), &value, 0.0, 0.0, false)?;
        self.cells.insert(index, cell);
        self.values.insert(index, value);
        Ok(chain([
            tween_eased(next.rect, Prop::MarginLeft, Value::Scalar(SPACING), p, Ease::InCubic),
            set(cell.rect, Prop::Present, Value::Flag(true)),
            set(next.rect, Prop::MarginLeft, Value::Scalar(0.0)),
            Self::grow(cell, s),
        ]))
    }

    /// Remove the value at `index`.
    pub fn delete(&mut self, index: usize, duration: f64) -> SaplingResult<Step> {
        self.check_index(index, "delete")?;
        if index + 1 == self.cells.len() {
            return self.pop(duration);
        }
        let (p, s) = split(duration);
        let cell = self.cells.remove(index);
        self.values.remove(index);
        let next = self.cells[index];
        Ok(chain([
            Self::shrink(cell, s),
            set(next.rect, Prop::MarginLeft, Value::Scalar(SPACING)),
            set(cell.rect, Prop::Present, Value::Flag(false)),
            tween_eased(next.rect, Prop::MarginLeft, Value::Scalar(0.0), p, Ease::OutCubic),
        ]))
    }

    /// Replace the value at `index`, shrinking the old text out and the new one in.
    pub fn set(&mut self, value: impl Into<String>, index: usize, duration: f64) -> SaplingResult<Step> {
        self.check_index(index, "set")?;
        let value = value.into();
        let text = self.cells[index].text;
        self.values[index] = value.clone();
        Ok(chain([
            tween(text, Prop::FontSize, Value::Scalar(0.0), duration * 0.5),
            set(text, Prop::Text, Value::Text(value)),
            tween(text, Prop::FontSize, Value::Scalar(FONT_SIZE), duration * 0.5),
        ]))
    }

    /// Outline the text at `index` and dim every other one.
    pub fn highlight(&self, index: usize, duration: f64) -> SaplingResult<Step> {
        self.check_index(index, "highlight")?;
        Ok(all(self.cells.iter().enumerate().map(|(i, c)| {
            if i == index {
                tween(c.text, Prop::LineWidth, Value::Scalar(2.0), duration)
            } else {
                tween(c.text, Prop::Opacity, Value::Scalar(0.5), duration)
            }
        })))
    }

    pub fn unhighlight(&self, duration: f64) -> Step {
        all(self.cells.iter().flat_map(|c| {
            [
                tween(c.text, Prop::Opacity, Value::Scalar(1.0), duration),
                tween(c.text, Prop::LineWidth, Value::Scalar(0.0), duration),
            ]
        }))
    }

    /// Rotate every text to `degrees`.
    pub fn turn(&self, degrees: f64, duration: f64) -> Step {
        all(self
            .cells
            .iter()
            .map(|c| tween(c.text, Prop::Rotation, Value::Scalar(degrees), duration)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/components/list.rs"]
mod tests;
