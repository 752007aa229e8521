use crate::{
    foundation::core::Vec2,
    foundation::error::SaplingResult,
    scene::model::{Align, HandleId, Props, RowLayout, Scene, ShapeKind},
};

/// Size rows to their content and position their present children.
///
/// `props` is indexed by handle and holds the already-sampled values for one frame. Rows are
/// resolved innermost first so nested rows report their final size to the outer row.
pub fn apply_row_layout(scene: &Scene, props: &mut [Props]) -> SaplingResult<()> {
    let order = scene.tree_order();
    for &id in order.iter().rev() {
        if let ShapeKind::Row(layout) = scene.shape(id)?.kind {
            layout_row(scene, id, layout, props)?;
        }
    }
    Ok(())
}

fn layout_row(
    scene: &Scene,
    row: HandleId,
    layout: RowLayout,
    props: &mut [Props],
) -> SaplingResult<()> {
    let children: Vec<HandleId> = scene
        .children(row)?
        .iter()
        .copied()
        .filter(|c| props[c.0 as usize].present)
        .collect();

    let mut content_w = 0.0;
    let mut content_h = 0.0f64;
    for (i, c) in children.iter().enumerate() {
        let p = &props[c.0 as usize];
        if i > 0 {
            content_w += layout.gap;
        }
        content_w += p.margin_left + p.width + p.margin_right;
        content_h = content_h.max(p.height);
    }

    let (pad_l, pad_r) = {
        let rp = &props[row.0 as usize];
        (rp.padding_left, rp.padding_right)
    };
    let width = pad_l + content_w + pad_r;
    let height = layout
        .fixed_height
        .unwrap_or(layout.padding_top + content_h + layout.padding_bottom);

    let mut cursor = -width / 2.0 + pad_l;
    for (i, c) in children.iter().enumerate() {
        if i > 0 {
            cursor += layout.gap;
        }
        let p = &mut props[c.0 as usize];
        cursor += p.margin_left;
        let x = cursor + p.width / 2.0;
        let y = match layout.align {
            Align::Start => -height / 2.0 + layout.padding_top + p.height / 2.0,
            Align::Center => (layout.padding_top - layout.padding_bottom) / 2.0,
            Align::End => height / 2.0 - layout.padding_bottom - p.height / 2.0,
        };
        p.position = Vec2::new(x, y);
        cursor += p.width + p.margin_right;
    }

    let rp = &mut props[row.0 as usize];
    rp.width = width;
    rp.height = height;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/layout.rs"]
mod tests;
