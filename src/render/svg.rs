use crate::{
    foundation::core::{Canvas, Rgba8},
    scene::evaluator::{EvaluatedFrame, EvaluatedShape},
    scene::model::ShapeKind,
};

/// Font stack used for every label.
pub const FONT_FAMILY: &str = "JetBrains Mono, DejaVu Sans Mono, monospace";

/// Serialize one evaluated frame as a standalone SVG document.
///
/// Scene coordinates have their origin at the canvas centre with y pointing down.
pub fn frame_to_svg(frame: &EvaluatedFrame, canvas: Canvas, background: Rgba8) -> String {
    let (w, h) = (canvas.width, canvas.height);
    let mut out = String::with_capacity(256 + frame.shapes.len() * 160);
    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    ));
    if background.a > 0 {
        out.push_str(&format!(
            r#"<rect width="{w}" height="{h}"{}/>"#,
            paint("fill", background)
        ));
    }
    out.push_str(&format!(
        r#"<g transform="translate({} {})">"#,
        f64::from(w) / 2.0,
        f64::from(h) / 2.0
    ));
    for shape in &frame.shapes {
        out.push_str(&shape_svg(shape));
    }
    out.push_str("</g></svg>");
    out
}

fn shape_svg(shape: &EvaluatedShape) -> String {
    let [a, b, c, d, e, f] = shape.transform.as_coeffs();
    let opacity = if shape.opacity < 1.0 {
        format!(r#" opacity="{}""#, shape.opacity)
    } else {
        String::new()
    };

    let p = &shape.props;
    let body = match shape.kind {
        ShapeKind::Group => String::new(),
        ShapeKind::Circle => format!(
            r#"<circle r="{}"{}{}/>"#,
            p.width / 2.0,
            paint("fill", p.fill),
            stroke(p.stroke, p.line_width)
        ),
        ShapeKind::Line => {
            let [from, to] = p.points;
            format!(
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" fill="none"{} stroke-linecap="round"/>"#,
                from.x,
                from.y,
                to.x,
                to.y,
                stroke(p.stroke, p.line_width)
            )
        }
        ShapeKind::Rect | ShapeKind::Row(_) => {
            let rx = p.radius.min(p.width / 2.0).min(p.height / 2.0).max(0.0);
            format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{rx}"{}{}/>"#,
                -p.width / 2.0,
                -p.height / 2.0,
                p.width,
                p.height,
                paint("fill", p.fill),
                stroke(p.stroke, p.line_width)
            )
        }
        ShapeKind::Text => format!(
            r#"<text font-family="{FONT_FAMILY}" font-size="{}" text-anchor="middle" dominant-baseline="central" xml:space="preserve"{}{}>{}</text>"#,
            p.font_size,
            paint("fill", p.fill),
            stroke(p.stroke, p.line_width),
            escape(&p.text)
        ),
    };
    format!(r#"<g transform="matrix({a} {b} {c} {d} {e} {f})"{opacity}>{body}</g>"#)
}

fn paint(attr: &str, c: Rgba8) -> String {
    if c.a == 0 {
        return format!(r#" {attr}="none""#);
    }
    let mut s = format!(r##" {attr}="#{:02x}{:02x}{:02x}""##, c.r, c.g, c.b);
    if c.a < 255 {
        s.push_str(&format!(r#" {attr}-opacity="{}""#, c.alpha_f64()));
    }
    s
}

fn stroke(c: Rgba8, width: f64) -> String {
    if width <= 0.0 || c.a == 0 {
        return String::new();
    }
    format!(r#"{} stroke-width="{width}""#, paint("stroke", c))
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
