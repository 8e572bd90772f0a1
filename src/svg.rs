//! SVG export of a `Drawing`.
//!
//! Logical coordinates are stretched to fill the requested pixel size (no
//! aspect correction), with the y axis flipped. Font sizes are points at
//! 100 dpi on the default 10 x 5 inch canvas and scale with the width.
use std::fmt;

use crate::drawing::{Color, Drawing, Element, FontWeight, HAlign, Point, TextStyle, VAlign};

pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 500;

const TITLE_FONT_SIZE: f64 = 12.0;
const TITLE_MARGIN: f64 = 6.0;
/// matplotlib's default arrow head length relative to its width.
const HEAD_LENGTH_RATIO: f64 = 1.5;

/// Render `drawing` as a standalone SVG document.
pub fn to_svg(drawing: &Drawing, width: u32, height: u32) -> String {
    Svg {
        drawing,
        width: f64::from(width),
        height: f64::from(height),
    }
    .to_string()
}

struct Svg<'a> {
    drawing: &'a Drawing,
    width: f64,
    height: f64,
}

impl Svg<'_> {
    fn map(&self, p: Point) -> (f64, f64) {
        let e = &self.drawing.extent;
        (
            (p.x - e.x_min) / e.width() * self.width,
            (e.y_max - p.y) / e.height() * self.height,
        )
    }

    fn scale_x(&self, dx: f64) -> f64 {
        dx / self.drawing.extent.width() * self.width
    }

    fn scale_y(&self, dy: f64) -> f64 {
        dy / self.drawing.extent.height() * self.height
    }

    /// Typographic points (also used for stroke widths) to pixels.
    fn points_to_px(&self, points: f64) -> f64 {
        points * 100.0 / 72.0 * self.width / f64::from(DEFAULT_WIDTH)
    }

    fn write_text(
        &self,
        f: &mut fmt::Formatter<'_>,
        (x, y): (f64, f64),
        content: &str,
        style: &TextStyle,
    ) -> fmt::Result {
        let anchor = match style.h_align {
            HAlign::Left => "start",
            HAlign::Center => "middle",
            HAlign::Right => "end",
        };
        write!(
            f,
            r#"<text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{:.2}" text-anchor="{}""#,
            x,
            y,
            self.points_to_px(style.font_size),
            anchor
        )?;
        if style.v_align == VAlign::Center {
            f.write_str(r#" dominant-baseline="central""#)?;
        }
        if style.weight == FontWeight::Bold {
            f.write_str(r#" font-weight="bold""#)?;
        }
        writeln!(f, ">{}</text>", escape(content))
    }

    fn write_arrow(
        &self,
        f: &mut fmt::Formatter<'_>,
        origin: Point,
        (dx, dy): (f64, f64),
        head_width: f64,
        color: Color,
    ) -> fmt::Result {
        let tip = Point::new(origin.x + dx, origin.y + dy);
        let length = dx.hypot(dy);
        if length == 0.0 {
            return Ok(());
        }
        let (ux, uy) = (dx / length, dy / length);
        let head_length = head_width * HEAD_LENGTH_RATIO;
        let half = head_width / 2.0;
        let point = Point::new(tip.x + ux * head_length, tip.y + uy * head_length);
        let left = Point::new(tip.x - uy * half, tip.y + ux * half);
        let right = Point::new(tip.x + uy * half, tip.y - ux * half);

        let (x1, y1) = self.map(origin);
        let (x2, y2) = self.map(tip);
        writeln!(
            f,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="1.5"/>"#,
            x1,
            y1,
            x2,
            y2,
            color.as_css()
        )?;
        let corners: Vec<String> = [point, left, right]
            .into_iter()
            .map(|p| {
                let (x, y) = self.map(p);
                format!("{:.2},{:.2}", x, y)
            })
            .collect();
        writeln!(
            f,
            r#"<polygon points="{}" fill="{}"/>"#,
            corners.join(" "),
            color.as_css()
        )
    }
}

impl fmt::Display for Svg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        )?;
        writeln!(f, r#"<rect width="100%" height="100%" fill="white"/>"#)?;

        for element in &self.drawing.elements {
            match element {
                Element::Ellipse {
                    center,
                    width,
                    height,
                    style,
                } => {
                    let (cx, cy) = self.map(*center);
                    writeln!(
                        f,
                        r#"<ellipse cx="{:.2}" cy="{:.2}" rx="{:.2}" ry="{:.2}" fill="{}" stroke="{}"/>"#,
                        cx,
                        cy,
                        self.scale_x(width / 2.0),
                        self.scale_y(height / 2.0),
                        style.fill.as_css(),
                        style.stroke.as_css()
                    )?;
                }
                Element::Line {
                    from,
                    to,
                    color,
                    width,
                } => {
                    let (x1, y1) = self.map(*from);
                    let (x2, y2) = self.map(*to);
                    writeln!(
                        f,
                        r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{:.2}"/>"#,
                        x1,
                        y1,
                        x2,
                        y2,
                        color.as_css(),
                        self.points_to_px(*width)
                    )?;
                }
                Element::Rectangle {
                    origin,
                    width,
                    height,
                    style,
                } => {
                    // SVG anchors rectangles at the top-left corner.
                    let (x, y) = self.map(Point::new(origin.x, origin.y + height));
                    writeln!(
                        f,
                        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" stroke="{}"/>"#,
                        x,
                        y,
                        self.scale_x(*width),
                        self.scale_y(*height),
                        style.fill.as_css(),
                        style.stroke.as_css()
                    )?;
                }
                Element::Text {
                    position,
                    content,
                    style,
                } => self.write_text(f, self.map(*position), content, style)?,
                Element::Arrow {
                    origin,
                    dx,
                    dy,
                    head_width,
                    color,
                } => self.write_arrow(f, *origin, (*dx, *dy), *head_width, *color)?,
            }
        }

        if self.drawing.show_axes {
            writeln!(
                f,
                r#"<rect width="{}" height="{}" fill="none" stroke="black"/>"#,
                self.width, self.height
            )?;
        }
        if let Some(title) = &self.drawing.title {
            let style = TextStyle::plain(TITLE_FONT_SIZE).align(HAlign::Center);
            let y = self.points_to_px(TITLE_FONT_SIZE) + TITLE_MARGIN;
            self.write_text(f, (self.width / 2.0, y), title, &style)?;
        }
        f.write_str("</svg>\n")
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::{Extent, ShapeStyle};

    fn canvas() -> Drawing {
        Drawing::new(Extent {
            x_min: 0.0,
            x_max: 10.0,
            y_min: 0.0,
            y_max: 5.0,
        })
    }

    #[test]
    fn empty_drawing_is_a_bare_document() {
        let svg = to_svg(&canvas(), 200, 100);
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100""#));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(!svg.contains("<text"));
    }

    #[test]
    fn y_axis_is_flipped() {
        let mut d = canvas();
        d.push(Element::Rectangle {
            origin: Point::new(1.0, 1.0),
            width: 2.0,
            height: 1.0,
            style: ShapeStyle {
                fill: Color::Red,
                stroke: Color::Black,
            },
        });
        let svg = to_svg(&d, 1000, 500);
        // top edge at y = 2 -> 500 * (5 - 2) / 5
        assert!(svg.contains(r#"<rect x="100.00" y="300.00" width="200.00" height="100.00" fill="red" stroke="black"/>"#));
    }

    #[test]
    fn text_is_escaped_and_aligned() {
        let mut d = canvas();
        d.push(Element::Text {
            position: Point::new(5.0, 2.5),
            content: "a < b & c".to_owned(),
            style: TextStyle::plain(10.0).centered().bold(),
        });
        let svg = to_svg(&d, 1000, 500);
        assert!(svg.contains("a &lt; b &amp; c"));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains(r#"dominant-baseline="central""#));
        assert!(svg.contains(r#"font-weight="bold""#));
    }

    #[test]
    fn arrow_has_shaft_and_head() {
        let mut d = canvas();
        d.push(Element::Arrow {
            origin: Point::new(1.0, 1.0),
            dx: 1.0,
            dy: 0.0,
            head_width: 0.2,
            color: Color::Blue,
        });
        let svg = to_svg(&d, 1000, 500);
        assert_eq!(svg.matches("<line").count(), 1);
        assert_eq!(svg.matches("<polygon").count(), 1);
        assert!(svg.contains(r#"fill="blue""#));
    }

    #[test]
    fn title_and_axes_frame() {
        let mut d = canvas();
        d.title = Some("Title".to_owned());
        d.show_axes = true;
        let svg = to_svg(&d, 1000, 500);
        assert!(svg.contains(">Title</text>"));
        assert!(svg.contains(r#"fill="none" stroke="black""#));
    }
}
