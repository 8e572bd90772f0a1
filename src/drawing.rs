//! Backend-neutral 2D drawing description.
//!
//! A `Drawing` is an ordered list of shape/text/arrow descriptors in logical
//! coordinates (y grows upwards). Front ends rasterize or vectorize it
//! however they like; see `svg` for the bundled exporter.

/// A point in logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Named colours used by the diagram, or an arbitrary hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Gray,
    Orange,
    Red,
    Blue,
    Hex(&'static str),
}

impl Color {
    pub fn as_css(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Gray => "gray",
            Color::Orange => "orange",
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Hex(hex) => hex,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Baseline,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Fill plus outline of a closed shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub fill: Color,
    pub stroke: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_size: f64,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub weight: FontWeight,
}

impl TextStyle {
    /// Left-aligned on the baseline, regular weight.
    pub fn plain(font_size: f64) -> Self {
        TextStyle {
            font_size,
            h_align: HAlign::Left,
            v_align: VAlign::Baseline,
            weight: FontWeight::Normal,
        }
    }

    pub fn align(mut self, h_align: HAlign) -> Self {
        self.h_align = h_align;
        self
    }

    pub fn centered(mut self) -> Self {
        self.h_align = HAlign::Center;
        self.v_align = VAlign::Center;
        self
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    Ellipse,
    Line,
    Rectangle,
    Text,
    Arrow,
}

impl ElementKind {
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Ellipse => "ellipse",
            ElementKind::Line => "line",
            ElementKind::Rectangle => "rectangle",
            ElementKind::Text => "text",
            ElementKind::Arrow => "arrow",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Ellipse {
        center: Point,
        width: f64,
        height: f64,
        style: ShapeStyle,
    },
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: f64,
    },
    /// Axis-aligned; `origin` is the lower-left corner.
    Rectangle {
        origin: Point,
        width: f64,
        height: f64,
        style: ShapeStyle,
    },
    Text {
        position: Point,
        content: String,
        style: TextStyle,
    },
    /// Arrow from `origin` to `origin + (dx, dy)`; the head is drawn past the tip.
    Arrow {
        origin: Point,
        dx: f64,
        dy: f64,
        head_width: f64,
        color: Color,
    },
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Ellipse { .. } => ElementKind::Ellipse,
            Element::Line { .. } => ElementKind::Line,
            Element::Rectangle { .. } => ElementKind::Rectangle,
            Element::Text { .. } => ElementKind::Text,
            Element::Arrow { .. } => ElementKind::Arrow,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Element::Text { content, .. } => Some(content.as_str()),
            _ => None,
        }
    }
}

/// Visible region in logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Extent {
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub extent: Extent,
    pub title: Option<String>,
    pub show_axes: bool,
    pub elements: Vec<Element>,
}

impl Drawing {
    pub fn new(extent: Extent) -> Self {
        Drawing {
            extent,
            title: None,
            show_axes: false,
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(Element::text)
    }

    pub fn of_kind(&self, kind: ElementKind) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(move |e| e.kind() == kind)
    }
}
