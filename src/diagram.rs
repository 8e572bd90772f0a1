//! Illustrative neuron diagram: soma, axon, a column of K⁺/Na⁺ channels,
//! the Na⁺/K⁺ pump and a voltmeter showing the computed potential.
//!
//! The layout is fixed; only the voltmeter text depends on the input.
use itertools::{Itertools, iproduct};
use log::debug;

use crate::drawing::{
    Color, Drawing, Element, Extent, HAlign, Point, ShapeStyle, TextStyle,
};
use crate::ions::Ion;
use crate::potential::MembranePotential;

pub const EXTENT: Extent = Extent {
    x_min: 0.0,
    x_max: 12.0,
    y_min: 0.0,
    y_max: 6.0,
};

pub const TITLE: &str = "Neuron at rest";

// Soma
pub const SOMA_CENTER: Point = Point::new(3.0, 3.0);
pub const SOMA_WIDTH: f64 = 2.0;
pub const SOMA_HEIGHT: f64 = 2.5;
pub const SOMA_FILL: Color = Color::Hex("#A9CCE3");
pub const SOMA_LABEL: &str = "NEURON";

// Axon
pub const AXON_START: Point = Point::new(4.0, 3.0);
pub const AXON_END: Point = Point::new(9.0, 3.0);
pub const AXON_WIDTH: f64 = 4.0;

// Voltmeter
pub const VOLTMETER_ORIGIN: Point = Point::new(9.5, 2.5);
pub const VOLTMETER_WIDTH: f64 = 2.0;
pub const VOLTMETER_HEIGHT: f64 = 1.0;
pub const VOLTMETER_FILL: Color = Color::Hex("#FADBD8");
pub const VOLTMETER_FONT_SIZE: f64 = 14.0;

// Channels
pub const CHANNEL_ROWS: [f64; 5] = [2.0, 2.5, 3.0, 3.5, 4.0];
pub const CHANNEL_WIDTH: f64 = 2.0;
pub const CHANNEL_FONT_SIZE: f64 = 8.0;

// Pump
pub const PUMP_LABEL: &str = "Na/K pump";
pub const PUMP_LABEL_POSITION: Point = Point::new(3.0, 0.8);
pub const PUMP_FONT_SIZE: f64 = 9.0;
pub const PUMP_ARROW_HEAD: f64 = 0.1;

/// One channel glyph: a short segment with the ion symbol beside it.
struct ChannelGlyph {
    ion: Ion,
    x_from: f64,
    x_to: f64,
    label_x: f64,
    label_align: HAlign,
    color: Color,
}

/// K⁺ on the outer edge of the soma, Na⁺ on the inner edge.
const CHANNEL_GLYPHS: [ChannelGlyph; 2] = [
    ChannelGlyph {
        ion: Ion::Potassium,
        x_from: 2.0,
        x_to: 2.3,
        label_x: 1.9,
        label_align: HAlign::Right,
        color: Color::Orange,
    },
    ChannelGlyph {
        ion: Ion::Sodium,
        x_from: 3.7,
        x_to: 4.0,
        label_x: 4.1,
        label_align: HAlign::Left,
        color: Color::Red,
    },
];

/// (origin, dx, dy, color) of the two pump arrows: Na⁺ out, K⁺ in.
const PUMP_ARROWS: [(Point, f64, f64, Color); 2] = [
    (Point::new(2.6, 1.1), 0.3, 0.6, Color::Blue),
    (Point::new(3.4, 1.7), -0.3, -0.6, Color::Orange),
];

/// Voltmeter readout: one decimal.
pub fn voltmeter_label(vm: MembranePotential) -> String {
    format!("Vm = {:.1} mV", vm.0)
}

fn outlined(fill: Color) -> ShapeStyle {
    ShapeStyle {
        fill,
        stroke: Color::Black,
    }
}

fn channel_elements(y: f64, glyph: &ChannelGlyph) -> [Element; 2] {
    [
        Element::Line {
            from: Point::new(glyph.x_from, y),
            to: Point::new(glyph.x_to, y),
            color: glyph.color,
            width: CHANNEL_WIDTH,
        },
        Element::Text {
            position: Point::new(glyph.label_x, y),
            content: glyph.ion.symbol().to_owned(),
            style: TextStyle::plain(CHANNEL_FONT_SIZE).align(glyph.label_align),
        },
    ]
}

/// Lay out the diagram for `vm`.
///
/// `vm` is shown as given, without validation; NaN and infinities are
/// printed the way Rust formats them.
pub fn render_diagram(vm: MembranePotential) -> Drawing {
    let mut drawing = Drawing::new(EXTENT);
    drawing.title = Some(TITLE.to_owned());

    drawing.push(Element::Ellipse {
        center: SOMA_CENTER,
        width: SOMA_WIDTH,
        height: SOMA_HEIGHT,
        style: outlined(SOMA_FILL),
    });
    drawing.push(Element::Text {
        position: SOMA_CENTER,
        content: SOMA_LABEL.to_owned(),
        style: TextStyle::plain(10.0).centered().bold(),
    });

    drawing.push(Element::Line {
        from: AXON_START,
        to: AXON_END,
        color: Color::Gray,
        width: AXON_WIDTH,
    });

    drawing.push(Element::Rectangle {
        origin: VOLTMETER_ORIGIN,
        width: VOLTMETER_WIDTH,
        height: VOLTMETER_HEIGHT,
        style: outlined(VOLTMETER_FILL),
    });
    drawing.push(Element::Text {
        position: Point::new(
            VOLTMETER_ORIGIN.x + VOLTMETER_WIDTH / 2.0,
            VOLTMETER_ORIGIN.y + VOLTMETER_HEIGHT / 2.0,
        ),
        content: voltmeter_label(vm),
        style: TextStyle::plain(VOLTMETER_FONT_SIZE).centered().bold(),
    });

    drawing.elements.extend(
        iproduct!(CHANNEL_ROWS, CHANNEL_GLYPHS.iter())
            .flat_map(|(y, glyph)| channel_elements(y, glyph)),
    );

    drawing.push(Element::Text {
        position: PUMP_LABEL_POSITION,
        content: PUMP_LABEL.to_owned(),
        style: TextStyle::plain(PUMP_FONT_SIZE).align(HAlign::Center),
    });
    for (origin, dx, dy, color) in PUMP_ARROWS {
        drawing.push(Element::Arrow {
            origin,
            dx,
            dy,
            head_width: PUMP_ARROW_HEAD,
            color,
        });
    }

    debug!(
        "Rendered diagram for {}: {:?}",
        vm,
        drawing
            .elements
            .iter()
            .map(Element::kind)
            .counts()
            .into_iter()
            .sorted()
            .collect::<Vec<_>>()
    );
    drawing
}
