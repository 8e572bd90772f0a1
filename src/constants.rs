//! Fixed values shared by the calculator and the presentation layer.
//!
//! The calculator itself only depends on `GHK_FACTOR`. Defaults, bounds and
//! steps describe the controls of the interactive page and are exposed so
//! that every front end offers the same ranges.

/// GHK factor in mV: RT/F at 37 °C with the ln -> log10 conversion folded in.
pub const GHK_FACTOR: f64 = 61.54;

/// Number of scalar inputs to the GHK equation.
pub const N_PARAMS: usize = 12;

/// Parameter names in array order.
pub const PARAM_NAMES: &[&str] = &[
    "k_out", "k_in", "na_out", "na_in", "cl_out", "cl_in", "ca_out", "ca_in", "p_k", "p_na",
    "p_cl", "p_ca",
];

/// Resting values shown when the page first loads, in `PARAM_NAMES` order.
pub const DEFAULTS: &[f64] = &[
    5.0, 100.0, // K+ [mM]
    150.0, 15.0, // Na+ [mM]
    150.0, 13.0, // Cl- [mM]
    2.0, 0.0002, // Ca2+ [mM]
    1.0, 0.04, 0.45, 0.001, // relative permeabilities [-]
];

/// Control ranges as (min, max), in `PARAM_NAMES` order.
///
/// Intracellular calcium is a free numeric input rather than a slider, so
/// it has no upper limit; its lower limit is the smallest positive `f64`
/// because every concentration must be strictly positive.
pub const PARAM_BOUNDS: &[(f64, f64)] = &[
    (1.0, 200.0), // k_out
    (1.0, 200.0), // k_in
    (1.0, 200.0), // na_out
    (1.0, 150.0), // na_in
    (1.0, 200.0), // cl_out
    (1.0, 200.0), // cl_in
    (1.0, 5.0),   // ca_out
    (f64::MIN_POSITIVE, f64::INFINITY), // ca_in
    (0.0, 2.0),   // p_k
    (0.0, 1.0),   // p_na
    (0.0, 1.0),   // p_cl
    (0.0, 1.0),   // p_ca
];

/// Slider increments, in `PARAM_NAMES` order. `None` for free inputs.
pub const PARAM_STEPS: &[Option<f64>] = &[
    Some(1.0),
    Some(1.0),
    Some(1.0),
    Some(1.0),
    Some(1.0),
    Some(1.0),
    Some(0.01),
    None,
    Some(0.001),
    Some(0.001),
    Some(0.001),
    Some(0.001),
];

/// One input control of the interactive page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Control {
    pub name: &'static str,
    pub default: f64,
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
}

/// Default, range and step of every parameter, in `PARAM_NAMES` order.
pub fn controls() -> impl Iterator<Item = Control> {
    PARAM_NAMES
        .iter()
        .zip(DEFAULTS)
        .zip(PARAM_BOUNDS)
        .zip(PARAM_STEPS)
        .map(|(((&name, &default), &(min, max)), &step)| Control {
            name,
            default,
            min,
            max,
            step,
        })
}

/// The equation as displayed under the diagram.
pub const GHK_EQUATION_LATEX: &str = r"V_m = 61.54 \cdot \log_{10}\left( \frac{P_K[K^+]_o + P_{Na}[Na^+]_o + P_{Cl}[Cl^-]_i + P_{Ca}[Ca^{2+}]_o}{P_K[K^+]_i + P_{Na}[Na^+]_i + P_{Cl}[Cl^-]_o + P_{Ca}[Ca^{2+}]_i} \right)";
