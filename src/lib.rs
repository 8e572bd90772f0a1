pub mod constants;
pub mod diagram;
pub mod drawing;
pub mod ions;
pub mod potential;
pub mod svg;

pub use diagram::{render_diagram, voltmeter_label};
pub use drawing::{Drawing, Element, ElementKind};
pub use ions::{Ion, IonParameters};
pub use potential::{
    InvalidReason, MembranePotential, PotentialError, compute_potential, format_metric,
    nernst_potential,
};
pub use svg::to_svg;

/// Python bindings for the Streamlit front end.
#[cfg(feature = "python")]
#[pyo3::pymodule]
mod goldman_rs {
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;
    use pyo3::types::PyDict;

    use crate::constants::{DEFAULTS, GHK_EQUATION_LATEX, controls};
    use crate::drawing::{Element, FontWeight, HAlign, VAlign};
    use crate::{IonParameters, MembranePotential, PotentialError};

    fn value_error(err: PotentialError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    #[pyfunction]
    fn rust_version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    #[pyfunction]
    fn ghk_equation_latex() -> &'static str {
        GHK_EQUATION_LATEX
    }

    /// Resting potential [mV]; raises ValueError when the equation is undefined.
    #[pyfunction]
    #[pyo3(
        name = "compute_potential",
        signature = (
            k_out = DEFAULTS[0], k_in = DEFAULTS[1],
            na_out = DEFAULTS[2], na_in = DEFAULTS[3],
            cl_out = DEFAULTS[4], cl_in = DEFAULTS[5],
            ca_out = DEFAULTS[6], ca_in = DEFAULTS[7],
            p_k = DEFAULTS[8], p_na = DEFAULTS[9], p_cl = DEFAULTS[10], p_ca = DEFAULTS[11]
        )
    )]
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn py_compute_potential(
        k_out: f64,
        k_in: f64,
        na_out: f64,
        na_in: f64,
        cl_out: f64,
        cl_in: f64,
        ca_out: f64,
        ca_in: f64,
        p_k: f64,
        p_na: f64,
        p_cl: f64,
        p_ca: f64,
    ) -> PyResult<f64> {
        let params = IonParameters {
            k_out,
            k_in,
            na_out,
            na_in,
            cl_out,
            cl_in,
            ca_out,
            ca_in,
            p_k,
            p_na,
            p_cl,
            p_ca,
        };
        crate::compute_potential(params)
            .map(MembranePotential::millivolts)
            .map_err(value_error)
    }

    /// `ion` is one of "K", "Na", "Cl", "Ca".
    #[pyfunction]
    #[pyo3(name = "nernst_potential")]
    fn py_nernst_potential(ion: &str, c_out: f64, c_in: f64) -> PyResult<f64> {
        let ion = ion
            .parse::<crate::Ion>()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        crate::nernst_potential(ion, c_out, c_in)
            .map(MembranePotential::millivolts)
            .map_err(value_error)
    }

    #[pyfunction]
    #[pyo3(name = "format_metric")]
    fn py_format_metric(vm: f64) -> String {
        crate::format_metric(MembranePotential(vm))
    }

    #[pyfunction]
    #[pyo3(name = "voltmeter_label")]
    fn py_voltmeter_label(vm: f64) -> String {
        crate::voltmeter_label(MembranePotential(vm))
    }

    #[pyfunction]
    fn default_parameters<'py>(py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new(py);
        for (name, value) in IonParameters::default().named() {
            dict.set_item(name, value)?;
        }
        Ok(dict)
    }

    /// {name: (min, max)} ranges for the input controls.
    #[pyfunction]
    fn parameter_bounds<'py>(py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new(py);
        for control in controls() {
            dict.set_item(control.name, (control.min, control.max))?;
        }
        Ok(dict)
    }

    /// {name: step} slider increments; `None` for free numeric inputs.
    #[pyfunction]
    pub(crate) fn parameter_steps<'py>(py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new(py);
        for control in controls() {
            dict.set_item(control.name, control.step)?;
        }
        Ok(dict)
    }

    fn element_to_dict<'py>(py: Python<'py>, element: &Element) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new(py);
        dict.set_item("kind", element.kind().name())?;
        match element {
            Element::Ellipse {
                center,
                width,
                height,
                style,
            } => {
                dict.set_item("center", (center.x, center.y))?;
                dict.set_item("width", *width)?;
                dict.set_item("height", *height)?;
                dict.set_item("fill", style.fill.as_css())?;
                dict.set_item("stroke", style.stroke.as_css())?;
            }
            Element::Line {
                from,
                to,
                color,
                width,
            } => {
                dict.set_item("from", (from.x, from.y))?;
                dict.set_item("to", (to.x, to.y))?;
                dict.set_item("color", color.as_css())?;
                dict.set_item("width", *width)?;
            }
            Element::Rectangle {
                origin,
                width,
                height,
                style,
            } => {
                dict.set_item("origin", (origin.x, origin.y))?;
                dict.set_item("width", *width)?;
                dict.set_item("height", *height)?;
                dict.set_item("fill", style.fill.as_css())?;
                dict.set_item("stroke", style.stroke.as_css())?;
            }
            Element::Text {
                position,
                content,
                style,
            } => {
                dict.set_item("position", (position.x, position.y))?;
                dict.set_item("content", content.as_str())?;
                dict.set_item("font_size", style.font_size)?;
                let ha = match style.h_align {
                    HAlign::Left => "left",
                    HAlign::Center => "center",
                    HAlign::Right => "right",
                };
                let va = match style.v_align {
                    VAlign::Baseline => "baseline",
                    VAlign::Center => "center",
                };
                dict.set_item("ha", ha)?;
                dict.set_item("va", va)?;
                dict.set_item("bold", style.weight == FontWeight::Bold)?;
            }
            Element::Arrow {
                origin,
                dx,
                dy,
                head_width,
                color,
            } => {
                dict.set_item("origin", (origin.x, origin.y))?;
                dict.set_item("dx", *dx)?;
                dict.set_item("dy", *dy)?;
                dict.set_item("head_width", *head_width)?;
                dict.set_item("color", color.as_css())?;
            }
        }
        Ok(dict)
    }

    /// The diagram as plain Python data, ready for matplotlib or any other backend.
    #[pyfunction]
    #[pyo3(name = "render_diagram")]
    pub(crate) fn py_render_diagram<'py>(py: Python<'py>, vm: f64) -> PyResult<Bound<'py, PyDict>> {
        let drawing = crate::render_diagram(MembranePotential(vm));
        let e = drawing.extent;
        let elements = drawing
            .elements
            .iter()
            .map(|el| element_to_dict(py, el))
            .collect::<PyResult<Vec<_>>>()?;

        let dict = PyDict::new(py);
        dict.set_item("extent", (e.x_min, e.x_max, e.y_min, e.y_max))?;
        dict.set_item("title", drawing.title)?;
        dict.set_item("show_axes", drawing.show_axes)?;
        dict.set_item("elements", elements)?;
        Ok(dict)
    }

    #[pyfunction]
    #[pyo3(
        name = "render_svg",
        signature = (vm, width = crate::svg::DEFAULT_WIDTH, height = crate::svg::DEFAULT_HEIGHT)
    )]
    pub(crate) fn py_render_svg(vm: f64, width: u32, height: u32) -> String {
        crate::to_svg(&crate::render_diagram(MembranePotential(vm)), width, height)
    }
}

#[cfg(all(test, feature = "python"))]
mod python_tests {
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;
    use pyo3::types::{IntoPyDict, PyDict};

    use crate::goldman_rs;

    #[test]
    fn keyword_defaults_give_resting_neuron() {
        Python::initialize();
        Python::attach(|py| {
            let f = wrap_pyfunction!(goldman_rs::py_compute_potential, py).unwrap();
            let vm: f64 = f.call0().unwrap().extract().unwrap();
            assert!((vm - (-61.4733)).abs() < 1e-3, "{}", vm);

            let kwargs = [("k_in", 0.0)].into_py_dict(py).unwrap();
            let err = f.call((), Some(&kwargs)).unwrap_err();
            assert!(err.is_instance_of::<PyValueError>(py));
        });
    }

    #[test]
    fn diagram_and_controls_cross_the_boundary() {
        Python::initialize();
        Python::attach(|py| {
            let diagram = goldman_rs::py_render_diagram(py, -72.3).unwrap();
            let elements = diagram.get_item("elements").unwrap().unwrap();
            assert_eq!(elements.len().unwrap(), 28);
            assert!(goldman_rs::py_render_svg(-72.3, 1000, 500).contains("Vm = -72.3 mV"));

            let steps: Bound<'_, PyDict> = goldman_rs::parameter_steps(py).unwrap();
            assert_eq!(steps.len(), 12);
            let ca_in = steps.get_item("ca_in").unwrap().unwrap();
            assert!(ca_in.is_none());
            let p_k: f64 = steps.get_item("p_k").unwrap().unwrap().extract().unwrap();
            assert_eq!(p_k, 0.001);
        });
    }
}
