//! Integration tests for the GHK calculator and the neuron diagram.
//!
//! Tests validate:
//! - Reference value for a typical neuron
//! - Monotonic response to K+ and Na+ permeability around the default neuron
//! - Single permeant ion limit for each ion
//! - Rejection of undefined inputs
//! - Voltmeter readout and SVG export

use goldman_rs::{
    Element, ElementKind, Ion, IonParameters, MembranePotential, PotentialError, compute_potential,
    format_metric, nernst_potential, render_diagram, to_svg, voltmeter_label,
};

fn reference(p: &IonParameters) -> f64 {
    let num = p.p_k * p.k_out + p.p_na * p.na_out + p.p_cl * p.cl_in + p.p_ca * p.ca_out;
    let den = p.p_k * p.k_in + p.p_na * p.na_in + p.p_cl * p.cl_out + p.p_ca * p.ca_in;
    61.54 * (num / den).log10()
}

fn vm(p: IonParameters) -> f64 {
    compute_potential(p).unwrap().millivolts()
}

#[test]
fn test_reference_scenario() {
    let p = IonParameters {
        k_out: 5.0,
        k_in: 100.0,
        na_out: 150.0,
        na_in: 15.0,
        cl_out: 150.0,
        cl_in: 13.0,
        ca_out: 2.0,
        ca_in: 0.0002,
        p_k: 1.0,
        p_na: 0.04,
        p_cl: 0.45,
        p_ca: 0.001,
    };
    let expected = reference(&p);
    let got = vm(p);
    assert!(
        ((got - expected) / expected).abs() < 1e-6,
        "got {}, expected {}",
        got,
        expected
    );
    assert!((got - (-61.4733)).abs() < 1e-3, "Vm should be about -61.47 mV, got {}", got);
    assert_eq!(format_metric(MembranePotential(got)), "-61.47 mV");
}

#[test]
fn test_potassium_permeability_hyperpolarizes() {
    let base = IonParameters::default();
    assert!(base.k_out < base.k_in);
    let series: Vec<f64> = (0..=20)
        .map(|i| {
            vm(IonParameters {
                p_k: 0.1 * f64::from(i),
                ..base
            })
        })
        .collect();
    assert!(series.windows(2).all(|w| w[1] < w[0]), "{:?}", series);
}

#[test]
fn test_sodium_permeability_depolarizes() {
    let base = IonParameters::default();
    assert!(base.na_out > base.na_in);
    let series: Vec<f64> = (0..=20)
        .map(|i| {
            vm(IonParameters {
                p_na: 0.05 * f64::from(i),
                ..base
            })
        })
        .collect();
    assert!(series.windows(2).all(|w| w[1] > w[0]), "{:?}", series);
}

#[test]
fn test_single_permeant_ion_matches_nernst() {
    let base = IonParameters::default();
    for ion in Ion::ALL {
        let only = IonParameters {
            p_k: if ion == Ion::Potassium { 1.0 } else { 0.0 },
            p_na: if ion == Ion::Sodium { 1.0 } else { 0.0 },
            p_cl: if ion == Ion::Chloride { 1.0 } else { 0.0 },
            p_ca: if ion == Ion::Calcium { 1.0 } else { 0.0 },
            ..base
        };
        let (c_out, c_in) = base.concentrations(ion);
        let ghk = vm(only);
        let nernst = nernst_potential(ion, c_out, c_in).unwrap().millivolts();
        assert!((ghk - nernst).abs() < 1e-9, "{}: {} vs {}", ion, ghk, nernst);
    }

    let v = vm(IonParameters {
        p_na: 0.0,
        p_cl: 0.0,
        p_ca: 0.0,
        ..base
    });
    assert!((v - 61.54 * (5.0f64 / 100.0).log10()).abs() < 1e-9);
}

#[test]
fn test_unit_concentrations_give_zero() {
    let p = IonParameters {
        k_out: 1.0,
        k_in: 1.0,
        na_out: 1.0,
        na_in: 1.0,
        cl_out: 1.0,
        cl_in: 1.0,
        ca_out: 1.0,
        ca_in: 1.0,
        p_k: 1.0,
        p_na: 0.0,
        p_cl: 0.0,
        p_ca: 0.0,
    };
    assert_eq!(vm(p), 0.0);
}

#[test]
fn test_invalid_parameters_are_rejected() {
    let base = IonParameters::default();
    let invalid = [
        IonParameters { k_in: 0.0, ..base },
        IonParameters { ca_in: -1.0, ..base },
        IonParameters { p_cl: -0.5, ..base },
        IonParameters {
            na_out: f64::NAN,
            ..base
        },
        IonParameters {
            p_k: 0.0,
            p_na: 0.0,
            p_cl: 0.0,
            p_ca: 0.0,
            ..base
        },
    ];
    for p in invalid {
        match compute_potential(p) {
            Err(PotentialError::InvalidParameters(reason)) => {
                assert!(!reason.to_string().is_empty())
            }
            Ok(v) => panic!("{:?} should be rejected, got {}", p, v),
        }
    }
}

#[test]
fn test_bounds_are_not_enforced_by_calculator() {
    let p = IonParameters {
        k_out: 500.0,
        p_k: 3.0,
        ..IonParameters::default()
    };
    assert_eq!(p.out_of_bounds(), vec!["k_out", "p_k"]);
    assert!(compute_potential(p).is_ok());
}

#[test]
fn test_voltmeter_readout() {
    let drawing = render_diagram(MembranePotential(-72.3));
    assert!(drawing.texts().any(|t| t == "Vm = -72.3 mV"));
    assert_eq!(voltmeter_label(MembranePotential(-72.3)), "Vm = -72.3 mV");
    assert_eq!(format_metric(MembranePotential(-72.3)), "-72.30 mV");
}

#[test]
fn test_diagram_accepts_non_finite_potential() {
    let drawing = render_diagram(MembranePotential(f64::NAN));
    assert!(drawing.texts().any(|t| t == "Vm = NaN mV"));
}

#[test]
fn test_fixed_layout_geometry() {
    let drawing = render_diagram(MembranePotential(-70.0));
    let soma = drawing.of_kind(ElementKind::Ellipse).next().unwrap();
    match soma {
        Element::Ellipse {
            center,
            width,
            height,
            ..
        } => {
            assert_eq!((center.x, center.y), (3.0, 3.0));
            assert_eq!((*width, *height), (2.0, 2.5));
        }
        _ => unreachable!(),
    }
    let axon = drawing.of_kind(ElementKind::Line).next().unwrap();
    match axon {
        Element::Line { from, to, .. } => {
            assert_eq!((from.x, from.y, to.x, to.y), (4.0, 3.0, 9.0, 3.0));
        }
        _ => unreachable!(),
    }
    assert!(drawing.texts().any(|t| t == "NEURON"));
    assert!(drawing.texts().any(|t| t == "Na/K pump"));
}

#[test]
fn test_end_to_end_svg() {
    let v = compute_potential(IonParameters::default()).unwrap();
    let svg = to_svg(&render_diagram(v), 1000, 500);
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Vm = -61.5 mV"));
    assert!(svg.contains("NEURON"));
    assert_eq!(svg.matches("<ellipse").count(), 1);
    assert_eq!(svg.matches("<polygon").count(), 2);
}
