//! Resting membrane potential from the Goldman-Hodgkin-Katz voltage equation.
//!
//! ```text
//! Vm = 61.54 * log10( (P_K[K]o + P_Na[Na]o + P_Cl[Cl]i + P_Ca[Ca]o)
//!                   / (P_K[K]i + P_Na[Na]i + P_Cl[Cl]o + P_Ca[Ca]i) )
//! ```
//!
//! Chloride is the only anion, so its inside/outside concentrations trade
//! places relative to the cations.
use std::fmt;

use log::{debug, warn};

use crate::constants::GHK_FACTOR;
use crate::ions::{Ion, IonParameters};

pub type Result<T> = std::result::Result<T, PotentialError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PotentialError {
    #[error("invalid parameters: {0}")]
    InvalidParameters(#[from] InvalidReason),
}

/// Why a parameter set has no defined potential.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidReason {
    #[error("{name} is not a finite number ({value})")]
    NonFinite { name: &'static str, value: f64 },

    #[error("concentration {name} must be strictly positive, got {value}")]
    NonPositiveConcentration { name: &'static str, value: f64 },

    #[error("permeability {name} must be non-negative, got {value}")]
    NegativePermeability { name: &'static str, value: f64 },

    #[error("all permeabilities are zero")]
    NoPermeability,

    #[error("denominator of the GHK ratio is zero")]
    ZeroDenominator,

    #[error("GHK ratio {0} is not a positive finite number")]
    NonPositiveRatio(f64),
}

/// Membrane potential in millivolts.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct MembranePotential(pub f64);

impl MembranePotential {
    pub fn millivolts(self) -> f64 {
        self.0
    }
}

impl From<f64> for MembranePotential {
    fn from(mv: f64) -> Self {
        MembranePotential(mv)
    }
}

impl fmt::Display for MembranePotential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mV", self.0)
    }
}

/// Result text shown next to the diagram: two decimals.
pub fn format_metric(vm: MembranePotential) -> String {
    format!("{:.2} mV", vm.0)
}

fn validate(params: &IonParameters) -> std::result::Result<(), InvalidReason> {
    for (name, value) in params.named() {
        if !value.is_finite() {
            return Err(InvalidReason::NonFinite { name, value });
        }
    }

    let concentrations = [
        ("k_out", params.k_out),
        ("k_in", params.k_in),
        ("na_out", params.na_out),
        ("na_in", params.na_in),
        ("cl_out", params.cl_out),
        ("cl_in", params.cl_in),
        ("ca_out", params.ca_out),
        ("ca_in", params.ca_in),
    ];
    if let Some(&(name, value)) = concentrations.iter().find(|(_, c)| *c <= 0.0) {
        return Err(InvalidReason::NonPositiveConcentration { name, value });
    }

    let permeabilities = [
        ("p_k", params.p_k),
        ("p_na", params.p_na),
        ("p_cl", params.p_cl),
        ("p_ca", params.p_ca),
    ];
    if let Some(&(name, value)) = permeabilities.iter().find(|(_, p)| *p < 0.0) {
        return Err(InvalidReason::NegativePermeability { name, value });
    }
    if permeabilities.iter().all(|(_, p)| *p == 0.0) {
        return Err(InvalidReason::NoPermeability);
    }
    Ok(())
}

/// Numerator and denominator of the GHK ratio, summed in `Ion::ALL` order.
fn ghk_terms(params: &IonParameters) -> (f64, f64) {
    Ion::ALL
        .iter()
        .fold((0.0, 0.0), |(num, den), &ion| {
            let p = params.permeability(ion);
            let (c_out, c_in) = params.concentrations(ion);
            if ion.is_anion() {
                (num + p * c_in, den + p * c_out)
            } else {
                (num + p * c_out, den + p * c_in)
            }
        })
}

fn ghk_voltage(numerator: f64, denominator: f64) -> std::result::Result<f64, InvalidReason> {
    if denominator == 0.0 {
        return Err(InvalidReason::ZeroDenominator);
    }
    let ratio = numerator / denominator;
    if !(ratio > 0.0 && ratio.is_finite()) {
        return Err(InvalidReason::NonPositiveRatio(ratio));
    }
    Ok(GHK_FACTOR * ratio.log10())
}

/// Resting potential for `params`.
///
/// Inputs are checked before any arithmetic: every value finite, every
/// concentration > 0, every permeability >= 0 and at least one > 0.
/// Range limits of the interactive controls are not enforced here.
pub fn compute_potential(params: IonParameters) -> Result<MembranePotential> {
    if let Err(reason) = validate(&params) {
        warn!("Rejected ion parameters: {}", reason);
        return Err(reason.into());
    }

    let (numerator, denominator) = ghk_terms(&params);
    let vm = ghk_voltage(numerator, denominator).inspect_err(|reason| {
        warn!("GHK ratio undefined: {}", reason);
    })?;
    debug!(
        "GHK numerator = {}, denominator = {}, Vm = {:.4} mV",
        numerator, denominator, vm
    );
    Ok(MembranePotential(vm))
}

/// Potential when `ion` is the only permeant ion.
///
/// This is the single-ion limit of `compute_potential`: same factor, with the
/// anion sign convention applied. The factor is not divided by the valence
/// magnitude, so for Ca²⁺ it is twice the textbook Nernst potential, exactly
/// as the GHK form above treats it.
pub fn nernst_potential(ion: Ion, c_out: f64, c_in: f64) -> Result<MembranePotential> {
    for (name, value) in [("c_out", c_out), ("c_in", c_in)] {
        if !value.is_finite() {
            return Err(InvalidReason::NonFinite { name, value }.into());
        }
        if value <= 0.0 {
            return Err(InvalidReason::NonPositiveConcentration { name, value }.into());
        }
    }
    let (numerator, denominator) = if ion.is_anion() {
        (c_in, c_out)
    } else {
        (c_out, c_in)
    };
    Ok(MembranePotential(ghk_voltage(numerator, denominator)?))
}
