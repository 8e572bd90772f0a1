//! The ions that cross the membrane and the concentrations/permeabilities
//! that feed the GHK equation.
use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULTS, N_PARAMS, PARAM_BOUNDS, PARAM_NAMES};

/// The four permeant ions of the resting membrane.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone)]
pub enum Ion {
    Potassium,
    Sodium,
    Chloride,
    Calcium,
}

impl Ion {
    /// Summation order of the GHK numerator/denominator.
    pub const ALL: [Ion; 4] = [Ion::Potassium, Ion::Sodium, Ion::Chloride, Ion::Calcium];

    pub fn valence(self) -> i32 {
        match self {
            Ion::Potassium | Ion::Sodium => 1,
            Ion::Chloride => -1,
            Ion::Calcium => 2,
        }
    }

    /// Anions enter the equation with inside and outside swapped.
    pub fn is_anion(self) -> bool {
        self.valence() < 0
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Ion::Potassium => "K⁺",
            Ion::Sodium => "Na⁺",
            Ion::Chloride => "Cl⁻",
            Ion::Calcium => "Ca²⁺",
        }
    }
}

impl fmt::Display for Ion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ion: {0:?} (expected one of K, Na, Cl, Ca)")]
pub struct UnknownIon(pub String);

impl FromStr for Ion {
    type Err = UnknownIon;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "k" | "k+" | "potassium" => Ok(Ion::Potassium),
            "na" | "na+" | "sodium" => Ok(Ion::Sodium),
            "cl" | "cl-" | "chloride" => Ok(Ion::Chloride),
            "ca" | "ca2+" | "calcium" => Ok(Ion::Calcium),
            _ => Err(UnknownIon(s.to_owned())),
        }
    }
}

/// Concentrations [mM] on both sides of the membrane plus the relative
/// permeability [-] of each ion.
///
/// Built fresh for every evaluation; nothing is validated at construction.
/// `compute_potential` rejects values that make the equation undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IonParameters {
    pub k_out: f64,
    pub k_in: f64,
    pub na_out: f64,
    pub na_in: f64,
    pub cl_out: f64,
    pub cl_in: f64,
    pub ca_out: f64,
    pub ca_in: f64,
    pub p_k: f64,
    pub p_na: f64,
    pub p_cl: f64,
    pub p_ca: f64,
}

impl Default for IonParameters {
    /// Typical mammalian neuron at rest.
    fn default() -> Self {
        let mut arr = [0.0; N_PARAMS];
        arr.copy_from_slice(DEFAULTS);
        Self::from_fixed(arr)
    }
}

impl IonParameters {
    fn from_fixed(arr: [f64; N_PARAMS]) -> Self {
        let [k_out, k_in, na_out, na_in, cl_out, cl_in, ca_out, ca_in, p_k, p_na, p_cl, p_ca] =
            arr;
        Self {
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
        }
    }

    /// Build from a slice in `PARAM_NAMES` order.
    pub fn from_array(arr: &[f64]) -> Result<Self, String> {
        let fixed: [f64; N_PARAMS] = arr.try_into().map_err(|_| {
            format!("expected {} parameters, got {}", N_PARAMS, arr.len())
        })?;
        Ok(Self::from_fixed(fixed))
    }

    pub fn to_array(&self) -> [f64; N_PARAMS] {
        [
            self.k_out,
            self.k_in,
            self.na_out,
            self.na_in,
            self.cl_out,
            self.cl_in,
            self.ca_out,
            self.ca_in,
            self.p_k,
            self.p_na,
            self.p_cl,
            self.p_ca,
        ]
    }

    /// (outside, inside) concentration of `ion`.
    pub fn concentrations(&self, ion: Ion) -> (f64, f64) {
        match ion {
            Ion::Potassium => (self.k_out, self.k_in),
            Ion::Sodium => (self.na_out, self.na_in),
            Ion::Chloride => (self.cl_out, self.cl_in),
            Ion::Calcium => (self.ca_out, self.ca_in),
        }
    }

    pub fn permeability(&self, ion: Ion) -> f64 {
        match ion {
            Ion::Potassium => self.p_k,
            Ion::Sodium => self.p_na,
            Ion::Chloride => self.p_cl,
            Ion::Calcium => self.p_ca,
        }
    }

    /// Swap every inside/outside pair, keeping the permeabilities.
    pub fn swapped(&self) -> Self {
        Self {
            k_out: self.k_in,
            k_in: self.k_out,
            na_out: self.na_in,
            na_in: self.na_out,
            cl_out: self.cl_in,
            cl_in: self.cl_out,
            ca_out: self.ca_in,
            ca_in: self.ca_out,
            ..*self
        }
    }

    /// Named values, in `PARAM_NAMES` order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> {
        PARAM_NAMES.iter().copied().zip(self.to_array())
    }

    /// Names of the fields that fall outside the interactive control ranges.
    ///
    /// Purely informational: the calculator accepts any value for which the
    /// equation is defined.
    pub fn out_of_bounds(&self) -> Vec<&'static str> {
        self.named()
            .zip(PARAM_BOUNDS)
            .filter(|((_, value), (min, max))| !(value >= min && value <= max))
            .map(|((name, _), _)| name)
            .collect()
    }
}
