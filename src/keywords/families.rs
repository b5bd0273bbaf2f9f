//! Static physics keyword family data and the keyword budget audit.
//!
//! Families are plain immutable configuration data: nothing here owns
//! process state, and the audit takes its inputs as parameters.

use serde::{Deserialize, Serialize};

use crate::syllable::SyllableCounter;

/// The physics families haikus are generated for.
///
/// The first eight are training families; cosmology is held out for
/// evaluation and particle physics for testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    // Training families
    ClassicalMechanics,
    Electromagnetism,
    QuantumMechanics,
    ThermoStatmech,
    MathematicalPhysics,
    AdvancedLab,
    CondensedMatter,
    Relativity,
    // Evaluation family
    Cosmology,
    // Test family
    ParticlePhysics,
}

impl Family {
    /// All training families, in corpus order.
    pub fn train() -> Vec<Family> {
        vec![
            Family::ClassicalMechanics,
            Family::Electromagnetism,
            Family::QuantumMechanics,
            Family::ThermoStatmech,
            Family::MathematicalPhysics,
            Family::AdvancedLab,
            Family::CondensedMatter,
            Family::Relativity,
        ]
    }

    /// Every family, including the evaluation and test sets.
    pub fn all() -> Vec<Family> {
        let mut families = Family::train();
        families.push(Family::Cosmology);
        families.push(Family::ParticlePhysics);
        families
    }

    /// The file stem used for this family's corpus file.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Family::ClassicalMechanics => "classical_mechanics",
            Family::Electromagnetism => "electromagnetism",
            Family::QuantumMechanics => "quantum_mechanics",
            Family::ThermoStatmech => "thermo_statmech",
            Family::MathematicalPhysics => "mathematical_physics",
            Family::AdvancedLab => "advanced_lab",
            Family::CondensedMatter => "condensed_matter",
            Family::Relativity => "relativity",
            Family::Cosmology => "cosmology",
            Family::ParticlePhysics => "particle_physics",
        }
    }

    /// Parses a family from its file stem.
    pub fn from_stem(stem: &str) -> Option<Family> {
        Family::all()
            .into_iter()
            .find(|family| family.file_stem() == stem)
    }

    /// The 25 keywords of this family.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Family::ClassicalMechanics => &[
                "force", "momentum", "acceleration", "velocity", "position",
                "gravity", "inertia", "rigid body", "moment", "rotation",
                "Lagrangian", "Hamiltonian", "motion", "conservation", "constant",
                "friction", "oscillator", "spring", "pendulum", "rocket",
                "frame", "non-inertial", "time", "orbit", "energy",
            ],
            Family::Electromagnetism => &[
                "charge", "Coulomb", "Gauss", "field", "electric",
                "magnet", "pole", "vector", "Ampere", "potential",
                "Maxwell", "voltage", "circuit", "resistor", "current",
                "capacitor", "inductor", "work", "trajectory", "cross product",
                "radiation", "antenna", "waveguide", "radio", "Poynting",
            ],
            Family::QuantumMechanics => &[
                "quantize", "wavefunction", "Schrodinger", "uncertainty", "time-independent",
                "superposition", "operator", "expectation value", "Ehrenfest", "measurement",
                "observer", "quanta", "wave", "particle", "duality",
                "conjugate variable", "Copenhagen", "many-worlds", "entanglement", "Bell's Theorem",
                "finite well", "Dirac delta", "tunneling", "bound state", "energy level",
            ],
            Family::ThermoStatmech => &[
                "heat", "entropy", "second law", "phase space", "microstate",
                "Boltzmann", "distribution", "Bose-Einstein", "Fermi-Dirac", "ideal gas",
                "system", "cycle", "Carnot", "engine", "refrigerator",
                "state variable", "efficiency", "pressure", "volume", "temperature",
                "area", "bath", "partition function", "ensemble", "heat capacity",
            ],
            Family::MathematicalPhysics => &[
                "Lie algebra", "spherical coordinates", "gradient", "divergence", "curl",
                "tensor", "complex analysis", "Cauchy integral", "contour", "Taylor series",
                "residue", "conformal map", "Fourier transform", "orthogonality", "Laplace transform",
                "first order", "second order", "Frobenius", "quadrature", "Green's function",
                "integral equation", "steepest descent", "group theory", "variational calculus", "representation",
            ],
            Family::AdvancedLab => &[
                "oscilloscope", "data analysis", "diffraction", "spectroscopy", "Hall effect",
                "photoelectric effect", "error propagation", "systematics", "curve fitting", "interference",
                "optical pumping", "Franck-Hertz", "Zeeman effect", "optical rotation", "reflection",
                "quantum optics", "superconductor", "chaos", "non-linear system", "lab report",
                "multimeter", "power supply", "function generator", "optical bench", "laser",
            ],
            Family::CondensedMatter => &[
                "Bravais lattice", "unit cell", "reciprocal lattice", "Brillouin zone", "phonon",
                "Debye model", "specific heat", "thermal conductivity", "Drude model", "band gap",
                "Bloch's theorem", "metal", "insulator", "semiconductor", "transistor",
                "p-n junction", "diamagnetism", "paramagnetism", "ferromagnetism", "Meissner effect",
                "BCS theory", "phase transition", "Berry phase", "topological", "polymer",
            ],
            Family::Relativity => &[
                "spacetime", "Minkowski", "four-vector", "invariance", "proper time",
                "metric", "Christoffel symbols", "connection", "Einstein", "simultaneity",
                "length contraction", "time dilation", "event", "Ricci tensor", "stress-energy tensor",
                "covariance", "twin paradox", "curvature", "black hole", "event horizon",
                "diffeomorphism", "equivalence principle", "geodesic", "free fall", "gravitational wave",
            ],
            Family::Cosmology => &[
                "homogeneity", "isotropy", "cosmic microwave background", "inflation", "Universe",
                "large-scale structure", "Friedmann equations", "expansion", "big bang", "nucleosynthesis",
                "primordial abundances", "freeze out", "dark matter", "neutrinos", "baryogenesis",
                "sphalerons", "domain walls", "cosmic strings", "Kibble mechanism", "density perturbation",
                "axions", "flatness problem", "e-folds", "reheating", "isocurvature",
            ],
            Family::ParticlePhysics => &[
                "scalar", "fermion", "Dirac equation", "electron", "proton",
                "neutron", "gluon", "boson", "quark", "collider",
                "renormalize", "cross section", "decay", "lifetime", "regularize",
                "Yukawa", "Feynman rules", "Higgs mechanism", "lepton", "anomaly",
                "parity", "gauge symmetry", "counterterm", "scattering", "luminosity",
            ],
        }
    }
}

/// Maximum syllables a keyword phrase may occupy: it has to fit on a
/// single line of the haiku.
pub const KEYWORD_SYLLABLE_BUDGET: usize = 7;

/// A keyword that exceeds the syllable budget.
#[derive(Debug, Clone, Serialize)]
pub struct OversizedKeyword {
    pub family: Family,
    pub keyword: String,
    pub syllables: usize,
}

/// Flags every keyword in `families` whose phrase exceeds `budget`
/// syllables. Multi-word keywords are summed across words since the
/// entire phrase must fit on one line.
pub fn audit_keywords(
    counter: &SyllableCounter,
    families: &[Family],
    budget: usize,
) -> Vec<OversizedKeyword> {
    let mut oversized = Vec::new();
    for family in families {
        for keyword in family.keywords() {
            let syllables = counter.count_phrase(keyword);
            if syllables > budget {
                oversized.push(OversizedKeyword {
                    family: *family,
                    keyword: (*keyword).to_string(),
                    syllables,
                });
            }
        }
    }
    oversized
}
