//! Built-in ORCA tables.

use smol_str::SmolStr;

use super::entry::{
    BlockSpec, CoordinateKind, CoordinateSystem, Element, KeywordCategory, KeywordEntry,
    KnowledgeData, ParameterSpec, Thresholds, Tier, ValueType,
};

/// Method families a minimal or small split-valence basis is suited for.
const SMALL_BASIS_FAMILIES: &[&str] = &["hf", "gga", "meta-gga", "hybrid", "semiempirical"];

const METHODS: &[(&str, &str, &str)] = &[
    ("HF", "hf", "Hartree-Fock method"),
    ("RHF", "hf", "Restricted Hartree-Fock"),
    ("UHF", "hf", "Unrestricted Hartree-Fock"),
    ("ROHF", "hf", "Restricted open-shell Hartree-Fock"),
    ("PBE", "gga", "PBE GGA functional"),
    ("BP86", "gga", "Becke-Perdew 86 GGA functional"),
    ("BLYP", "gga", "Becke-Lee-Yang-Parr GGA functional"),
    ("B97", "gga", "B97 GGA functional"),
    ("B97-D3", "gga", "B97 GGA functional with D3 dispersion"),
    ("revPBE", "gga", "Revised PBE GGA functional"),
    ("RPBE", "gga", "RPBE GGA functional"),
    ("OLYP", "gga", "Handy-Cohen optimized LYP functional"),
    ("TPSS", "meta-gga", "TPSS meta-GGA functional"),
    ("M06L", "meta-gga", "M06L meta-GGA functional"),
    ("r2SCAN", "meta-gga", "Regularized-restored SCAN meta-GGA functional"),
    ("B3LYP", "hybrid", "B3LYP hybrid functional (20% HF exchange)"),
    ("PBE0", "hybrid", "PBE0 hybrid functional (25% HF exchange)"),
    ("TPSS0", "hybrid", "TPSS0 hybrid meta-GGA functional"),
    ("M06", "hybrid", "M06 hybrid meta-GGA functional"),
    ("M06-2X", "hybrid", "M06-2X hybrid meta-GGA functional (54% HF exchange)"),
    ("M06-HF", "hybrid", "M06-HF functional (100% HF exchange)"),
    ("wB97X-D3", "hybrid", "Range-separated hybrid wB97X with D3 dispersion"),
    ("wB97X-V", "hybrid", "Range-separated hybrid wB97X with VV10 nonlocal correlation"),
    ("B2PLYP", "double-hybrid", "B2PLYP double-hybrid functional"),
    ("DSD-BLYP", "double-hybrid", "DSD-BLYP spin-component-scaled double hybrid"),
    ("MP2", "mp", "Moller-Plesset second-order perturbation theory"),
    ("RI-MP2", "mp", "Resolution-of-identity MP2"),
    ("SCS-MP2", "mp", "Spin-component-scaled MP2"),
    ("MP3", "mp", "Moller-Plesset third-order perturbation theory"),
    ("CCSD", "cc", "Coupled cluster singles and doubles"),
    ("CCSD(T)", "cc", "CCSD with perturbative triples"),
    ("DLPNO-CCSD", "cc", "Domain-based local pair natural orbital CCSD"),
    ("DLPNO-CCSD(T)", "cc", "DLPNO-CCSD with perturbative triples"),
    ("CASSCF", "multireference", "Complete active space SCF"),
    ("NEVPT2", "multireference", "N-electron valence state perturbation theory"),
    ("CASPT2", "multireference", "Complete active space perturbation theory"),
    ("MRPT", "multireference", "Multireference perturbation theory"),
    ("XTB", "semiempirical", "GFN2-xTB tight-binding method"),
    ("PM3", "semiempirical", "PM3 semiempirical method"),
    ("AM1", "semiempirical", "AM1 semiempirical method"),
];

const BASIS_SETS: &[(&str, &str, &str)] = &[
    ("STO-3G", "pople", "Minimal basis (Slater-type orbitals from 3 Gaussians)"),
    ("3-21G", "pople", "Small split-valence basis"),
    ("6-31G", "pople", "Split-valence basis, 6 Gaussians for core"),
    ("6-31G*", "pople", "6-31G with d polarization on heavy atoms"),
    ("6-31G**", "pople", "6-31G with d polarization on heavy atoms and p on H"),
    ("6-31+G*", "pople", "6-31G* with diffuse functions on heavy atoms"),
    ("6-311G", "pople", "Triple-zeta split-valence basis"),
    ("6-311G*", "pople", "6-311G with d polarization"),
    ("6-311G**", "pople", "6-311G with d on heavy atoms and p on H"),
    ("6-311+G*", "pople", "6-311G* with diffuse functions"),
    ("6-311++G**", "pople", "6-311G** with diffuse functions on all atoms"),
    ("def2-SVP", "karlsruhe", "Karlsruhe split-valence polarized basis"),
    ("def2-TZVP", "karlsruhe", "Karlsruhe triple-zeta valence polarized basis"),
    ("def2-TZVPP", "karlsruhe", "Karlsruhe triple-zeta with extra polarization"),
    ("def2-QZVP", "karlsruhe", "Karlsruhe quadruple-zeta valence polarized basis"),
    ("def2-QZVPP", "karlsruhe", "Karlsruhe quadruple-zeta with extra polarization"),
    ("def2-SVPD", "karlsruhe", "def2-SVP with diffuse functions"),
    ("def2-TZVPD", "karlsruhe", "def2-TZVP with diffuse functions"),
    ("cc-pVDZ", "dunning", "Correlation-consistent polarized valence double-zeta"),
    ("cc-pVTZ", "dunning", "Correlation-consistent polarized valence triple-zeta"),
    ("cc-pVQZ", "dunning", "Correlation-consistent polarized valence quadruple-zeta"),
    ("cc-pV5Z", "dunning", "Correlation-consistent polarized valence quintuple-zeta"),
    ("aug-cc-pVDZ", "dunning", "cc-pVDZ with diffuse functions"),
    ("aug-cc-pVTZ", "dunning", "cc-pVTZ with diffuse functions"),
    ("aug-cc-pVQZ", "dunning", "cc-pVQZ with diffuse functions"),
];

const AUXILIARY_BASIS_SETS: &[(&str, &str)] = &[
    ("def2/J", "Karlsruhe auxiliary basis for Coulomb fitting"),
    ("def2/JK", "Karlsruhe auxiliary basis for Coulomb and exchange fitting"),
    ("def2-TZVP/C", "Karlsruhe auxiliary basis for correlation (TZVP)"),
    ("def2-QZVP/C", "Karlsruhe auxiliary basis for correlation (QZVP)"),
    ("cc-pVTZ-F12-OptRI", "Optimal RI auxiliary basis for F12 methods"),
];

const JOB_TYPES: &[(&str, &str)] = &[
    ("SP", "Single point energy calculation"),
    ("OPT", "Geometry optimization"),
    ("TightOpt", "Geometry optimization with tight convergence criteria"),
    ("FREQ", "Frequency calculation (analytical where available)"),
    ("NUMFREQ", "Numerical frequency calculation"),
    ("OptTS", "Transition state optimization"),
    ("IRC", "Intrinsic reaction coordinate calculation"),
    ("SCAN", "Potential energy surface scan"),
    ("MD", "Molecular dynamics simulation"),
];

const DISPERSION: &[(&str, &str)] = &[
    ("D3", "Grimme D3 dispersion correction"),
    ("D3BJ", "Grimme D3 dispersion with Becke-Johnson damping"),
    ("D3ZERO", "Grimme D3 dispersion with zero damping"),
    ("D4", "Grimme D4 dispersion correction"),
];

const SETTINGS: &[(&str, &str)] = &[
    ("TightSCF", "Tight SCF convergence"),
    ("VeryTightSCF", "Very tight SCF convergence"),
    ("LooseSCF", "Loose SCF convergence"),
    ("RIJCOSX", "RI for Coulomb with chain-of-spheres exchange"),
    ("RIJK", "RI for Coulomb and exchange"),
    ("DefGrid2", "Default DFT integration grid"),
    ("DefGrid3", "Fine DFT integration grid"),
];

/// Deprecated route keywords and their successors.
const DEPRECATED: &[(&str, KeywordCategory, &str, &str)] = &[
    ("B97-D", KeywordCategory::Method, "gga", "B97-D3"),
    ("Grid4", KeywordCategory::Setting, "grid", "DefGrid2"),
    ("Grid5", KeywordCategory::Setting, "grid", "DefGrid2"),
    ("Grid6", KeywordCategory::Setting, "grid", "DefGrid3"),
];

const ELEMENTS: &[(&str, &str)] = &[
    ("H", "Hydrogen"),
    ("He", "Helium"),
    ("Li", "Lithium"),
    ("Be", "Beryllium"),
    ("B", "Boron"),
    ("C", "Carbon"),
    ("N", "Nitrogen"),
    ("O", "Oxygen"),
    ("F", "Fluorine"),
    ("Ne", "Neon"),
    ("Na", "Sodium"),
    ("Mg", "Magnesium"),
    ("Al", "Aluminium"),
    ("Si", "Silicon"),
    ("P", "Phosphorus"),
    ("S", "Sulfur"),
    ("Cl", "Chlorine"),
    ("Ar", "Argon"),
    ("K", "Potassium"),
    ("Ca", "Calcium"),
    ("Sc", "Scandium"),
    ("Ti", "Titanium"),
    ("V", "Vanadium"),
    ("Cr", "Chromium"),
    ("Mn", "Manganese"),
    ("Fe", "Iron"),
    ("Co", "Cobalt"),
    ("Ni", "Nickel"),
    ("Cu", "Copper"),
    ("Zn", "Zinc"),
    ("Ga", "Gallium"),
    ("Ge", "Germanium"),
    ("As", "Arsenic"),
    ("Se", "Selenium"),
    ("Br", "Bromine"),
    ("Kr", "Krypton"),
    ("Rb", "Rubidium"),
    ("Sr", "Strontium"),
    ("Y", "Yttrium"),
    ("Zr", "Zirconium"),
    ("Nb", "Niobium"),
    ("Mo", "Molybdenum"),
    ("Tc", "Technetium"),
    ("Ru", "Ruthenium"),
    ("Rh", "Rhodium"),
    ("Pd", "Palladium"),
    ("Ag", "Silver"),
    ("Cd", "Cadmium"),
    ("In", "Indium"),
    ("Sn", "Tin"),
    ("Sb", "Antimony"),
    ("Te", "Tellurium"),
    ("I", "Iodine"),
    ("Xe", "Xenon"),
    ("Cs", "Caesium"),
    ("Ba", "Barium"),
    ("La", "Lanthanum"),
    ("Ce", "Cerium"),
    ("Pr", "Praseodymium"),
    ("Nd", "Neodymium"),
    ("Pm", "Promethium"),
    ("Sm", "Samarium"),
    ("Eu", "Europium"),
    ("Gd", "Gadolinium"),
    ("Tb", "Terbium"),
    ("Dy", "Dysprosium"),
    ("Ho", "Holmium"),
    ("Er", "Erbium"),
    ("Tm", "Thulium"),
    ("Yb", "Ytterbium"),
    ("Lu", "Lutetium"),
    ("Hf", "Hafnium"),
    ("Ta", "Tantalum"),
    ("W", "Tungsten"),
    ("Re", "Rhenium"),
    ("Os", "Osmium"),
    ("Ir", "Iridium"),
    ("Pt", "Platinum"),
    ("Au", "Gold"),
    ("Hg", "Mercury"),
    ("Tl", "Thallium"),
    ("Pb", "Lead"),
    ("Bi", "Bismuth"),
    ("Po", "Polonium"),
    ("At", "Astatine"),
    ("Rn", "Radon"),
];

pub(super) fn data() -> KnowledgeData {
    KnowledgeData {
        keywords: keywords(),
        blocks: blocks(),
        coordinate_systems: coordinate_systems(),
        elements: ELEMENTS
            .iter()
            .zip(1u8..)
            .map(|(&(symbol, name), atomic_number)| Element {
                symbol: SmolStr::new_static(symbol),
                name: SmolStr::new_static(name),
                atomic_number,
            })
            .collect(),
        thresholds: Thresholds {
            maxcore: vec![
                Tier::new(Some(49), 1000),
                Tier::new(Some(100), 2000),
                Tier::new(Some(200), 4000),
                Tier::new(None, 8000),
            ],
            nprocs: vec![
                Tier::new(Some(5), 8),
                Tier::new(Some(25), 32),
                Tier::new(Some(100), 64),
                Tier::new(None, 256),
            ],
        },
    }
}

fn keywords() -> Vec<KeywordEntry> {
    let mut keywords = Vec::new();

    keywords.extend(
        METHODS
            .iter()
            .map(|&(name, family, doc)| KeywordEntry::new(name, KeywordCategory::Method, family, doc)),
    );
    keywords.extend(BASIS_SETS.iter().map(|&(name, family, doc)| {
        let entry = KeywordEntry::new(name, KeywordCategory::BasisSet, family, doc);
        if matches!(name, "STO-3G" | "3-21G") {
            entry.with_compatible(SMALL_BASIS_FAMILIES.iter().copied())
        } else {
            entry
        }
    }));
    keywords.extend(AUXILIARY_BASIS_SETS.iter().map(|&(name, doc)| {
        KeywordEntry::new(name, KeywordCategory::AuxiliaryBasis, "auxiliary", doc)
    }));
    keywords.extend(
        JOB_TYPES
            .iter()
            .map(|&(name, doc)| KeywordEntry::new(name, KeywordCategory::JobType, "job", doc)),
    );
    keywords.extend(
        DISPERSION
            .iter()
            .map(|&(name, doc)| KeywordEntry::new(name, KeywordCategory::Dispersion, "grimme", doc)),
    );
    keywords.extend(
        SETTINGS
            .iter()
            .map(|&(name, doc)| KeywordEntry::new(name, KeywordCategory::Setting, "setting", doc)),
    );
    keywords.extend(
        DEPRECATED
            .iter()
            .map(|&(name, category, family, successor)| {
                KeywordEntry::new(name, category, family, format!("Superseded by {successor}"))
                    .deprecated_for(successor)
            }),
    );

    keywords
}

fn blocks() -> Vec<BlockSpec> {
    use ValueType::{Boolean, Choice, Float, Integer, Text};

    let choice = |options: &[&str]| Choice(options.iter().map(|o| SmolStr::new(o)).collect());

    vec![
        BlockSpec::new("maxcore", "Memory per core in MB")
            .line_directive(Integer)
            .with_example("%maxcore 4000"),
        BlockSpec::new("moinp", "Read initial orbitals from a .gbw file")
            .line_directive(Text)
            .with_example("%moinp \"guess.gbw\""),
        BlockSpec::new("pal", "Parallelization settings")
            .with_parameter(ParameterSpec::new("nprocs", Integer, "Number of MPI processes"))
            .with_example("%pal nprocs 4 end"),
        BlockSpec::new("method", "Method-specific settings")
            .with_parameter(ParameterSpec::new("method", Text, "Electronic structure method"))
            .with_parameter(ParameterSpec::new("functional", Text, "Density functional"))
            .with_parameter(ParameterSpec::new(
                "d3",
                Boolean,
                "Toggle D3 dispersion correction",
            ))
            .with_parameter(ParameterSpec::new(
                "runtyp",
                choice(&["Energy", "Gradient", "Opt", "Scan"]),
                "Run type",
            ))
            .with_example("%method functional B3LYP end"),
        BlockSpec::new("basis", "Basis set settings")
            .with_parameter(ParameterSpec::new("basis", Text, "Orbital basis set"))
            .with_parameter(ParameterSpec::new("aux", Text, "Auxiliary basis set"))
            .with_parameter(ParameterSpec::new("auxj", Text, "Coulomb fitting basis"))
            .with_parameter(ParameterSpec::new("auxc", Text, "Correlation fitting basis"))
            .with_parameter(ParameterSpec::new("newgto", Text, "Per-element basis override"))
            .with_parameter(ParameterSpec::new("ecp", Text, "Effective core potential"))
            .with_example("%basis newgto H \"cc-pVTZ\" end"),
        BlockSpec::new("scf", "SCF convergence settings")
            .with_parameter(ParameterSpec::new("maxiter", Integer, "Maximum SCF iterations"))
            .with_parameter(ParameterSpec::new(
                "convergence",
                choice(&["Loose", "Medium", "Strong", "Tight", "VeryTight", "Extreme"]),
                "Convergence preset",
            ))
            .with_parameter(ParameterSpec::new(
                "hftyp",
                choice(&["RHF", "UHF", "ROHF"]),
                "Reference wavefunction type",
            ))
            .with_parameter(ParameterSpec::new("damp", Boolean, "Enable damping"))
            .with_parameter(ParameterSpec::new("soscf", Boolean, "Enable second-order SCF"))
            .with_parameter(ParameterSpec::new("tole", Float, "Energy convergence tolerance"))
            .with_example("%scf maxiter 100 end"),
        BlockSpec::new("geom", "Geometry optimization settings")
            .with_parameter(ParameterSpec::new("maxiter", Integer, "Maximum optimization cycles"))
            .with_parameter(ParameterSpec::new("calc_hess", Boolean, "Compute the initial Hessian"))
            .with_parameter(ParameterSpec::new("recalc_hess", Integer, "Recompute Hessian every N steps"))
            .with_parameter(ParameterSpec::new("trust", Float, "Trust radius"))
            .with_parameter(ParameterSpec::new("constraints", Text, "Geometry constraints"))
            .with_parameter(ParameterSpec::new("scan", Text, "Relaxed surface scan"))
            .with_example("%geom maxiter 50 end"),
        BlockSpec::new("freq", "Frequency calculation settings")
            .with_parameter(ParameterSpec::new("temp", Float, "Temperature in K"))
            .with_parameter(ParameterSpec::new("pressure", Float, "Pressure in atm"))
            .with_parameter(ParameterSpec::new("scalfreq", Float, "Frequency scaling factor"))
            .with_example("%freq temp 298.15 end"),
        BlockSpec::new("md", "Molecular dynamics settings")
            .with_parameter(ParameterSpec::new("timestep", Float, "Time step in fs"))
            .with_parameter(ParameterSpec::new("initvel", Float, "Initial velocity temperature in K"))
            .with_parameter(ParameterSpec::new("thermostat", Text, "Thermostat definition"))
            .with_parameter(ParameterSpec::new("run", Integer, "Number of steps"))
            .with_example("%md timestep 0.5 end"),
        BlockSpec::new("loc", "Orbital localization settings")
            .with_parameter(ParameterSpec::new(
                "locmet",
                choice(&["PM", "FB", "IBO", "IAOIBO", "NEWBOYS"]),
                "Localization method",
            ))
            .with_parameter(ParameterSpec::new("maxiter", Integer, "Maximum iterations"))
            .with_example("%loc locmet IBO end"),
        BlockSpec::new("plots", "Plot generation settings")
            .with_parameter(ParameterSpec::new(
                "format",
                choice(&["cube", "gaussian_cube", "plt"]),
                "Output file format",
            ))
            .with_parameter(ParameterSpec::new("dim1", Integer, "Grid points along x"))
            .with_parameter(ParameterSpec::new("dim2", Integer, "Grid points along y"))
            .with_parameter(ParameterSpec::new("dim3", Integer, "Grid points along z"))
            .with_example("%plots format cube end"),
        BlockSpec::new("cp", "Counterpoise correction settings")
            .with_parameter(ParameterSpec::new("fragments", Integer, "Number of fragments"))
            .with_example("%cp fragments 2 end"),
        BlockSpec::new("elprop", "Electric property settings")
            .with_parameter(ParameterSpec::new("dipole", Boolean, "Dipole moment"))
            .with_parameter(ParameterSpec::new("quadrupole", Boolean, "Quadrupole moment"))
            .with_parameter(ParameterSpec::new("polar", Integer, "Polarizability"))
            .with_example("%elprop dipole true end"),
        BlockSpec::new("coords", "Coordinate system settings")
            .with_parameter(ParameterSpec::new("internals", Boolean, "Use internal coordinates"))
            .with_parameter(ParameterSpec::new("ctyp", choice(&["xyz", "internal"]), "Coordinate type"))
            .with_example("%coords internals on end"),
        BlockSpec::new("tddft", "Time-dependent DFT settings")
            .with_parameter(ParameterSpec::new("nroots", Integer, "Number of excited states"))
            .with_parameter(ParameterSpec::new("maxdim", Integer, "Davidson expansion space"))
            .with_parameter(ParameterSpec::new("triplets", Boolean, "Also compute triplets"))
            .with_parameter(ParameterSpec::new("tda", Boolean, "Tamm-Dancoff approximation"))
            .with_example("%tddft nroots 10 end"),
    ]
}

fn coordinate_systems() -> Vec<CoordinateSystem> {
    let system = |name: &'static str, kind, doc: &str| CoordinateSystem {
        name: SmolStr::new_static(name),
        kind,
        documentation: doc.to_string(),
    };
    vec![
        system("xyz", CoordinateKind::Cartesian, "Cartesian coordinates in Angstrom: `El x y z`"),
        system(
            "int",
            CoordinateKind::Internal,
            "Internal coordinates: `El a b c r angle dihedral`",
        ),
        system(
            "gzmt",
            CoordinateKind::ZMatrix,
            "Gaussian-style Z-matrix: `El [a r [b angle [c dihedral]]]`",
        ),
        system("xyzfile", CoordinateKind::File, "Cartesian coordinates read from an .xyz file"),
        system("gzmtfile", CoordinateKind::File, "Z-matrix read from a file"),
        system("pdbfile", CoordinateKind::File, "Coordinates read from a PDB file"),
    ]
}
