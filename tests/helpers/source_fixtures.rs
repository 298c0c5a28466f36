//! Common ORCA input fixtures for tests.

pub const WATER_GEOMETRY: &str = "* xyz 0 1
O   0.000000   0.000000   0.117300
H   0.000000   0.757200  -0.469200
H   0.000000  -0.757200  -0.469200
*
";

/// Route line, resources, SCF settings and geometry; produces no diagnostics.
pub const COMPLETE_JOB: &str = "# water optimization
! B3LYP def2-TZVP OPT D3BJ TightSCF
%maxcore 4000
%pal nprocs 4 end
%scf
  maxiter 200
  convergence tight
end
* xyz 0 1
O   0.000000   0.000000   0.117300
H   0.000000   0.757200  -0.469200
H   0.000000  -0.757200  -0.469200
*
";

pub const INTERNAL_COORDINATES: &str = "! HF def2-SVP
* int 0 1
C  0 0 0  0.0000   0.000   0.000
O  1 0 0  1.2000   0.000   0.000
H  1 2 0  1.1000 120.000   0.000
H  1 2 3  1.1000 120.000 180.000
*
";

pub const FILE_GEOMETRY: &str = "! PBE0 def2-SVP
* xyzfile 0 1 benzene.xyz
";

/// Prepend a route line to the water geometry.
pub fn with_water(route: &str) -> String {
    format!("{}\n{}", route, WATER_GEOMETRY)
}
