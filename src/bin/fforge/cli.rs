use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use fermi_forge::{Element, Nucleus};

#[derive(Parser)]
#[command(
    name = "fforge",
    about = "Second-quantized Hamiltonian construction",
    version,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fermi-Hubbard model on a rectangular lattice
    #[command(visible_alias = "h")]
    Hubbard(HubbardArgs),

    /// Mean-field d-wave superconductor on a rectangular lattice
    #[command(visible_alias = "d")]
    Dwave(DwaveArgs),

    /// Uniform electron gas, optionally with nuclei, on a plane-wave grid
    #[command(visible_alias = "j")]
    Jellium(JelliumArgs),

    /// Molecular data for chemical series and single atoms
    #[command(visible_alias = "m")]
    Molecule(MoleculeArgs),

    /// Build a model described by a TOML recipe
    #[command(visible_alias = "r")]
    Run(RunArgs),
}

impl Command {
    pub fn output(&self) -> &OutputOptions {
        match self {
            Command::Hubbard(args) => &args.output,
            Command::Dwave(args) => &args.output,
            Command::Jellium(args) => &args.output,
            Command::Molecule(args) => &args.output,
            Command::Run(args) => &args.output,
        }
    }
}

/// Output options shared by all commands.
#[derive(Args)]
pub struct OutputOptions {
    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub output: Option<PathBuf>,

    /// Suppress banner, progress and summary tables (for scripting)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log filter for diagnostics on stderr (overridden by RUST_LOG)
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    pub log_level: String,
}

/// Operator encoding shared by the model commands.
#[derive(Args)]
#[command(next_help_heading = "Encoding")]
pub struct EncodingOptions {
    /// Map the fermionic operator onto qubits (Jordan-Wigner)
    #[arg(long)]
    pub qubit: bool,
}

/// Rectangular lattice shared by the Hubbard and d-wave commands.
#[derive(Args)]
#[command(next_help_heading = "Lattice")]
pub struct LatticeOptions {
    /// Number of sites along x
    #[arg(short = 'x', long = "x-dim", value_name = "N", default_value = "2")]
    pub x_dimension: usize,

    /// Number of sites along y
    #[arg(short = 'y', long = "y-dim", value_name = "N", default_value = "2")]
    pub y_dimension: usize,

    /// Hopping amplitude t
    #[arg(short, long, value_name = "T", default_value = "1.0", allow_hyphen_values = true)]
    pub tunneling: f64,

    /// Chemical potential μ
    #[arg(long = "mu", value_name = "MU", default_value = "0.0", allow_hyphen_values = true)]
    pub chemical_potential: f64,

    /// Open boundary conditions instead of periodic
    #[arg(long)]
    pub open: bool,
}

#[derive(Args)]
pub struct HubbardArgs {
    #[command(flatten)]
    pub output: OutputOptions,

    #[command(flatten)]
    pub encoding: EncodingOptions,

    #[command(flatten)]
    pub lattice: LatticeOptions,

    #[command(flatten)]
    pub interaction: HubbardOptions,
}

#[derive(Args)]
#[command(next_help_heading = "Hubbard Model")]
pub struct HubbardOptions {
    /// Coulomb interaction U
    #[arg(short = 'u', long, value_name = "U", default_value = "4.0", allow_hyphen_values = true)]
    pub coulomb: f64,

    /// Magnetic field h (ignored when spinless)
    #[arg(long = "field", value_name = "H", default_value = "0.0", allow_hyphen_values = true)]
    pub magnetic_field: f64,

    /// One orbital per site with nearest-neighbor interaction
    #[arg(long)]
    pub spinless: bool,

    /// Shift number operators by one half in the interaction
    #[arg(long)]
    pub particle_hole_symmetry: bool,
}

#[derive(Args)]
pub struct DwaveArgs {
    #[command(flatten)]
    pub output: OutputOptions,

    #[command(flatten)]
    pub encoding: EncodingOptions,

    #[command(flatten)]
    pub lattice: LatticeOptions,

    /// Superconducting gap Δ
    #[arg(long = "gap", value_name = "DELTA", default_value = "1.0", allow_hyphen_values = true)]
    pub sc_gap: f64,
}

#[derive(Args)]
pub struct JelliumArgs {
    #[command(flatten)]
    pub output: OutputOptions,

    #[command(flatten)]
    pub encoding: EncodingOptions,

    #[command(flatten)]
    pub grid: GridOptions,

    #[command(flatten)]
    pub basis: JelliumOptions,

    /// Nucleus as SYMBOL:x[,y[,z]] in grid units, repeatable
    #[arg(long = "nucleus", value_name = "NUCLEUS", value_parser = parse_nucleus, action = clap::ArgAction::Append)]
    pub nuclei: Vec<Nucleus>,
}

#[derive(Args)]
#[command(next_help_heading = "Grid")]
pub struct GridOptions {
    /// Spatial dimensions
    #[arg(short, long, value_name = "D", default_value = "1")]
    pub dimensions: usize,

    /// Grid points per dimension
    #[arg(short, long, value_name = "L", default_value = "3")]
    pub length: usize,

    /// Cell side length (Bohr)
    #[arg(short, long, value_name = "A", conflicts_with = "wigner_seitz_radius")]
    pub scale: Option<f64>,

    /// Derive the cell side from a Wigner-Seitz radius instead of --scale
    #[arg(long = "rs", value_name = "R", requires = "particles")]
    pub wigner_seitz_radius: Option<f64>,

    /// Number of particles for --rs
    #[arg(long, value_name = "N")]
    pub particles: Option<usize>,
}

#[derive(Args)]
#[command(next_help_heading = "Jellium Model")]
pub struct JelliumOptions {
    /// One orbital per grid point
    #[arg(long)]
    pub spinless: bool,

    /// Build in the dual (real-space) basis instead of plane waves
    #[arg(long)]
    pub dual: bool,

    /// Add the Madelung constant (uniform systems only)
    #[arg(long = "constant")]
    pub include_constant: bool,

    /// Kinetic energy cutoff for plane waves
    #[arg(long = "cutoff", value_name = "E")]
    pub e_cutoff: Option<f64>,

    /// Truncate the Coulomb interaction
    #[arg(long)]
    pub non_periodic: bool,

    /// Truncation radius for --non-periodic
    #[arg(long, value_name = "R", requires = "non_periodic")]
    pub period_cutoff: Option<f64>,
}

#[derive(Args)]
pub struct MoleculeArgs {
    #[command(flatten)]
    pub output: OutputOptions,

    /// Also save the molecular data as <DIR>/<name>.json
    #[arg(long, value_name = "DIR", global = true)]
    pub save_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub kind: MoleculeKind,
}

#[derive(Subcommand)]
pub enum MoleculeKind {
    /// Atoms evenly spaced on a circle
    Ring(RingArgs),

    /// Atoms on a linear, planar or cubic lattice
    Lattice(AtomicLatticeArgs),

    /// A single neutral atom in its ground-state spin
    Atom(AtomArgs),

    /// A molecule read from an XYZ geometry file
    Xyz(XyzArgs),
}

/// Options shared by every molecule kind.
#[derive(Args)]
#[command(next_help_heading = "Molecule")]
pub struct SpeciesOptions {
    /// Element of every atom
    #[arg(short, long, value_name = "SYMBOL", default_value = "H")]
    pub element: Element,

    /// Basis set name
    #[arg(short, long, value_name = "BASIS", default_value = "sto-3g")]
    pub basis: String,

    /// Net molecular charge
    #[arg(short, long, value_name = "Q", default_value = "0", allow_hyphen_values = true)]
    pub charge: i32,

    /// Molecule output format (inferred from extension if not specified)
    #[arg(long = "outfmt", value_name = "FORMAT")]
    pub format: Option<MoleculeFormat>,
}

#[derive(Args)]
pub struct RingArgs {
    /// Number of atoms in the ring
    #[arg(short = 'n', long = "atoms", value_name = "N")]
    pub n_atoms: usize,

    /// Distance between neighboring atoms (Å)
    #[arg(long, value_name = "Å")]
    pub spacing: f64,

    #[command(flatten)]
    pub species: SpeciesOptions,
}

#[derive(Args)]
pub struct AtomicLatticeArgs {
    /// Atoms along x
    #[arg(long, value_name = "N", default_value = "1")]
    pub nx: usize,

    /// Atoms along y
    #[arg(long, value_name = "N", default_value = "1")]
    pub ny: usize,

    /// Atoms along z
    #[arg(long, value_name = "N", default_value = "1")]
    pub nz: usize,

    /// Lattice spacing (Å)
    #[arg(long, value_name = "Å")]
    pub spacing: f64,

    #[command(flatten)]
    pub species: SpeciesOptions,
}

#[derive(Args)]
pub struct AtomArgs {
    /// Element symbol
    #[arg(value_name = "SYMBOL")]
    pub element: Element,

    /// Basis set name
    #[arg(short, long, value_name = "BASIS", default_value = "sto-3g")]
    pub basis: String,

    /// Molecule output format (inferred from extension if not specified)
    #[arg(long = "outfmt", value_name = "FORMAT")]
    pub format: Option<MoleculeFormat>,
}

#[derive(Args)]
pub struct XyzArgs {
    /// Geometry file (stdin if omitted)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Spin multiplicity 2S + 1
    #[arg(short, long, value_name = "M", default_value = "1")]
    pub multiplicity: u32,

    /// Free-form description appended to the molecule name
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub description: String,

    /// Basis set name
    #[arg(short, long, value_name = "BASIS", default_value = "sto-3g")]
    pub basis: String,

    /// Net molecular charge
    #[arg(short, long, value_name = "Q", default_value = "0", allow_hyphen_values = true)]
    pub charge: i32,

    /// Molecule output format (inferred from extension if not specified)
    #[arg(long = "outfmt", value_name = "FORMAT")]
    pub format: Option<MoleculeFormat>,
}

#[derive(Args)]
pub struct RunArgs {
    /// Recipe file (TOML)
    #[arg(value_name = "RECIPE")]
    pub recipe: PathBuf,

    #[command(flatten)]
    pub output: OutputOptions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MoleculeFormat {
    /// Full molecular data document
    Json,
    /// Geometry only
    Xyz,
}

fn parse_nucleus(text: &str) -> Result<Nucleus, String> {
    let (symbol, coordinates) = text
        .split_once(':')
        .ok_or_else(|| format!("expected SYMBOL:x[,y[,z]], got '{text}'"))?;
    let element: Element = symbol.trim().parse().map_err(|e| format!("{e}"))?;
    let position = coordinates
        .split(',')
        .map(|value| {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("invalid coordinate '{value}' in '{text}'"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Nucleus::new(element, position))
}

pub fn parse() -> Cli {
    Cli::parse()
}
