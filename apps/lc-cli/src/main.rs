use clap::{Parser, Subcommand};
use lc_core::units::{microcoulomb, microfarad, millihenry};
use lc_path::CircuitLayout;
use lc_sim::{CircuitParams, SimError, SimOptions, Simulation};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lc-cli")]
#[command(about = "LC oscillator simulation tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation and print per-frame snapshots
    Run {
        /// Capacitance in microfarads
        #[arg(long, default_value_t = 100.0)]
        capacitance: f64,
        /// Inductance in millihenries
        #[arg(long, default_value_t = 50.0)]
        inductance: f64,
        /// Initial charge in microcoulombs (sign sets current direction)
        #[arg(long, default_value_t = 50.0)]
        charge: f64,
        /// Simulation speed factor
        #[arg(long, default_value_t = 1.0)]
        speed: f64,
        /// Number of frames to advance
        #[arg(long, default_value_t = 200)]
        frames: usize,
        /// Number of visual charge carriers
        #[arg(long, default_value_t = 160)]
        carriers: usize,
        /// Seed for carrier phases (omit for entropy)
        #[arg(long)]
        seed: Option<u64>,
        /// Emit one JSON snapshot per line instead of the readout table
        #[arg(long)]
        json: bool,
        /// Export the scalar history window as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Print the standard circuit loop's segment table
    Path,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Path(#[from] lc_path::PathError),
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            capacitance,
            inductance,
            charge,
            speed,
            frames,
            carriers,
            seed,
            json,
            csv,
        } => cmd_run(
            capacitance,
            inductance,
            charge,
            speed,
            frames,
            carriers,
            seed,
            json,
            csv,
        ),
        Commands::Path => cmd_path(),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_run(
    capacitance_uf: f64,
    inductance_mh: f64,
    charge_uc: f64,
    speed: f64,
    frames: usize,
    carriers: usize,
    seed: Option<u64>,
    json: bool,
    csv: Option<PathBuf>,
) -> Result<(), CliError> {
    let params = CircuitParams::new(
        microfarad(capacitance_uf),
        millihenry(inductance_mh),
        microcoulomb(charge_uc),
    )?;
    let options = SimOptions {
        speed_factor: speed,
        carrier_count: carriers,
        seed,
        ..SimOptions::default()
    };
    let mut sim = Simulation::new(params, CircuitLayout::default(), options)?;

    if !json {
        println!(
            "natural period: {:.4e} s, peak current: {:.4e} A",
            params.natural_period(),
            params.peak_current()
        );
        println!(
            "{:>12} {:>10} {:>10} {:>9} {:>9} {:>10} {:>24}",
            "t (s)", "Q (uC)", "I (mA)", "Vc (V)", "Vl (V)", "U (uJ)", "phase"
        );
    }

    sim.start()?;
    let print_every = (frames / 20).max(1);
    for frame in 0..frames {
        let snapshot = match sim.tick() {
            Ok(snapshot) => snapshot,
            Err(err @ SimError::Unstable { .. }) => {
                eprintln!("run halted: {err}");
                break;
            }
            Err(err) => return Err(err.into()),
        };
        if json {
            println!("{}", serde_json::to_string(&snapshot)?);
        } else if frame % print_every == 0 {
            let s = &snapshot.scalars;
            println!(
                "{:>12.4e} {:>10.3} {:>10.3} {:>9.3} {:>9.3} {:>10.4} {:>24?}",
                s.t_s,
                s.q_c * 1e6,
                s.i_a * 1e3,
                s.v_c_v,
                s.v_l_v,
                s.total_energy_j * 1e6,
                snapshot.phase
            );
        }
    }

    if let Some(path) = csv {
        let mut out = String::from("t_s,q_c,i_a,di_dt_a_per_s,v_c_v,v_l_v,u_e_j,u_l_j,u_total_j\n");
        for r in sim.history().iter() {
            out.push_str(&format!(
                "{},{},{},{},{},{},{},{},{}\n",
                r.t_s,
                r.q_c,
                r.i_a,
                r.di_dt_a_per_s,
                r.v_c_v,
                r.v_l_v,
                r.electric_energy_j,
                r.magnetic_energy_j,
                r.total_energy_j
            ));
        }
        fs::write(&path, out)?;
        println!("wrote {} history records to {}", sim.history().len(), path.display());
    }

    Ok(())
}

fn cmd_path() -> Result<(), CliError> {
    let path = CircuitLayout::default().build_loop()?;
    let total = path.total_length();
    println!("total length: {total:.4}");
    println!(
        "{:<18} {:>10} {:>12} {:>10} {:>10}",
        "kind", "length", "cumulative", "p_start", "p_end"
    );
    for seg in path.segments() {
        println!(
            "{:<18} {:>10.4} {:>12.4} {:>10.4} {:>10.4}",
            format!("{:?}", seg.kind),
            seg.length,
            seg.cumulative_length,
            seg.span_start() / total,
            seg.cumulative_length / total
        );
    }
    Ok(())
}
