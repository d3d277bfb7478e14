use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use tracetm::{MachineLoader, Simulator, DEFAULT_MAX_STEPS};

/// Traces a (possibly nondeterministic) Turing machine on an input string, exploring every
/// branch breadth-first.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
#[clap(after_help = "EXAMPLES:
  tracetm machines/unary-increment.csv 00
  RUST_LOG=debug tracetm --trace machines/guess-or-loop.csv a")]
struct Cli {
    /// Path to the machine description file
    machine: PathBuf,

    /// The input string to run the machine on
    input: String,

    /// Maximum number of configurations to inspect before stopping
    #[clap(short, long, default_value_t = DEFAULT_MAX_STEPS as u64, value_parser = clap::value_parser!(u64).range(1..))]
    max_steps: u64,

    /// Print the chain of configurations leading to the verdict
    #[clap(short, long)]
    trace: bool,

    /// Print the report as JSON
    #[clap(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let machine = match MachineLoader::load_machine(&cli.machine) {
        Ok(machine) => machine,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if !machine.is_deterministic() {
        log::debug!("'{}' is nondeterministic", machine.name);
    }

    let max_steps = usize::try_from(cli.max_steps).unwrap_or(usize::MAX);
    let report = Simulator::new(&machine)
        .with_max_steps(max_steps)
        .run(&cli.input);

    if cli.json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    println!("{report}");

    if cli.trace && !report.path.is_empty() {
        println!("\nPath:");
        println!("{}", report.render_path());
    }

    Ok(())
}
