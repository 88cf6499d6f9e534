//! Generate WCSim macro files for an mPMT 58 light-injection scan.
//!
//! Each invocation emits one water-tuning descriptor plus one position macro
//! per sampled point, ready to hand to WCSim run by run.
//!
//! Usage:
//!   write_mac_files -f 12 -a 1.1 -r 0.75 -t 10 -p 10
//!   write_mac_files -f 12 -a 10e10 -r 0.75 -u 1000 --seed 7
//!   RUST_LOG=debug write_mac_files -f 3 -a 1.1 -r 10e10 -d 500

use clap::Parser;

use lightscan::{generate, Cli, RunConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = RunConfig::from_cli(cli)?;
    print_banner(&config);

    let summary = generate(&config)?;

    println!(
        "Wrote {} position macros and 1 tuning descriptor to {}",
        summary.positions_written,
        config.out_dir.display()
    );
    if let Some(seed) = summary.seed {
        println!("Sampler seed: {seed} (pass --seed {seed} to reproduce)");
    }

    Ok(())
}

fn print_banner(config: &RunConfig) {
    println!("---------------------------------------------------------------");
    println!("Creating WCSim scan configuration files");
    println!("{:<20}{}", "File ID:", config.file_id);
    println!("{:<20}{:.2} cm", "Source radius:", config.radius_cm);
    println!("{:<20}{}", "Events per run:", config.n_events);
    println!("{:<20}{}", "abwff:", config.absorption);
    println!("{:<20}{}", "rayff:", config.rayleigh);
    println!("{:<20}{}", "Label:", config.label());
    println!("{:<20}{}", "Sampling:", config.plan.describe());
    println!("{:<20}{}", "Output directory:", config.out_dir.display());
    println!("---------------------------------------------------------------");
}
