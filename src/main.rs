use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use rusty_hh::error::HHError;
use rusty_hh::model::{HHModel, MembraneParameters};
use rusty_hh::simulation::Simulation;
use rusty_hh::stimulus::Stimulus;

#[derive(Parser, Debug)]
struct Args {
    /// The pulse amplitude (µA/cm²)
    #[arg(short = 'I', long, default_value = "20.0")]
    current: f64,
    /// The pulse onset (ms)
    #[arg(long, default_value = "60.0")]
    pulse_start: f64,
    /// The pulse offset (ms)
    #[arg(long, default_value = "190.0")]
    pulse_end: f64,
    /// The simulated duration (ms)
    #[arg(short = 'T', long, default_value = "250.0")]
    duration: f64,
    /// The integration step size (ms)
    #[arg(long, default_value = "0.05")]
    step_size: f64,
    /// Use the physiological parameters (resting near -65 mV) instead of the squid-axon ones
    #[arg(long)]
    physiological: bool,
    /// The voltage threshold (mV, relative to rest) used to count spikes
    #[arg(long, default_value = "50.0")]
    spike_threshold: f64,
    /// Where to write the simulation result as JSON
    #[arg(short, long)]
    output: Option<String>,
}

fn main() -> Result<(), HHError> {
    let args = Args::parse();

    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{l} - {m}\n")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))
        .map_err(|e| HHError::IOError(e.to_string()))?;
    log4rs::init_config(config).map_err(|e| HHError::IOError(e.to_string()))?;

    log::info!("{:?}", args);

    let parameters = if args.physiological {
        MembraneParameters::physiological()
    } else {
        MembraneParameters::squid_axon()
    };
    let resting_potential = parameters.convention.resting_potential();

    let mut stimulus = Stimulus::build(args.duration, args.step_size)?;
    stimulus.pulse(args.pulse_start, args.pulse_end, args.current)?;
    log::info!("Stimulus construction: done! ({} samples)", stimulus.len());

    let mut simulation = Simulation::new(HHModel::at_rest(parameters)?);
    let result = simulation.run_waveform(stimulus.values(), args.step_size)?;

    let spikes = result.spike_times(resting_potential + args.spike_threshold);
    log::info!(
        "Simulation: done! Peak voltage is {:.3} mV, {} spikes",
        result.peak_voltage().unwrap_or(f64::NAN),
        spikes.len()
    );
    if let (Some(first), Some(last)) = (spikes.first(), spikes.last()) {
        log::info!("First spike at {:.2} ms, last spike at {:.2} ms", first, last);
    }

    if let Some(path) = args.output {
        result.save_to(&path)?;
        log::info!("Result saving: done! Saved to {}", path);
    }

    Ok(())
}
