use colored::Colorize;
use realtime_iir::config::{load_config, save_config, Config};
use realtime_iir::local::{monitor, process_file};
use std::error::Error;
use std::process;

const USAGE: &str = "Usage:
  realtime-iir process <config.yaml> <input.csv> <output.csv>
  realtime-iir monitor [config.yaml] [samples]
  realtime-iir init-config <config.yaml>";

fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    match args.first().map(String::as_str) {
        Some("process") => {
            let [config_path, input, output] = &args[1..] else {
                return Err(USAGE.into());
            };
            let config = load_config(config_path)?;
            process_file::run(&config, input, output)?;
        }
        Some("monitor") => {
            let config = match args.get(1) {
                Some(path) => load_config(path)?,
                None => Config::default(),
            };
            let samples = args
                .get(2)
                .map(|n| n.parse::<usize>())
                .transpose()
                .map_err(|e| format!("Invalid sample count: {}", e))?;
            monitor::run(&config, samples)?;
        }
        Some("init-config") => {
            let Some(path) = args.get(1) else {
                return Err(USAGE.into());
            };
            save_config(&Config::default(), path)?;
            println!("Wrote default config to {}", path);
        }
        _ => println!("{}", USAGE),
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        eprintln!("{}", e.to_string().red());
        process::exit(1);
    }
}
