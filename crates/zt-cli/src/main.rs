use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use zt_cli::commands::ranges::RangesRequest;
use zt_cli::commands::{list, ranges, sign, util};
use zt_cli::{Cli, Commands, Config};
use zt_core::SearchWindow;
use zt_ephem::Ayanamsa;

/// Resolves the ayanamsa from the command line, falling back to the config.
fn resolve_ayanamsa(arg: Option<&str>, config: &Config) -> Result<Ayanamsa> {
    match arg {
        Some(name) => Ok(name.parse()?),
        None => config.ayanamsa(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    let quantum = cli.precision.unwrap_or(config.precision);

    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Sign {
            planet,
            date,
            system,
            ayanamsa,
        }) => {
            let instant = util::parse_date(date)?;
            let ayanamsa = resolve_ayanamsa(ayanamsa.as_deref(), &config)?;
            sign::run(&mut stdout, *planet, instant, *system, ayanamsa)?;
        }
        Some(Commands::Ranges {
            planet,
            sign,
            start,
            end,
            system,
            ayanamsa,
            format,
            output,
        }) => {
            let start = util::parse_date(start)?;
            let end = util::parse_date(end)?;
            let window =
                SearchWindow::new(start, end).context("Start date must be before end date")?;
            let request = RangesRequest {
                body: *planet,
                sign: sign.clone(),
                window,
                system: *system,
                ayanamsa: resolve_ayanamsa(ayanamsa.as_deref(), &config)?,
                quantum,
                steps: config.step_table()?,
            };
            let mut stderr = std::io::stderr().lock();
            ranges::run(&mut stdout, &mut stderr, &request, *format, output.as_deref())?;
        }
        Some(Commands::ListPlanets) => list::planets(&mut stdout)?,
        Some(Commands::ListSigns) => list::signs(&mut stdout)?,
        Some(Commands::ListAyanamsas) => list::ayanamsas(&mut stdout)?,
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
