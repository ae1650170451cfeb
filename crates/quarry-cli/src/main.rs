use clap::Parser;
use cli::{Args, Commands};
use logging::setup_logging;
use nu_ansi_term::Color::Green;
use quarry_config::{generate_default_config, set_config_path, Config};
use quarry_gen::{Generator, ModelName};
use tracing::info;
use utils::{Colored, COLOR};

mod cli;
mod logging;
mod utils;

fn handle_cli() -> miette::Result<()> {
    let args = Args::parse();

    setup_logging(&args);

    if args.no_color {
        let mut color = COLOR.write().unwrap();
        *color = false;
    }

    if let Some(ref c) = args.config {
        set_config_path(c);
    }

    match args.command {
        Commands::Config { init } => {
            if init {
                let path = generate_default_config()?;
                info!("Created {}", Colored(Green, path.display()));
            } else {
                let config = Config::load()?;
                print!("{}", config.to_toml()?);
            }
        }
        Commands::GeneratePolicy { model, path } => {
            let config = Config::load()?;
            let model = ModelName::new(model)?;
            let out_dir = path.unwrap_or(config.paths.policy);

            let target = Generator::new(out_dir).generate_policy(&model)?;
            info!(
                "Policy for {} written to {}",
                model.pascal(),
                Colored(Green, target.display())
            );
        }
        Commands::GenerateRepository { model, path } => {
            let config = Config::load()?;
            let model = ModelName::new(model)?;
            let out_dir = path.unwrap_or(config.paths.repository);

            let target = Generator::new(out_dir).generate_repository(&model)?;
            info!(
                "Repository for {} written to {}",
                model.pascal(),
                Colored(Green, target.display())
            );
        }
    }

    Ok(())
}

fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    if let Err(err) = handle_cli() {
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}
