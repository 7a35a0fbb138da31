use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::debug;
use std::process::ExitCode;

use dbrl::{BrlImporter, ContainerEngine, DockerEngine, LayerProcessor, Notifier, PodmanEngine, TarArchiver};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Engine {
    Podman,
    Docker,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(help = "Image to import (e.g., quay.io/fedora:42)")]
    image: String,

    #[arg(
        short,
        long,
        value_enum,
        default_value = "podman",
        help = "Container engine to use"
    )]
    engine: Engine,

    #[arg(long, help = "Run `brl import` without sudo (when already root)")]
    no_sudo: bool,

    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Verbose mode (-v for info, -vv for debug, -vvv for trace). Also switches to text-based progress"
    )]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not errors
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let notifier = Notifier::new(cli.verbose);
    notifier.init_global_logger();

    debug!("Engine: {:?}", cli.engine);
    debug!("Elevate import with sudo: {}", !cli.no_sudo);

    let importer = BrlImporter::new(!cli.no_sudo);
    let layer_name = match cli.engine {
        Engine::Podman => {
            import(PodmanEngine::new(), importer, notifier, &cli.image)?
        }
        Engine::Docker => {
            import(DockerEngine::new(), importer, notifier, &cli.image)?
        }
    };

    println!();
    println!("SUCCESS: Image imported as layer '{}'", layer_name);
    println!("You can now use it with:");
    println!("  brl run -l {} <command>", layer_name);
    println!();
    println!("Example:");
    println!("  brl run -l {} bash", layer_name);

    Ok(())
}

fn import<E: ContainerEngine>(
    engine: E,
    importer: BrlImporter,
    notifier: Notifier,
    image: &str,
) -> Result<String> {
    let processor = LayerProcessor::new(engine, TarArchiver::new(), importer, notifier);
    processor.convert(image)
}
