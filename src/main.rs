use clap::{Parser as ClapParser, Subcommand};
use stageline::cli::{self, CliError, ConvertOptions};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "stageline")]
#[command(about = "Stageline - compile declarative multi-stage pipelines to and from their backend form")]
#[command(version)]
struct Cli {
    /// Log compiler decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile surface JSON into backend JSON
    Compile {
        /// Surface JSON (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Reconstruct surface JSON from backend JSON
    Decompile {
        /// Backend JSON (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Check that surface JSON compiles
    Validate {
        /// Surface JSON (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,
    },

    /// List documentation topics
    Docs,

    /// Show documentation for a specific topic
    Doc {
        /// Topic name (use 'stageline docs' to list topics)
        topic: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Compile { input, pretty } => read_options(input, pretty)
            .and_then(|o| cli::execute_compile(&o))
            .map(|out| println!("{}", out)),
        Commands::Decompile { input, pretty } => read_options(input, pretty)
            .and_then(|o| cli::execute_decompile(&o))
            .map(|out| println!("{}", out)),
        Commands::Validate { input } => read_options(input, false)
            .and_then(|o| cli::execute_validate(&o))
            .map(|stages| println!("Configuration is valid ({} stages)", stages)),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { topic } => cli::get_doc_topic(&topic).map(|content| print!("{}", content)),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("stageline=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

fn read_options(input: Option<String>, pretty: bool) -> Result<ConvertOptions, CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Some(buffer)
        }
        None => None,
    };

    Ok(ConvertOptions { input, pretty })
}
