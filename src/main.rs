use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use figschema::{run_batch, BatchCommand, BatchConfig, BatchReport};
use figschema_fetch::{fetch_and_save, DesignIds, DesignSource, FetchConfig, HttpDesignSource};
use figschema_projector::RandomIdSource;
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "figschema")]
#[command(about = "Turn exported design node trees into form component schemas", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Color token table (JSON) to use instead of the built-in design system
    #[arg(long, global = true, value_name = "PATH")]
    tokens: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a design document by file URL and save it with its ids
    Fetch {
        /// Design file URL carrying a `node-id` query parameter
        #[arg(long)]
        url: String,

        /// File id to record instead of the one in the URL
        #[arg(long)]
        file_id: Option<String>,

        /// Design API base URL
        #[arg(long)]
        api_base: Option<String>,
    },

    /// Look up a single node by file and node id
    NodeDetails {
        #[arg(long)]
        file_id: String,

        #[arg(long)]
        node_id: String,

        /// Save the response here instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Design API base URL
        #[arg(long)]
        api_base: Option<String>,
    },

    /// Project checkbox instances
    Checkbox(BatchArgs),

    /// Project avatar group instances
    AvatarGroup(BatchArgs),

    /// Run every projector over one document
    All(BatchArgs),
}

#[derive(Args)]
struct BatchArgs {
    /// Source document
    #[arg(short, long, default_value = "figmaResponse.json")]
    input: PathBuf,

    /// Directory for the transformed output files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

impl BatchArgs {
    fn into_config(self, tokens: Option<PathBuf>) -> BatchConfig {
        BatchConfig {
            input: self.input,
            output_dir: self.output_dir,
            tokens,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn fetch_config(api_base: Option<String>, file_id: Option<String>) -> FetchConfig {
    let mut config = FetchConfig::from_env();
    if let Some(base) = api_base {
        config.base_url = base;
    }
    if file_id.is_some() {
        config.file_id = file_id;
    }
    config
}

fn print_report(report: &BatchReport) {
    let kind = report.kind.label();
    match &report.written {
        Some(path) => println!(
            "{} Processed {} {} component(s), wrote {}",
            "✅".green(),
            report.count,
            kind,
            path.display().to_string().cyan()
        ),
        None => {
            println!("{} No {} components were found", "⚠️ ".yellow(), kind);
            println!("{}", "Make sure that:".cyan());
            println!("   1. The document contains component instance nodes");
            println!("   2. The components are exported as INSTANCE nodes of the expected kind");
            println!("   3. The source document is fresh (run `figschema fetch`)");
        }
    }
}

fn batch(command: BatchCommand, args: BatchArgs, tokens: Option<PathBuf>) -> Result<()> {
    let config = args.into_config(tokens);
    for report in run_batch(command, &config, RandomIdSource::new())? {
        print_report(&report);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Fetch {
            url,
            file_id,
            api_base,
        } => {
            let config = fetch_config(api_base, file_id);
            let source = HttpDesignSource::new(&config)?;
            let outcome = fetch_and_save(&source, &config, &url).await?;
            println!(
                "{} Files created: {} and {}",
                "✅".green(),
                outcome.response_path.display(),
                outcome.ids_path.display()
            );
        }
        Commands::NodeDetails {
            file_id,
            node_id,
            output,
            api_base,
        } => {
            let config = fetch_config(api_base, None);
            let source = HttpDesignSource::new(&config)?;
            let details = source
                .fetch_node_details(&DesignIds::new(file_id, node_id))
                .await?;
            let pretty = serde_json::to_string_pretty(&details)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, pretty)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("{} Node details saved to {}", "✅".green(), path.display());
                }
                None => println!("{}", pretty),
            }
        }
        Commands::Checkbox(args) => batch(BatchCommand::Checkbox, args, cli.tokens)?,
        Commands::AvatarGroup(args) => batch(BatchCommand::AvatarGroup, args, cli.tokens)?,
        Commands::All(args) => batch(BatchCommand::All, args, cli.tokens)?,
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
