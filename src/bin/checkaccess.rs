use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use log::{error, info};

use dynaccess::{load_dump_config, AccessError, AccessEvaluator, RecordStore};

#[derive(Parser)]
#[command(name = "checkaccess")]
#[command(about = "Resolve the effective access a Dynamics user holds over an entity set")]
struct Cli {
    /// Entity set to check, e.g. "accounts"
    #[arg(required_unless_present = "list")]
    entity_set: Option<String>,

    /// systemuserid of the user to check
    #[arg(required_unless_present = "list")]
    systemuserid: Option<String>,

    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Dump directory, overriding the configuration file
    #[arg(short, long)]
    dump_dir: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
    output: OutputFormat,

    /// List the collections available in the dump and exit
    #[arg(long)]
    list: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// Line-oriented report
    Pretty,
    /// The full report as JSON
    Json,
}

fn handle_list(store: &RecordStore) -> Result<(), Box<dyn std::error::Error>> {
    let collections = store.available_collections()?;
    for collection in collections {
        println!("{collection}");
    }
    Ok(())
}

fn handle_check(
    store: &RecordStore,
    entity_set: &str,
    systemuserid: &str,
    output: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        "checking access of user {systemuserid} over '{entity_set}' in dump '{}'",
        store.dump_dir().display()
    );

    let evaluator = AccessEvaluator::new(store.clone());
    let report = match evaluator.check_access(entity_set, systemuserid) {
        Ok(report) => report,
        Err(e @ AccessError::EntityNotFound { .. }) => {
            println!("[-] {e}");
            return Ok(());
        }
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    match output {
        OutputFormat::Pretty => println!("{report}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_dump_config(cli.config.as_deref(), cli.dump_dir.clone())?;
    let store = RecordStore::from_config(&config);

    if cli.list {
        return handle_list(&store);
    }

    let (entity_set, systemuserid) = match (&cli.entity_set, &cli.systemuserid) {
        (Some(entity_set), Some(systemuserid)) => (entity_set.as_str(), systemuserid.as_str()),
        // required_unless_present keeps this unreachable; fail cleanly anyway.
        _ => return Err("an entity set and a systemuserid are required".into()),
    };

    handle_check(&store, entity_set, systemuserid, cli.output)
}
