use clap::Parser;
use miette::{IntoDiagnostic, Result};
use paysettle::application::config::{ReprocessPolicy, SettlementConfig};
use paysettle::application::engine::SettlementEngine;
use paysettle::infrastructure::in_memory::in_memory_engine;
use paysettle::interfaces::csv::cashout_writer::CashoutWriter;
use paysettle::interfaces::csv::operation_reader::OperationReader;
use paysettle::interfaces::csv::order_reader::OrderReader;
use paysettle::observability;
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input operations CSV file
    input: PathBuf,

    /// Orders CSV file (`id, amount`) to provision before processing
    #[arg(long)]
    orders: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// What to do when a payment that already has an outcome is processed again
    #[arg(long, value_enum, default_value_t = ReprocessPolicy::Overwrite)]
    reprocess: ReprocessPolicy,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[cfg(feature = "storage-rocksdb")]
fn build_engine(db_path: Option<PathBuf>, config: SettlementConfig) -> Result<SettlementEngine> {
    use paysettle::infrastructure::rocksdb::RocksDBStore;

    let Some(db_path) = db_path else {
        return Ok(in_memory_engine(config));
    };
    let store = RocksDBStore::open(db_path).into_diagnostic()?;
    Ok(SettlementEngine::new(
        Box::new(store.clone()),
        Box::new(store.clone()),
        Box::new(store),
        config,
    ))
}

#[cfg(not(feature = "storage-rocksdb"))]
fn build_engine(db_path: Option<PathBuf>, config: SettlementConfig) -> Result<SettlementEngine> {
    if db_path.is_some() {
        tracing::warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }
    Ok(in_memory_engine(config))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init(cli.log_json);

    let config = SettlementConfig::default().with_reprocess(cli.reprocess);
    let engine = build_engine(cli.db_path, config)?;

    if let Some(orders) = cli.orders {
        let file = File::open(orders).into_diagnostic()?;
        for order in OrderReader::new(file).orders() {
            match order {
                Ok(order) => {
                    engine.provision_order(order).await.into_diagnostic()?;
                }
                Err(e) => tracing::error!(error = %e, "Error reading order"),
            }
        }
    }

    let file = File::open(cli.input).into_diagnostic()?;
    for command in OperationReader::new(file).commands() {
        match command {
            Ok(command) => match engine.execute(command).await {
                Ok(()) => {}
                Err(e) if e.is_domain() => tracing::warn!(error = %e, "Operation rejected"),
                Err(e) => tracing::error!(error = %e, "Error processing operation"),
            },
            Err(e) => tracing::error!(error = %e, "Error reading operation"),
        }
    }

    let cashouts = engine.into_cashouts().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = CashoutWriter::new(stdout.lock());
    writer.write_cashouts(&cashouts).into_diagnostic()?;

    Ok(())
}
