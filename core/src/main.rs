use std::io::Read;

use common::{
    env_config::{Config, StoreBackend},
    error::{AppError, Res},
};
use db::{memory::MemorySubscriptionStore, store::{PgSubscriptionStore, SubscriptionStore}};
use log::{error, info};
use serde_json::Value;
use subs::{Clock, SubscriptionService, SystemClock, dtos::sub::SubscriptionInput};

/// Reads one subscription object, or an array of them, from `path` or stdin.
fn read_inputs(path: Option<String>) -> Res<Vec<Value>> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    match serde_json::from_str::<Value>(&raw)? {
        Value::Array(items) => Ok(items),
        single => Ok(vec![single]),
    }
}

/// Creates every record and prints one JSON line per input. Returns the number of failures.
async fn ingest<S, C>(service: &SubscriptionService<S, C>, inputs: Vec<Value>) -> usize
where
    S: SubscriptionStore,
    C: Clock,
{
    let mut failed = 0;
    for value in inputs {
        let result = match serde_json::from_value::<SubscriptionInput>(value) {
            Ok(input) => service.create(input).await,
            Err(e) => Err(AppError::from(e)),
        };

        match result.and_then(|record| serde_json::to_value(record).map_err(AppError::from)) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                failed += 1;
                println!("{}", e.to_json());
            }
        }
    }
    failed
}

#[tokio::main]
async fn main() -> Res<()> {
    // get env vars
    let config = Config::from_env();

    // init logger
    logger::setup(
        config.log_level,
        config.console_logging_enabled,
        config.log_file.as_deref(),
    )
    .expect("Failed to set up logger");

    let inputs = read_inputs(std::env::args().nth(1))?;
    info!("ingesting {} subscription(s)", inputs.len());

    let failed = match config.store_backend {
        StoreBackend::Memory => {
            let service = SubscriptionService::new(
                MemorySubscriptionStore::new(),
                SystemClock,
                config.renewal_arithmetic,
            );
            ingest(&service, inputs).await
        }
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or_else(|| AppError::Internal("DATABASE_URL must be set".to_string()))?;

            // init db connection
            let pool = db::setup(database_url, config.is_production()).await?;
            let service = SubscriptionService::new(
                PgSubscriptionStore::new(pool),
                SystemClock,
                config.renewal_arithmetic,
            );
            ingest(&service, inputs).await
        }
    };

    if failed > 0 {
        error!("{} subscription(s) were rejected", failed);
        std::process::exit(1);
    }
    Ok(())
}
