//! Lambda HTTP function serving simulation intake
//!
//! Configuration comes from `SIMULATOR_*` environment variables; see
//! [`cp_simulator::config`].

use cp_simulator::api::SimulationApi;
use cp_simulator::config::ServiceConfig;
use cp_simulator::storage::{MemStore, SimulationStore};
use cp_simulator::IssuanceEngine;
use lambda_http::{run, service_fn, Error, Request};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config = ServiceConfig::from_env()?;
    let engine = IssuanceEngine::new(config.fee_schedule()?);
    let store: Arc<dyn SimulationStore> = match config.max_records {
        Some(limit) => Arc::new(MemStore::with_capacity_limit(limit)),
        None => Arc::new(MemStore::new()),
    };
    log::info!(
        "serving simulations under {} (persist results: {})",
        config.route_prefix,
        config.persist_results
    );

    let api = Arc::new(SimulationApi::new(store, engine, config));
    run(service_fn(move |req: Request| {
        let api = Arc::clone(&api);
        async move { api.handle(&req) }
    }))
    .await
}
