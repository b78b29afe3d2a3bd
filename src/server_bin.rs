use std::sync::Arc;

use shogi_engine::server::{definitions::ServerConfig, routes};
use shogi_engine::Engine;

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

#[tokio::main]
async fn main() {
    env_logger::init();
    let config = ServerConfig::from_env();
    info!("Shogi engine listening on {}", config.address);

    let engine = Arc::new(Engine::default());
    warp::serve(routes(engine, &config)).run(config.address).await;
}
