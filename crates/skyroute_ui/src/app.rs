//! Application state for the SkyRoute operator UI.

use std::sync::Arc;

use log::info;

use skyroute_core::controller::SimulationController;
use skyroute_core::oracle::HttpRouteOracle;

pub struct SkyRouteApp {
    pub controller: SimulationController,
    pub oracle_endpoint: String,
}

impl SkyRouteApp {
    /// Connect to the configured oracle and fetch the initial route.
    pub fn new() -> Self {
        let oracle = HttpRouteOracle::from_env();
        let oracle_endpoint = oracle.endpoint().to_string();
        info!("using route oracle at {oracle_endpoint}");

        let mut controller = SimulationController::new(Arc::new(oracle));
        controller.bootstrap();
        Self {
            controller,
            oracle_endpoint,
        }
    }
}
