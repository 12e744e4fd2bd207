use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::json;

use super::response::{parse_route_response, parse_scenario_response, ToggleResponse};
use super::{OracleError, RouteOracle, RoutePlan};
use crate::grid::{Coord, Grid};
use crate::state::RoutingMode;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// Local development oracle, as deployed alongside the client.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";

/// Thin JSON-over-HTTP client for the planning service.
#[derive(Debug, Clone)]
pub struct HttpRouteOracle {
    client: Client,
    endpoint: String,
}

impl HttpRouteOracle {
    /// Create a client for the given endpoint (e.g. `http://127.0.0.1:5000`).
    pub fn new(endpoint: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build oracle client");
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Endpoint from `SKYROUTE_ORACLE_URL`, falling back to [`DEFAULT_ENDPOINT`].
    pub fn from_env() -> Self {
        let endpoint =
            std::env::var("SKYROUTE_ORACLE_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        Self::new(&endpoint)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn post(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<reqwest::blocking::Response, OracleError> {
        let response = self
            .client
            .post(format!("{}{}", self.endpoint, path))
            .json(&body)
            .send()
            .map_err(OracleError::Http)?;
        if !response.status().is_success() {
            return Err(OracleError::Status(response.status().as_u16()));
        }
        Ok(response)
    }
}

impl RouteOracle for HttpRouteOracle {
    fn request_route(
        &self,
        mode: RoutingMode,
        anchor: Option<Coord>,
    ) -> Result<RoutePlan, OracleError> {
        let body = json!({ "mode": mode.wire_name(), "current": anchor });
        let response = self.post("/route", body)?;
        parse_route_response(response.json().map_err(OracleError::Json)?)
    }

    fn toggle_obstacle(&self, cell: Coord) -> Result<(), OracleError> {
        let body = json!({ "x": cell.x, "y": cell.y });
        let response = self.post("/toggle-obstacle", body)?;
        // The ack carries a grid snapshot, but it is never applied: grid and
        // route must always install together from the follow-up route query.
        let _ack: ToggleResponse = response.json().map_err(OracleError::Json)?;
        Ok(())
    }

    fn load_scenario(&self, name: &str) -> Result<Grid, OracleError> {
        let body = json!({ "name": name });
        let response = self.post("/scenario", body)?;
        parse_scenario_response(response.json().map_err(OracleError::Json)?)
    }
}
