//! Wire payloads and the pure parsing layer on top of them.

use serde::Deserialize;

use super::{OracleError, RoutePlan};
use crate::grid::{Coord, Grid};

const STATUS_SUCCESS: &str = "success";

/// `/route` response body. Failure responses still carry a grid snapshot,
/// which is intentionally ignored: nothing installs on failure.
#[derive(Debug, Deserialize)]
pub(super) struct RouteResponse {
    pub status: String,
    #[serde(default)]
    pub grid: Vec<Vec<u8>>,
    #[serde(default)]
    pub route: Vec<Coord>,
}

/// `/toggle-obstacle` acknowledgement. The snapshot is informational only.
#[derive(Debug, Deserialize)]
pub(super) struct ToggleResponse {
    #[serde(default)]
    #[allow(dead_code)]
    pub grid: Option<Vec<Vec<u8>>>,
}

/// `/scenario` response body.
#[derive(Debug, Deserialize)]
pub(super) struct ScenarioResponse {
    pub grid: Vec<Vec<u8>>,
}

pub(super) fn parse_route_response(resp: RouteResponse) -> Result<RoutePlan, OracleError> {
    if resp.status != STATUS_SUCCESS {
        return Err(OracleError::Rejected(resp.status));
    }
    let grid = Grid::from_rows(resp.grid).map_err(|err| OracleError::Malformed(err.to_string()))?;
    if resp.route.is_empty() {
        return Err(OracleError::Malformed(
            "success response carries an empty route".to_string(),
        ));
    }
    if let Some(outside) = resp.route.iter().find(|cell| !grid.in_bounds(**cell)) {
        return Err(OracleError::Malformed(format!(
            "route waypoint {outside} lies outside the {0}x{0} grid",
            grid.size()
        )));
    }
    Ok(RoutePlan {
        grid,
        route: resp.route,
    })
}

pub(super) fn parse_scenario_response(resp: ScenarioResponse) -> Result<Grid, OracleError> {
    Grid::from_rows(resp.grid).map_err(|err| OracleError::Malformed(err.to_string()))
}
