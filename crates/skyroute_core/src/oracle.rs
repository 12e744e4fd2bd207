//! Route oracle adapter: the seam to the external planning service.
//!
//! The oracle owns route computation; this module only speaks its
//! request/response contract. [`HttpRouteOracle`] talks JSON-over-HTTP to the
//! real service, and tests substitute scripted implementations of
//! [`RouteOracle`]. Failures never mutate simulation state; callers decide
//! what to surface.

mod error;
mod http;
mod response;

pub use error::OracleError;
pub use http::{HttpRouteOracle, DEFAULT_ENDPOINT};

use crate::grid::{Coord, Grid};
use crate::state::RoutingMode;

/// A grid snapshot plus the route computed over it, as returned by one
/// successful `/route` exchange. Always installed as a pair so a reader can
/// never observe a grid from one reply and a route from another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePlan {
    pub grid: Grid,
    pub route: Vec<Coord>,
}

/// External planning service contract. Implementations must be `Send + Sync`
/// so exchanges can run on worker threads.
pub trait RouteOracle: Send + Sync {
    /// Ask for a route under `mode`. `anchor` re-plans from the vehicle's
    /// current position; without it the route starts at the grid start.
    fn request_route(
        &self,
        mode: RoutingMode,
        anchor: Option<Coord>,
    ) -> Result<RoutePlan, OracleError>;

    /// Flip the occupancy of `cell` on the service side. Does not return a
    /// route; callers refresh with [`RouteOracle::request_route`] afterward.
    fn toggle_obstacle(&self, cell: Coord) -> Result<(), OracleError>;

    /// Replace the whole grid with the named preset layout.
    fn load_scenario(&self, name: &str) -> Result<Grid, OracleError>;
}
