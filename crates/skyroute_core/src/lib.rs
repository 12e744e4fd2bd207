//! Client-side core of the SkyRoute UAV grid simulator.
//!
//! Owns the simulation state machine (grid, route, playback cursor) and
//! coordinates obstacle-driven re-planning against an external route oracle
//! over HTTP. Route computation itself is the oracle's job; this crate only
//! consumes its request/response contract. Rendering lives in `skyroute_ui`.

pub mod controller;
pub mod dispatch;
pub mod grid;
pub mod oracle;
pub mod playback;
pub mod reroute;
pub mod scenario;
pub mod state;
