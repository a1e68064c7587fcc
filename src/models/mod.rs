//! Models Module
//!
//! Domain entities plus the admin surface's request/response DTOs.

mod entities;
mod requests;
mod responses;

pub use entities::{Aircraft, Airline, Airport, Flight};
pub use requests::ListKeysParams;
pub use responses::{
    ClearResponse, HealthResponse, KeysResponse, RemoveResponse, StatsResponse,
};
