// Library exports for the server binary and tests

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;
