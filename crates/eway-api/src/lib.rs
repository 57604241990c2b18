// eway-api: Async Rust client for the eWay Bus season-pass backend

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod stats;
pub mod tickets;
pub mod transport;

pub use client::BackendClient;
pub use error::Error;
pub use models::{
    AdminTicket, DashboardStats, LoginResponse, ProfileResponse, StatusResponse, TicketPayload,
};
pub use transport::TransportConfig;
