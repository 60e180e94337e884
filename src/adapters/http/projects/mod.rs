//! Project store endpoints: list, save, delete, export, import.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ProjectHandlers;
pub use routes::project_routes;
