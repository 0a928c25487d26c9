use crate::state::AppState;
use axum::Router;

pub(crate) mod claims;
pub(crate) mod dto;
pub(crate) mod extractors;
pub mod handlers;
pub(crate) mod jwt;
mod password;
pub(crate) mod repo;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
