use axum::Router;
use domain_feedback::handlers;

pub fn router(state: &crate::state::AppState) -> Router {
    handlers::router(state.feedback.clone())
}
