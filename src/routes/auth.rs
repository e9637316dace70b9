use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::middleware::auth::auth_middleware;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/send-otp", post(auth::send_otp))
        .route("/verify-otp", post(auth::verify_otp));

    let protected = Router::new()
        .route("/complete-profile", post(auth::complete_profile))
        .route("/me", get(auth::me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    public.merge(protected)
}
