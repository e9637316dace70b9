use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

use crate::models::user::Claims;
use crate::response;
use crate::services::token_service::TokenService;
use crate::state::AppState;

/// Verifies the bearer token and stashes the claims in request extensions
/// for the handlers behind it.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let claims = match extract_claims(request.headers(), &state.token_service) {
        Some(claims) => claims,
        None => return response::error(StatusCode::UNAUTHORIZED, "Unauthorized access"),
    };

    request.extensions_mut().insert(claims);
    next.run(request).await
}

fn extract_claims(headers: &HeaderMap, tokens: &TokenService) -> Option<Claims> {
    let token = headers
        .get("authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))?;

    tokens.verify(token).ok()
}
