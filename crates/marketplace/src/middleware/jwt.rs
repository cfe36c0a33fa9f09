use crate::domain::actor::Actor;
use axum::{
    Extension, Json,
    body::Body,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use shared::{
    abstract_trait::DynJwtService,
    errors::{ErrorKind, ErrorResponse},
};
use tracing::debug;

fn unauthorized(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse::new(ErrorKind::Unauthenticated, message)),
    )
}

/// Resolves the caller from the `token` cookie or a Bearer header and
/// exposes it to handlers as an [`Actor`] extension.
pub async fn auth_middleware(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let token = cookie_jar
        .get("token")
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| auth_value.strip_prefix("Bearer ").map(str::to_owned))
        });

    let Some(token) = token else {
        return Err(unauthorized("You are not logged in, please provide token"));
    };

    let claims = match jwt.verify_token(&token, "access") {
        Ok(claims) => claims,
        Err(e) => {
            debug!("🔒 Rejected access token: {e}");
            return Err(unauthorized("Invalid token"));
        }
    };

    req.extensions_mut()
        .insert(Actor::from_claims(claims.user_id, &claims.roles));

    Ok(next.run(req).await)
}
