//! Session extractors over the signed `session` cookie.
//!
//! Two flavors, matching how routes react to a missing session: `Session`
//! rejects with 403 (the JSON routes), `MaybeSession` never fails and the
//! handler decides (the page routes, which redirect to `/auth`).

use actix_web::{FromRequest, HttpRequest, cookie::Cookie, dev::Payload, web};
use std::future::{Ready, ready};

use tinta_core::ports::{AuthError, SessionClaims};
use tinta_shared::ErrorResponse;

use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Build the session cookie around a signed token.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .finish()
}

/// A cookie that instructs the client to drop the session.
pub fn clear_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .finish();
    cookie.make_removal();
    cookie
}

/// Authenticated session extractor - rejects with 403 when absent/invalid.
#[derive(Debug, Clone)]
pub struct Session(pub SessionClaims);

/// Error type for session extraction failures.
#[derive(Debug)]
pub struct SessionRejection(AuthError);

impl std::fmt::Display for SessionRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for SessionRejection {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::FORBIDDEN
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code())
            .json(ErrorResponse::forbidden("Not signed in"))
    }
}

fn extract_claims(req: &HttpRequest) -> Result<SessionClaims, AuthError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AuthError::InvalidSession("Server configuration error".to_string()))?;

    let cookie = req
        .cookie(SESSION_COOKIE)
        .ok_or(AuthError::MissingSession)?;

    state.sessions.decode(cookie.value())
}

impl FromRequest for Session {
    type Error = SessionRejection;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_claims(req).map(Session).map_err(SessionRejection))
    }
}

/// Optional session extractor - doesn't fail if not authenticated.
pub struct MaybeSession(pub Option<SessionClaims>);

impl FromRequest for MaybeSession {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(MaybeSession(extract_claims(req).ok())))
    }
}
