//! Registration, login, and logout.

use actix_web::{Either, HttpResponse, web};

use tinta_core::domain::User;
use tinta_core::ports::SessionClaims;
use tinta_shared::dto::{LoginRequest, MessageResponse, RegisterRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::middleware::session::{clear_session_cookie, session_cookie};
use crate::state::AppState;

/// Both registration and login accept a JSON body or a classic form post.
type Body<T> = Either<web::Json<T>, web::Form<T>>;

fn into_inner<T>(body: Body<T>) -> T {
    match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    }
}

/// The seven mandatory registration fields, by their form names.
fn missing_register_fields(req: &RegisterRequest) -> Vec<String> {
    [
        ("lastName", &req.last_name),
        ("firstName", &req.first_name),
        ("username", &req.username),
        ("email", &req.email),
        ("phone", &req.phone),
        ("city", &req.city),
        ("password", &req.password),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| name.to_owned())
    .collect()
}

/// POST /register
pub async fn register(state: web::Data<AppState>, body: Body<RegisterRequest>) -> AppResult<HttpResponse> {
    let req = into_inner(body);

    let missing = missing_register_fields(&req);
    if !missing.is_empty() {
        return Err(AppError::Validation(missing));
    }

    // Pre-checks give the per-field message; the unique indexes still catch
    // a concurrent duplicate at insert time.
    if state
        .users
        .find_by_username(req.username.trim())
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "A user with this username already exists".to_string(),
        ));
    }
    if state.users.find_by_email(req.email.trim()).await?.is_some() {
        return Err(AppError::Conflict(
            "A user with this email already exists".to_string(),
        ));
    }

    let password_hash = state.passwords.hash(&req.password)?;

    let user = User::register(
        &req.last_name,
        &req.first_name,
        &req.username,
        &req.email,
        &req.phone,
        &req.city,
        password_hash,
    );
    let saved = state.users.insert(user).await?;

    tracing::info!(user_id = %saved.id, username = %saved.username, "User registered");

    Ok(HttpResponse::Created().json(MessageResponse::with_redirect(
        "Registration successful!",
        "/auth",
    )))
}

/// POST /login
pub async fn login(state: web::Data<AppState>, body: Body<LoginRequest>) -> AppResult<HttpResponse> {
    let req = into_inner(body);

    if req.username.is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "Enter username and password".to_string(),
        ));
    }

    let user = state
        .users
        .find_by_username(&req.username)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

    let valid = state.passwords.verify(&req.password, &user.password_hash)?;
    if !valid {
        return Err(AppError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    let claims = SessionClaims {
        user_id: user.id,
        username: user.username.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
    };
    let token = state.sessions.issue(&claims).map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token))
        .json(MessageResponse::with_redirect(
            format!("Welcome, {} {}!", user.first_name, user.last_name),
            "/",
        )))
}

/// POST /logout - drop the session cookie, whether or not one was set.
pub async fn logout() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((actix_web::http::header::LOCATION, "/"))
        .cookie(clear_session_cookie())
        .finish()
}

/// GET /auth - login/registration page scaffold (rendering is client-side).
pub async fn auth_page() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "page": "auth" }))
}
