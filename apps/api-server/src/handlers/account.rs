//! The signed-in user's own account: credentials, avatar, profile.

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use actix_web::{Either, HttpResponse, http::header, web};
use chrono::NaiveDate;

use tinta_core::domain::{ProfileChanges, split_full_name};
use tinta_shared::dto::{
    AvatarResponse, MessageResponse, ProfileForm, ProfilePage, SecurityUpdateRequest,
};
use tinta_infra::storage::AVATAR_DIR;

use crate::handlers::redirect;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::session::{MaybeSession, Session, clear_session_cookie};
use crate::state::AppState;

/// POST /update-security
///
/// Everything the old password authorizes is folded into a single UPDATE,
/// so a concurrent reader never sees a partial change.
pub async fn update_security(
    state: web::Data<AppState>,
    session: Session,
    body: Either<web::Json<SecurityUpdateRequest>, web::Form<SecurityUpdateRequest>>,
) -> AppResult<HttpResponse> {
    let req = match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    };

    let mut user = state
        .users
        .find_by_id(session.0.user_id)
        .await?
        .ok_or_else(|| AppError::Forbidden("User not found".to_string()))?;

    if req.old_password.is_empty()
        || !state.passwords.verify(&req.old_password, &user.password_hash)?
    {
        return Err(AppError::BadRequest("Old password is incorrect".to_string()));
    }

    // Empty strings from half-filled forms count as absent.
    let new_password = req.new_password.as_deref().filter(|s| !s.is_empty());
    let confirmation = req.new_password_confirm.as_deref().filter(|s| !s.is_empty());
    if new_password.is_some() || confirmation.is_some() {
        if new_password != confirmation {
            return Err(AppError::BadRequest(
                "New passwords do not match".to_string(),
            ));
        }
        if let Some(password) = new_password {
            user.set_password_hash(state.passwords.hash(password)?);
        }
    }

    if let Some(email) = req.email.as_deref().filter(|s| !s.is_empty()) {
        if email != user.email {
            if state.users.email_taken_by_other(email, user.id).await? {
                return Err(AppError::Conflict(
                    "This email is already in use".to_string(),
                ));
            }
            user.set_email(email.to_owned());
        }
    }

    if let Some(phone) = req.phone.filter(|s| !s.is_empty()) {
        user.set_phone(phone);
    }

    state.users.update(user).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Account details updated")))
}

#[derive(Debug, MultipartForm)]
pub struct AvatarForm {
    pub avatar: Option<TempFile>,
}

/// POST /upload-avatar
///
/// The file is stored under a fixed per-user name, so a re-upload replaces
/// the old avatar. Unlike post covers, the extension is not validated here.
pub async fn upload_avatar(
    state: web::Data<AppState>,
    session: Session,
    form: MultipartForm<AvatarForm>,
) -> AppResult<HttpResponse> {
    let mut user = state
        .users
        .find_by_id(session.0.user_id)
        .await?
        .ok_or_else(|| AppError::Forbidden("User not found".to_string()))?;

    let file = form
        .into_inner()
        .avatar
        .ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
    if file.file_name.as_deref().is_none_or(|name| name.is_empty()) {
        return Err(AppError::BadRequest("No file selected".to_string()));
    }

    let bytes = tokio::fs::read(file.file.path())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let stored = state.media.store_avatar(user.id, &bytes).await?;

    user.set_avatar(stored.clone());
    state.users.update(user).await?;

    Ok(HttpResponse::Ok().json(AvatarResponse {
        success: true,
        new_avatar_url: format!("/media/{AVATAR_DIR}/{stored}"),
    }))
}

/// GET /personal_account
pub async fn personal_account(
    state: web::Data<AppState>,
    session: MaybeSession,
) -> AppResult<HttpResponse> {
    let Some(claims) = session.0 else {
        return Ok(redirect("/auth"));
    };
    let Some(user) = state.users.find_by_id(claims.user_id).await? else {
        // Stale session pointing at a user that no longer exists.
        return Ok(HttpResponse::Found()
            .insert_header((header::LOCATION, "/auth"))
            .cookie(clear_session_cookie())
            .finish());
    };

    let posts = state.posts.find_by_user_recent(user.id).await?;

    Ok(HttpResponse::Ok().json(ProfilePage {
        user: user.into(),
        posts: posts.into_iter().map(Into::into).collect(),
    }))
}

/// Lenient birthdate parsing: anything that isn't `YYYY-MM-DD` is treated
/// as if the field had not been submitted.
fn parse_birthdate(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// POST /personal_account
pub async fn update_profile(
    state: web::Data<AppState>,
    session: MaybeSession,
    form: web::Form<ProfileForm>,
) -> AppResult<HttpResponse> {
    let Some(claims) = session.0 else {
        return Ok(redirect("/auth"));
    };
    let Some(mut user) = state.users.find_by_id(claims.user_id).await? else {
        return Ok(HttpResponse::Found()
            .insert_header((header::LOCATION, "/auth"))
            .cookie(clear_session_cookie())
            .finish());
    };

    let form = form.into_inner();
    let (first_name, last_name) = split_full_name(&form.full_name);

    user.apply_profile(ProfileChanges {
        first_name,
        last_name,
        city: form.city.trim().to_owned(),
        about: form.about.trim().to_owned(),
        date_of_birth: form.birthdate.as_deref().and_then(parse_birthdate),
    });

    state.users.update(user).await?;

    // Back to the same page so the saved values are immediately visible.
    Ok(redirect("/personal_account"))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test, web};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use uuid::Uuid;

    use tinta_infra::database::entity::user;

    use super::parse_birthdate;
    use crate::handlers::test_support::{
        cookie_for, multipart_file, multipart_request, state_over, state_with_media,
        user_model_with_password,
    };
    use crate::state::AppState;

    async fn app_with(
        state: AppState,
    ) -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    > {
        test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(crate::handlers::configure_routes),
        )
        .await
    }

    #[actix_web::test]
    async fn birthdate_parsing_is_lenient() {
        assert!(parse_birthdate("1990-04-02").is_some());
        assert!(parse_birthdate("02.04.1990").is_none());
        assert!(parse_birthdate("yesterday").is_none());
        assert!(parse_birthdate("").is_none());
    }

    #[actix_web::test]
    async fn update_security_without_session_is_forbidden() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = app_with(state_over(db)).await;

        let req = test::TestRequest::post()
            .uri("/update-security")
            .set_json(serde_json::json!({ "old_password": "x" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn update_security_with_wrong_old_password_changes_nothing() {
        let stored = user_model_with_password("right-password");
        let cookie = cookie_for(&stored);
        // Only the user lookup is mocked: reaching the UPDATE would fail the
        // test with an unexpected-query panic.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![stored]])
            .into_connection();
        let app = app_with(state_over(db)).await;

        let req = test::TestRequest::post()
            .uri("/update-security")
            .cookie(cookie)
            .set_json(serde_json::json!({ "old_password": "wrong" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn update_security_requires_matching_password_confirmation() {
        let stored = user_model_with_password("right-password");
        let cookie = cookie_for(&stored);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![stored]])
            .into_connection();
        let app = app_with(state_over(db)).await;

        let req = test::TestRequest::post()
            .uri("/update-security")
            .cookie(cookie)
            .set_json(serde_json::json!({
                "old_password": "right-password",
                "new_password": "new-secret",
                "new_password_confirm": "different"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn update_security_persists_phone_change() {
        let stored = user_model_with_password("right-password");
        let cookie = cookie_for(&stored);
        let updated = user::Model {
            phone: "555-9999".to_owned(),
            ..stored.clone()
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![stored], vec![updated]])
            .into_connection();
        let app = app_with(state_over(db)).await;

        let req = test::TestRequest::post()
            .uri("/update-security")
            .cookie(cookie)
            .set_json(serde_json::json!({
                "old_password": "right-password",
                "phone": "555-9999"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn personal_account_without_session_redirects_to_auth() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = app_with(state_over(db)).await;

        let req = test::TestRequest::get().uri("/personal_account").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers().get("location").unwrap(), "/auth");
    }

    #[actix_web::test]
    async fn personal_account_with_stale_session_clears_the_cookie() {
        let stored = user_model_with_password("pw");
        let cookie = cookie_for(&stored);
        // The user behind the session is gone.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<user::Model>::new()])
            .into_connection();
        let app = app_with(state_over(db)).await;

        let req = test::TestRequest::get()
            .uri("/personal_account")
            .cookie(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers().get("location").unwrap(), "/auth");
        let removal = resp
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("removal cookie set");
        assert_eq!(removal.value(), "");
    }

    #[actix_web::test]
    async fn profile_update_with_bad_birthdate_still_saves_the_rest() {
        let stored = user_model_with_password("pw");
        let cookie = cookie_for(&stored);
        let updated = user::Model {
            first_name: "Janet".to_owned(),
            city: "Shelbyville".to_owned(),
            ..stored.clone()
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![stored], vec![updated]])
            .into_connection();
        let app = app_with(state_over(db)).await;

        let req = test::TestRequest::post()
            .uri("/personal_account")
            .cookie(cookie)
            .set_form(&[
                ("full_name", "Janet Doe"),
                ("birthdate", "not-a-date"),
                ("city", "Shelbyville"),
                ("about", "hello"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers().get("location").unwrap(), "/personal_account");
    }

    #[actix_web::test]
    async fn avatar_upload_without_file_is_rejected() {
        let stored = user_model_with_password("pw");
        let cookie = cookie_for(&stored);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![stored]])
            .into_connection();
        let app = app_with(state_over(db)).await;

        let req = multipart_request("/upload-avatar", &[])
            .cookie(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn avatar_upload_stores_under_the_user_id() {
        let stored = user_model_with_password("pw");
        let user_id = stored.id;
        let cookie = cookie_for(&stored);
        let updated = user::Model {
            avatar: Some(format!("{user_id}.jpg")),
            ..stored.clone()
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![stored], vec![updated]])
            .into_connection();
        let media_root =
            std::env::temp_dir().join(format!("tinta-avatar-test-{}", Uuid::new_v4().simple()));
        let app = app_with(state_with_media(db, media_root.clone())).await;

        let req = multipart_request(
            "/upload-avatar",
            &[multipart_file("avatar", "me.png", "fake image bytes")],
        )
        .cookie(cookie)
        .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: tinta_shared::dto::AvatarResponse = test::read_body_json(resp).await;
        assert!(body.success);
        assert!(body.new_avatar_url.ends_with(&format!("{user_id}.jpg")));
        assert!(media_root.join("avatar").join(format!("{user_id}.jpg")).exists());

        std::fs::remove_dir_all(&media_root).unwrap();
    }
}
