//! Post feeds, detail pages, and post creation.

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use actix_web::{HttpResponse, web};
use uuid::Uuid;

use tinta_core::domain::Post;
use tinta_core::ports::image_extension;
use tinta_shared::dto::{HomePage, PostResponse, ProfilePage};

use crate::handlers::redirect;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::session::MaybeSession;
use crate::state::AppState;

/// GET / - every post, newest first, plus the viewer when logged in.
pub async fn home(state: web::Data<AppState>, session: MaybeSession) -> AppResult<HttpResponse> {
    let posts = state.posts.find_recent().await?;

    let user = match session.0 {
        Some(claims) => state.users.find_by_id(claims.user_id).await?,
        None => None,
    };

    Ok(HttpResponse::Ok().json(HomePage {
        posts: posts.into_iter().map(Into::into).collect(),
        user: user.map(Into::into),
    }))
}

/// GET /user/{id} - a user's public profile and their posts, newest first.
pub async fn user_profile(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();

    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;
    let posts = state.posts.find_by_user_recent(user_id).await?;

    Ok(HttpResponse::Ok().json(ProfilePage {
        user: user.into(),
        posts: posts.into_iter().map(Into::into).collect(),
    }))
}

/// GET /post/{id}
pub async fn post_detail(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {post_id} not found")))?;

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// GET /create_post - the creation form scaffold; login required.
pub async fn create_post_form(session: MaybeSession) -> HttpResponse {
    if session.0.is_none() {
        return redirect("/auth");
    }
    HttpResponse::Ok().json(serde_json::json!({ "page": "create_post" }))
}

#[derive(Debug, MultipartForm)]
pub struct CreatePostForm {
    pub title: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub cover: Option<TempFile>,
}

/// POST /create_post
pub async fn create_post(
    state: web::Data<AppState>,
    session: MaybeSession,
    form: MultipartForm<CreatePostForm>,
) -> AppResult<HttpResponse> {
    let Some(claims) = session.0 else {
        return Ok(redirect("/auth"));
    };

    let form = form.into_inner();
    // Present-but-blank fields count as missing.
    let title = form
        .title
        .map(|t| t.0.trim().to_owned())
        .filter(|t| !t.is_empty());
    let description = form
        .description
        .map(|d| d.0.trim().to_owned())
        .filter(|d| !d.is_empty());
    let (Some(title), Some(description), Some(cover)) = (title, description, form.cover) else {
        return Err(AppError::BadRequest("All fields are required".to_string()));
    };

    let extension = cover
        .file_name
        .as_deref()
        .and_then(image_extension)
        .ok_or_else(|| AppError::BadRequest("Unsupported file format".to_string()))?;

    let bytes = tokio::fs::read(cover.file.path())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let stored = state.media.store_cover(&extension, &bytes).await?;

    let post = Post::new(claims.user_id, &title, &description, stored);
    let saved = state.posts.insert(post).await?;

    tracing::info!(post_id = %saved.id, user_id = %saved.user_id, "Post created");

    Ok(redirect("/"))
}
