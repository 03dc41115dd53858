use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest, format_timestamp};
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppResult, ErrorBody};
use crate::presentation::http::extract::AppJson;
use crate::presentation::http::response::{ApiResponse, response};

pub(crate) const DELETED_MESSAGE: &str = "Post Deleted successfully";

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreatePostDto {
    pub(crate) title: Option<String>,
    pub(crate) body: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UpdatePostDto {
    pub(crate) title: Option<String>,
    pub(crate) body: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostDto {
    pub(crate) id: String,
    /// ISO-8601, millisecond precision, UTC.
    pub(crate) created_at: String,
    pub(crate) user_id: i64,
    pub(crate) title: Option<String>,
    pub(crate) body: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct MessageDto {
    pub(crate) message: String,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            created_at: format_timestamp(&post.created_at),
            id: post.id,
            user_id: post.user_id,
            title: post.title,
            body: post.body,
        }
    }
}

fn post_list(posts: Vec<Post>) -> Vec<PostDto> {
    posts.into_iter().map(PostDto::from).collect()
}

#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Missing or blank title/body, or malformed JSON", body = ErrorBody),
        (status = "default", description = "Storage error forwarded with its own status code")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    AppJson(dto): AppJson<CreatePostDto>,
) -> AppResult<ApiResponse> {
    let req = CreatePostRequest {
        title: dto.title,
        body: dto.body,
    };

    let post = state.post_service.create_post(req).await?;
    Ok(response(StatusCode::CREATED.as_u16(), &PostDto::from(post)))
}

#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    responses(
        (status = 200, description = "All posts, newest first", body = [PostDto]),
        (status = "default", description = "Storage error forwarded with its own status code")
    )
)]
pub(crate) async fn list_posts(State(state): State<AppState>) -> AppResult<ApiResponse> {
    let posts = state.post_service.list_posts().await?;
    Ok(response(StatusCode::OK.as_u16(), &post_list(posts)))
}

#[utoipa::path(
    get,
    path = "/posts/number/{number}",
    tag = "posts",
    params(
        ("number" = String, Path, description = "Upper bound on scanned items")
    ),
    responses(
        (status = 200, description = "At most `number` posts, newest first", body = [PostDto]),
        (status = "default", description = "Storage error forwarded with its own status code")
    )
)]
pub(crate) async fn list_posts_by_number(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> AppResult<ApiResponse> {
    let posts = state.post_service.list_posts_by_number(&number).await?;
    Ok(response(StatusCode::OK.as_u16(), &post_list(posts)))
}

#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "posts",
    params(
        ("id" = String, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 404, description = "Post not found", body = ErrorBody),
        (status = "default", description = "Storage error forwarded with its own status code")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse> {
    let post = state.post_service.get_post(&id).await?;
    Ok(response(StatusCode::OK.as_u16(), &PostDto::from(post)))
}

#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = "posts",
    params(
        ("id" = String, Path, description = "Post id")
    ),
    request_body = UpdatePostDto,
    responses(
        (status = 200, description = "Post updated", body = PostDto),
        (status = 400, description = "Malformed JSON, or post does not exist (conditional check failed)"),
        (status = "default", description = "Storage error forwarded with its own status code")
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdatePostDto>,
) -> AppResult<ApiResponse> {
    let req = UpdatePostRequest {
        title: dto.title,
        body: dto.body,
    };

    let post = state.post_service.update_post(&id, req).await?;
    Ok(response(StatusCode::OK.as_u16(), &PostDto::from(post)))
}

#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "posts",
    params(
        ("id" = String, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Delete issued, whether or not the post existed", body = MessageDto),
        (status = "default", description = "Storage error forwarded with its own status code")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse> {
    state.post_service.delete_post(&id).await?;
    Ok(response(
        StatusCode::OK.as_u16(),
        &MessageDto {
            message: DELETED_MESSAGE.to_string(),
        },
    ))
}
