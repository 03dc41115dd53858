use axum::Router;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::http::handlers::posts::{
    create_post, delete_post, get_post, list_posts, list_posts_by_number, update_post,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/number/{number}", get(list_posts_by_number))
        .route("/{id}", get(get_post).put(update_post).delete(delete_post))
}
