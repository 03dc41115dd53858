use utoipa::OpenApi;

use crate::presentation::http::app_error::ErrorBody;
use crate::presentation::http::handlers::posts::{
    CreatePostDto, MessageDto, PostDto, UpdatePostDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::posts::create_post,
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::list_posts_by_number,
        crate::presentation::http::handlers::posts::get_post,
        crate::presentation::http::handlers::posts::update_post,
        crate::presentation::http::handlers::posts::delete_post
    ),
    components(
        schemas(
            CreatePostDto,
            UpdatePostDto,
            PostDto,
            MessageDto,
            ErrorBody
        )
    ),
    tags(
        (name = "posts", description = "Post endpoints")
    )
)]
pub(crate) struct ApiDoc;
