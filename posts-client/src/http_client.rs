use reqwest::{Client, Method, RequestBuilder, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::error::{PostsClientError, PostsClientResult};
use crate::models::Post;

#[derive(Debug, Serialize)]
struct CreatePostRequestDto<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdatePostRequestDto<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a str>,
}

/// Тело ошибки: либо `{error}`, либо объект ошибки хранилища
/// `{message, code, statusCode, retryable}`.
#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<String>,
    message: Option<String>,
    code: Option<String>,
}

impl ErrorResponseDto {
    fn into_message(self) -> Option<String> {
        match (self.error, self.code, self.message) {
            (Some(error), _, _) => Some(error),
            (None, Some(code), Some(message)) => Some(format!("{code}: {message}")),
            (None, None, Some(message)) => Some(message),
            (None, Some(code), None) => Some(code),
            (None, None, None) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessageDto {
    message: String,
}

#[derive(Debug, Clone)]
/// HTTP-клиент для REST API `posts-server`.
pub struct PostsClient {
    base_url: Url,
    client: Client,
}

impl PostsClient {
    /// Создаёт клиент с базовым URL сервера, например `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> PostsClientResult<Self> {
        let base_url = base_url.into();
        let base_url = Url::parse(&base_url).map_err(|err| {
            PostsClientError::InvalidRequest(format!(
                "некорректный адрес сервера '{base_url}': {err}"
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(PostsClientError::InvalidRequest(format!(
                "адрес сервера '{base_url}' не может быть базовым"
            )));
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self { base_url, client })
    }

    /// каждый сегмент кодируется целиком, `/` и `?` внутри id не меняют маршрут
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn decode_error(response: reqwest::Response) -> PostsClientError {
        let status = response.status();

        let message = response
            .json::<ErrorResponseDto>()
            .await
            .ok()
            .and_then(ErrorResponseDto::into_message);
        PostsClientError::from_http_status(status, message)
    }

    /// отправляет запрос и разбирает успешный JSON-ответ
    async fn execute<TRes>(request: RequestBuilder) -> PostsClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        Ok(response.json::<TRes>().await?)
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.client.request(method, self.endpoint(segments))
    }

    /// Создаёт пост. Сервер отклоняет пустые `title`/`body`.
    pub async fn create_post(&self, title: &str, body: &str) -> PostsClientResult<Post> {
        let payload = CreatePostRequestDto { title, body };
        Self::execute(self.request(Method::POST, &["posts"]).json(&payload)).await
    }

    /// Возвращает все посты, новые первыми.
    pub async fn list_posts(&self) -> PostsClientResult<Vec<Post>> {
        Self::execute(self.request(Method::GET, &["posts"])).await
    }

    /// Возвращает не более `number` постов, новые первыми.
    pub async fn list_posts_by_number(&self, number: &str) -> PostsClientResult<Vec<Post>> {
        Self::execute(self.request(Method::GET, &["posts", "number", number])).await
    }

    /// Получает пост по идентификатору.
    pub async fn get_post(&self, id: &str) -> PostsClientResult<Post> {
        Self::execute(self.request(Method::GET, &["posts", id])).await
    }

    /// Обновляет заголовок и содержимое поста.
    ///
    /// Непереданное поле сервер перезаписывает значением `null`.
    pub async fn update_post(
        &self,
        id: &str,
        title: Option<&str>,
        body: Option<&str>,
    ) -> PostsClientResult<Post> {
        let payload = UpdatePostRequestDto { title, body };
        Self::execute(
            self.request(Method::PUT, &["posts", id])
                .json(&payload),
        )
        .await
    }

    /// Удаляет пост и возвращает сообщение сервера.
    ///
    /// Удаление несуществующего поста тоже считается успешным.
    pub async fn delete_post(&self, id: &str) -> PostsClientResult<String> {
        let dto: MessageDto =
            Self::execute(self.request(Method::DELETE, &["posts", id])).await?;
        Ok(dto.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = PostsClient::new("http://localhost:8080/").expect("client must build");
        let full = client.endpoint(&["posts"]);
        assert_eq!(full.as_str(), "http://localhost:8080/posts");
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let client = PostsClient::new("http://localhost:8080/api/").expect("client must build");
        let full = client.endpoint(&["posts", "number", "5"]);
        assert_eq!(full.as_str(), "http://localhost:8080/api/posts/number/5");
    }

    #[test]
    fn endpoint_encodes_reserved_characters_in_ids() {
        let client = PostsClient::new("http://localhost:8080").expect("client must build");

        let full = client.endpoint(&["posts", "a?b"]);
        assert_eq!(full.as_str(), "http://localhost:8080/posts/a%3Fb");
        assert_eq!(full.query(), None);

        let full = client.endpoint(&["posts", "x/../healthz"]);
        assert_eq!(full.as_str(), "http://localhost:8080/posts/x%2F..%2Fhealthz");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = PostsClient::new("not a url").expect_err("must fail");
        assert!(matches!(err, PostsClientError::InvalidRequest(_)));
    }

    #[test]
    fn error_message_prefers_error_field() {
        let dto: ErrorResponseDto =
            serde_json::from_str(r#"{"error":"Post not found"}"#).expect("valid json");
        assert_eq!(dto.into_message().as_deref(), Some("Post not found"));
    }

    #[test]
    fn error_message_combines_storage_code_and_message() {
        let dto: ErrorResponseDto = serde_json::from_str(
            r#"{"message":"The conditional request failed","code":"ConditionalCheckFailedException","statusCode":400,"retryable":false}"#,
        )
        .expect("valid json");
        assert_eq!(
            dto.into_message().as_deref(),
            Some("ConditionalCheckFailedException: The conditional request failed")
        );
    }

    #[test]
    fn update_payload_skips_missing_fields() {
        let payload = UpdatePostRequestDto {
            title: Some("t"),
            body: None,
        };
        let json = serde_json::to_string(&payload).expect("must serialize");
        assert_eq!(json, r#"{"title":"t"}"#);
    }

    #[test]
    fn post_deserializes_server_shape() {
        let post: Post = serde_json::from_str(
            r#"{"id":"abc","createdAt":"2024-05-01T10:00:00.123Z","userId":1,"title":"A","body":null}"#,
        )
        .expect("valid post");
        assert_eq!(post.id, "abc");
        assert_eq!(post.user_id, 1);
        assert_eq!(post.title.as_deref(), Some("A"));
        assert_eq!(post.body, None);
        assert_eq!(post.created_at.timestamp_subsec_millis(), 123);
    }
}
