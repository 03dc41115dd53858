use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `posts-client`.
pub enum PostsClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Запрошенный пост не найден.
    #[error("not found")]
    NotFound,

    /// Некорректный запрос: ошибка валидации, битый JSON
    /// или отклонённое хранилищем условие.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Любой другой неуспешный ответ сервера.
    #[error("server responded with {status}: {message}")]
    Api {
        /// HTTP-статус ответа.
        status: u16,
        /// Сообщение из тела ответа.
        message: String,
    },
}

/// Результат операций `posts-client`.
pub type PostsClientResult<T> = Result<T, PostsClientError>;

impl PostsClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| format!("http status {status}"));
        match status {
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            reqwest::StatusCode::BAD_REQUEST => Self::InvalidRequest(message),
            _ => Self::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}
