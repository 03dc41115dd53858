use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Публичная модель поста.
pub struct Post {
    /// Идентификатор поста (UUID).
    pub id: String,
    /// Дата и время создания поста (UTC).
    pub created_at: DateTime<Utc>,
    /// Идентификатор владельца.
    pub user_id: i64,
    /// Заголовок поста. `None`, если был стёрт обновлением.
    pub title: Option<String>,
    /// Содержимое поста. `None`, если было стёрто обновлением.
    pub body: Option<String>,
}
