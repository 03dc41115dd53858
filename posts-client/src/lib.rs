//! Клиентская библиотека для работы с posts-server по HTTP.
//!
//! `PostsClient` повторяет REST API сервера: создание, список (весь или
//! ограниченный по числу), получение, обновление и удаление постов.
//! Ошибки сервера и хранилища приводятся к `PostsClientError`.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{PostsClientError, PostsClientResult};
pub use http_client::PostsClient;
pub use models::Post;
