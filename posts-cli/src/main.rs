use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use posts_client::{Post, PostsClient, PostsClientError};

const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";
const SERVER_ENV: &str = "POSTS_SERVER";

#[derive(Debug, Parser)]
#[command(name = "posts-cli", version, about = "CLI клиент для posts-server")]
struct Cli {
    /// Адрес сервера. По умолчанию берётся из POSTS_SERVER или http://127.0.0.1:8080.
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Создание поста.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
    },
    /// Список постов, новые первыми.
    List {
        /// Ограничить выборку этим числом постов.
        #[arg(long)]
        number: Option<String>,
    },
    /// Получение поста по id.
    Get {
        #[arg(long)]
        id: String,
    },
    /// Обновление поста.
    ///
    /// Непереданные `--title`/`--body` будут стёрты на сервере.
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        body: Option<String>,
    },
    /// Удаление поста.
    Delete {
        #[arg(long)]
        id: String,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let server = resolve_server(cli.server, std::env::var(SERVER_ENV).ok());
    let client = PostsClient::new(server).map_err(map_client_error)?;

    match cli.command {
        Command::Create { title, body } => {
            let post = client
                .create_post(&title, &body)
                .await
                .map_err(map_client_error)?;
            print_post("Пост создан", &post);
        }
        Command::List { number } => {
            let posts = match number {
                Some(number) => client.list_posts_by_number(&number).await,
                None => client.list_posts().await,
            }
            .map_err(map_client_error)?;
            print_list(&posts);
        }
        Command::Get { id } => {
            let post = client.get_post(&id).await.map_err(map_client_error)?;
            print_post("Пост", &post);
        }
        Command::Update { id, title, body } => {
            let post = client
                .update_post(&id, title.as_deref(), body.as_deref())
                .await
                .map_err(map_client_error)?;
            print_post("Пост обновлён", &post);
        }
        Command::Delete { id } => {
            let message = client.delete_post(&id).await.map_err(map_client_error)?;
            println!("{message}: id={id}");
        }
    }

    Ok(())
}

fn resolve_server(flag: Option<String>, env: Option<String>) -> String {
    let raw = flag
        .or(env)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());
    normalize_server(raw.trim().to_string())
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn map_client_error(err: PostsClientError) -> anyhow::Error {
    let message = match err {
        PostsClientError::NotFound => "пост не найден".to_string(),
        PostsClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        PostsClientError::Api { status, message } => {
            format!("ошибка сервера: status={status}, message={message}")
        }
        PostsClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow::anyhow!(message)
}

fn display_field(value: Option<&str>) -> &str {
    value.unwrap_or("<null>")
}

fn print_post(title: &str, post: &Post) {
    println!("{title}");
    println!("id: {}", post.id);
    println!("created_at: {}", post.created_at);
    println!("user_id: {}", post.user_id);
    println!("title: {}", display_field(post.title.as_deref()));
    println!("body: {}", display_field(post.body.as_deref()));
}

fn print_list(posts: &[Post]) {
    println!("Постов: {}", posts.len());

    for post in posts {
        println!(
            "- [{}] {} ({})",
            post.id,
            display_field(post.title.as_deref()),
            post.created_at
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("https://example.com:8080".to_string());
        assert_eq!(s, "https://example.com:8080");
    }

    #[test]
    fn normalize_server_adds_http_scheme() {
        let s = normalize_server("127.0.0.1:9000".to_string());
        assert_eq!(s, "http://127.0.0.1:9000");
    }

    #[test]
    fn resolve_server_defaults() {
        assert_eq!(resolve_server(None, None), DEFAULT_SERVER);
    }

    #[test]
    fn resolve_server_prefers_flag_over_env() {
        let server = resolve_server(
            Some("localhost:1111".to_string()),
            Some("localhost:2222".to_string()),
        );
        assert_eq!(server, "http://localhost:1111");
    }

    #[test]
    fn resolve_server_falls_back_to_env_and_ignores_blank() {
        let server = resolve_server(None, Some(" localhost:2222 ".to_string()));
        assert_eq!(server, "http://localhost:2222");

        let server = resolve_server(None, Some("   ".to_string()));
        assert_eq!(server, DEFAULT_SERVER);
    }

    #[test]
    fn cli_parses_update_with_optional_fields() {
        let cli = Cli::try_parse_from(["posts-cli", "update", "--id", "abc", "--title", "T"])
            .expect("must parse");
        match cli.command {
            Command::Update { id, title, body } => {
                assert_eq!(id, "abc");
                assert_eq!(title.as_deref(), Some("T"));
                assert!(body.is_none());
            }
            _ => panic!("expected update command"),
        }
    }

    #[test]
    fn cli_parses_bounded_list() {
        let cli = Cli::try_parse_from(["posts-cli", "--server", "h:1", "list", "--number", "5"])
            .expect("must parse");
        assert_eq!(cli.server.as_deref(), Some("h:1"));
        assert!(matches!(cli.command, Command::List { number: Some(ref n) } if n == "5"));
    }
}
