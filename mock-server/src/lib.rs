use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub published_date: String,
    pub description: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub published_date: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct BookFilter {
    pub title: Option<String>,
    pub year: Option<i32>,
}

impl BookFilter {
    fn matches(&self, book: &Book) -> bool {
        let title_ok = self
            .title
            .as_deref()
            .map_or(true, |t| book.title.to_lowercase().contains(&t.to_lowercase()));
        let year_ok = self
            .year
            .map_or(true, |y| book.published_date.get(..4) == Some(y.to_string().as_str()));
        title_ok && year_ok
    }
}

/// Insertion-ordered so list responses are stable.
pub type Db = Arc<RwLock<Vec<Book>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/books/book", get(list_books))
        .route("/books", post(create_book))
        .route("/books/{id}", delete(delete_book))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_books(State(db): State<Db>, Query(filter): Query<BookFilter>) -> Json<Vec<Book>> {
    let books = db.read().await;
    Json(books.iter().filter(|b| filter.matches(b)).cloned().collect())
}

async fn create_book(
    State(db): State<Db>,
    Json(input): Json<CreateBook>,
) -> (StatusCode, Json<Book>) {
    let book = Book {
        id: Uuid::new_v4().to_string(),
        title: input.title,
        author: input.author,
        published_date: input.published_date,
        description: input.description,
    };
    tracing::debug!(id = %book.id, title = %book.title, "book created");
    db.write().await.push(book.clone());
    (StatusCode::CREATED, Json(book))
}

async fn delete_book(State(db): State<Db>, Path(id): Path<String>) -> StatusCode {
    let mut books = db.write().await;
    match books.iter().position(|b| b.id == id) {
        Some(index) => {
            books.remove(index);
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}
