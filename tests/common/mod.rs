// tests/common/mod.rs

use std::sync::Arc;

use async_trait::async_trait;
use exam_uploads::{
    config::Config,
    error::AppError,
    models::question::{NewQuestion, StoredQuestion},
    routes,
    state::AppState,
    store::QuestionStore,
};
use sqlx::{Row, SqlitePool, sqlite::SqlitePoolOptions};

pub const HEADER: &str = "question,option1,option2,option3,option4,correct_answer,answer_description,category,level,question_type";

/// `QuestionStore` over an in-memory SQLite database, mirroring the Postgres store.
#[derive(Clone)]
pub struct SqliteQuestionStore {
    pub pool: SqlitePool,
}

impl SqliteQuestionStore {
    pub async fn new() -> Self {
        // A single long-lived connection keeps the in-memory database alive.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory SQLite database");

        // UNIQUE (exam_name, question) lets tests provoke a storage failure mid-batch.
        sqlx::query(
            r#"
            CREATE TABLE questions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                exam_name TEXT NOT NULL,
                question TEXT NOT NULL,
                option1 TEXT NOT NULL,
                option2 TEXT NOT NULL,
                option3 TEXT,
                option4 TEXT,
                correct_answer TEXT NOT NULL,
                answer_description TEXT NOT NULL,
                category TEXT NOT NULL,
                level TEXT NOT NULL,
                question_type TEXT NOT NULL,
                UNIQUE (exam_name, question)
            )
            "#,
        )
        .execute(&pool)
        .await
        .expect("Failed to create questions table");

        Self { pool }
    }

    pub async fn count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

#[async_trait]
impl QuestionStore for SqliteQuestionStore {
    async fn save_batch(&self, exam_name: &str, questions: &[NewQuestion]) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut written = 0;
        for q in questions {
            sqlx::query(
                r#"
                INSERT INTO questions
                (exam_name, question, option1, option2, option3, option4,
                 correct_answer, answer_description, category, level, question_type)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(exam_name)
            .bind(&q.question)
            .bind(&q.option1)
            .bind(&q.option2)
            .bind(&q.option3)
            .bind(&q.option4)
            .bind(&q.correct_answer)
            .bind(&q.answer_description)
            .bind(&q.category)
            .bind(&q.level)
            .bind(&q.question_type)
            .execute(&mut *tx)
            .await?;
            written += 1;
        }

        tx.commit().await?;
        Ok(written)
    }

    async fn list_by_exam(&self, exam_name: &str) -> Result<Vec<StoredQuestion>, AppError> {
        let rows = sqlx::query("SELECT * FROM questions WHERE exam_name = ? ORDER BY id")
            .bind(exam_name)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| -> Result<StoredQuestion, sqlx::Error> {
                Ok(StoredQuestion {
                    id: row.try_get("id")?,
                    exam_name: row.try_get("exam_name")?,
                    question: row.try_get("question")?,
                    option1: row.try_get("option1")?,
                    option2: row.try_get("option2")?,
                    option3: row.try_get("option3")?,
                    option4: row.try_get("option4")?,
                    correct_answer: row.try_get("correct_answer")?,
                    answer_description: row.try_get("answer_description")?,
                    category: row.try_get("category")?,
                    level: row.try_get("level")?,
                    question_type: row.try_get("question_type")?,
                    created_at: None,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(AppError::from)
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        rust_log: "error".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        upload_max_bytes: 1024 * 1024,
        cors_origins: vec!["http://localhost:3000".to_string()],
    }
}

/// Spawns the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345") and the backing store.
pub async fn spawn_app() -> (String, SqliteQuestionStore) {
    spawn_app_with_config(test_config()).await
}

pub async fn spawn_app_with_config(config: Config) -> (String, SqliteQuestionStore) {
    let store = SqliteQuestionStore::new().await;

    let state = AppState {
        store: Arc::new(store.clone()),
        config,
    };
    let address = serve(state).await;

    (address, store)
}

/// Serves the router for `state` on a random port and returns its base URL.
pub async fn serve(state: AppState) -> String {
    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

/// Builds the multipart form the admin upload page sends.
pub fn upload_form(csv: &str, exam_name: Option<&str>) -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(csv.as_bytes().to_vec())
        .file_name("questions.csv")
        .mime_str("text/csv")
        .unwrap();

    let form = reqwest::multipart::Form::new().part("file", part);
    match exam_name {
        Some(name) => form.text("examName", name.to_string()),
        None => form,
    }
}
