use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::curriculo::{Curriculo, CurriculoInput};

/// Parameterized access to the `curriculos` table.
///
/// Every method is a single statement and returns the rows it read or wrote.
/// Carried in `CurriculoService` as `Arc<dyn CurriculoStore>`.
#[async_trait]
pub trait CurriculoStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Curriculo>, sqlx::Error>;
    async fn find_by_id(&self, id: i32) -> Result<Vec<Curriculo>, sqlx::Error>;
    async fn find_by_name(&self, name: &str) -> Result<Vec<Curriculo>, sqlx::Error>;
    async fn insert(&self, input: &CurriculoInput) -> Result<Vec<Curriculo>, sqlx::Error>;
    async fn update(&self, id: i32, input: &CurriculoInput) -> Result<Vec<Curriculo>, sqlx::Error>;
    async fn delete(&self, id: i32) -> Result<Vec<Curriculo>, sqlx::Error>;
}

/// Postgres-backed store. Connection checkout and pool sizing belong to `PgPool`.
#[derive(Clone)]
pub struct PgCurriculoStore {
    pool: PgPool,
}

impl PgCurriculoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CurriculoStore for PgCurriculoStore {
    async fn list(&self) -> Result<Vec<Curriculo>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM curriculos")
            .fetch_all(&self.pool)
            .await
    }

    async fn find_by_id(&self, id: i32) -> Result<Vec<Curriculo>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM curriculos WHERE id = $1")
            .bind(id)
            .fetch_all(&self.pool)
            .await
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Curriculo>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM curriculos WHERE nome = $1")
            .bind(name)
            .fetch_all(&self.pool)
            .await
    }

    async fn insert(&self, input: &CurriculoInput) -> Result<Vec<Curriculo>, sqlx::Error> {
        sqlx::query_as(
            r#"
            INSERT INTO curriculos (nome, email, telefone, formacao, experiencia)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.education)
        .bind(&input.experience)
        .fetch_all(&self.pool)
        .await
    }

    async fn update(&self, id: i32, input: &CurriculoInput) -> Result<Vec<Curriculo>, sqlx::Error> {
        sqlx::query_as(
            r#"
            UPDATE curriculos
            SET nome = $1, email = $2, telefone = $3, formacao = $4, experiencia = $5
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.education)
        .bind(&input.experience)
        .bind(id)
        .fetch_all(&self.pool)
        .await
    }

    async fn delete(&self, id: i32) -> Result<Vec<Curriculo>, sqlx::Error> {
        sqlx::query_as("DELETE FROM curriculos WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_all(&self.pool)
            .await
    }
}
