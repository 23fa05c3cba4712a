//! The five resume operations. Each is one store read, or for create-or-fetch a
//! read followed by a conditional write. Nothing here retries or classifies
//! store failures; they surface as `AppError::Storage`.

use std::sync::Arc;

use tracing::{debug, info};

use crate::curriculos::store::CurriculoStore;
use crate::errors::AppError;
use crate::models::curriculo::{Curriculo, CurriculoInput};

#[derive(Clone)]
pub struct CurriculoService {
    store: Arc<dyn CurriculoStore>,
}

impl CurriculoService {
    pub fn new(store: Arc<dyn CurriculoStore>) -> Self {
        Self { store }
    }

    /// All rows, unfiltered, in the store's natural order.
    pub async fn list(&self) -> Result<Vec<Curriculo>, AppError> {
        Ok(self.store.list().await?)
    }

    /// Zero or one rows. An unknown id is an empty result, not an error.
    pub async fn get(&self, id: i32) -> Result<Vec<Curriculo>, AppError> {
        Ok(self.store.find_by_id(id).await?)
    }

    /// Inserts `input` unless a row with the same name exists; otherwise returns
    /// the existing row(s) untouched, even if the other fields differ.
    ///
    /// The lookup and the insert are separate statements with no lock between
    /// them: two concurrent calls for the same new name can both insert.
    pub async fn create_or_fetch(
        &self,
        input: &CurriculoInput,
    ) -> Result<Vec<Curriculo>, AppError> {
        let existing = self.store.find_by_name(&input.name).await?;
        if !existing.is_empty() {
            debug!(
                name = %input.name,
                matches = existing.len(),
                "curriculo already exists, returning it"
            );
            return Ok(existing);
        }

        let created = self.store.insert(input).await?;
        if let Some(row) = created.first() {
            info!(id = row.id, "curriculo created");
        }
        Ok(created)
    }

    /// Overwrites all fields of the row with `id`. Empty if nothing matched.
    pub async fn update(
        &self,
        id: i32,
        input: &CurriculoInput,
    ) -> Result<Vec<Curriculo>, AppError> {
        let updated = self.store.update(id, input).await?;
        debug!(id, updated = updated.len(), "curriculo update");
        Ok(updated)
    }

    /// Removes the row with `id` and returns what was removed. Empty if nothing matched.
    pub async fn delete(&self, id: i32) -> Result<Vec<Curriculo>, AppError> {
        let deleted = self.store.delete(id).await?;
        debug!(id, deleted = deleted.len(), "curriculo delete");
        Ok(deleted)
    }
}
