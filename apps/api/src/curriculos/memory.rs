//! In-memory `CurriculoStore` for tests. Rows keep insertion order, ids start at 1.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::curriculos::store::CurriculoStore;
use crate::models::curriculo::{Curriculo, CurriculoInput};

#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Curriculo>>,
    next_id: Mutex<i32>,
    failing: AtomicBool,
    failing_inserts: AtomicBool,
}

impl MemoryStore {
    /// Makes every subsequent call fail as if the pool were unreachable.
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    /// Makes only `insert` fail; lookups keep working.
    pub fn fail_inserts(&self) {
        self.failing_inserts.store(true, Ordering::SeqCst);
    }

    pub fn rows(&self) -> Vec<Curriculo> {
        self.rows.lock().unwrap().clone()
    }

    pub fn count_named(&self, name: &str) -> usize {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.name == name)
            .count()
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }

    fn matching(&self, pred: impl Fn(&Curriculo) -> bool) -> Vec<Curriculo> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| pred(*r))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CurriculoStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Curriculo>, sqlx::Error> {
        self.check()?;
        Ok(self.rows())
    }

    async fn find_by_id(&self, id: i32) -> Result<Vec<Curriculo>, sqlx::Error> {
        self.check()?;
        Ok(self.matching(|r| r.id == id))
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Curriculo>, sqlx::Error> {
        self.check()?;
        Ok(self.matching(|r| r.name == name))
    }

    async fn insert(&self, input: &CurriculoInput) -> Result<Vec<Curriculo>, sqlx::Error> {
        self.check()?;
        if self.failing_inserts.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        let id = {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            *next_id
        };
        let row = Curriculo::from_input(id, input);
        self.rows.lock().unwrap().push(row.clone());
        Ok(vec![row])
    }

    async fn update(&self, id: i32, input: &CurriculoInput) -> Result<Vec<Curriculo>, sqlx::Error> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        Ok(rows
            .iter_mut()
            .filter(|r| r.id == id)
            .map(|r| {
                *r = Curriculo::from_input(id, input);
                r.clone()
            })
            .collect())
    }

    async fn delete(&self, id: i32) -> Result<Vec<Curriculo>, sqlx::Error> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let (deleted, kept): (Vec<Curriculo>, Vec<Curriculo>) =
            rows.drain(..).partition(|r| r.id == id);
        *rows = kept;
        Ok(deleted)
    }
}
