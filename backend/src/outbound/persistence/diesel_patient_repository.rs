//! PostgreSQL-backed `PatientRepository`.
//!
//! Filters are composed with Diesel's query builder, so every user-supplied
//! value is sent as a bound parameter.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};

use crate::domain::ports::{PatientRepository, StoreError};
use crate::domain::{Patient, PatientDraft, PatientId, PatientOrder, PatientSearch};

use super::diesel_error_mapping::{like_contains_pattern, map_diesel_error};
use super::models::{PatientRow, PatientValues};
use super::pool::DbPool;
use super::schema::pacientes;

/// Rows per INSERT during an import. Each row binds three parameters, so a
/// statement stays well under PostgreSQL's 65,535 bind-parameter limit.
const IMPORT_CHUNK_ROWS: usize = 10_000;

#[derive(Clone)]
pub struct DieselPatientRepository {
    pool: DbPool,
}

impl DieselPatientRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_patient(row: PatientRow) -> Patient {
    Patient {
        id: PatientId::new(row.id),
        name: row.nombre,
        age: row.edad,
        heart_rate: row.frecuencia_cardiaca,
    }
}

fn values(draft: &PatientDraft) -> PatientValues<'_> {
    PatientValues {
        nombre: draft.name(),
        edad: draft.age(),
        frecuencia_cardiaca: draft.heart_rate(),
    }
}

#[async_trait]
impl PatientRepository for DieselPatientRepository {
    async fn create(&self, draft: &PatientDraft) -> Result<Patient, StoreError> {
        self.pool
            .bounded("insert patient", async {
                let mut conn = self.pool.get().await?;
                diesel::insert_into(pacientes::table)
                    .values(values(draft))
                    .returning(PatientRow::as_returning())
                    .get_result(&mut conn)
                    .await
                    .map(row_to_patient)
                    .map_err(map_diesel_error)
            })
            .await
    }

    async fn list(&self, order: PatientOrder) -> Result<Vec<Patient>, StoreError> {
        self.pool
            .bounded("list patients", async {
                let mut conn = self.pool.get().await?;
                let query = pacientes::table
                    .select(PatientRow::as_select())
                    .into_boxed::<Pg>();
                let query = match order {
                    PatientOrder::Insertion => query.order_by(pacientes::id.asc()),
                    PatientOrder::HeartRateDescending => query
                        .order_by(pacientes::frecuencia_cardiaca.desc())
                        .then_order_by(pacientes::id.asc()),
                };
                let rows: Vec<PatientRow> =
                    query.load(&mut conn).await.map_err(map_diesel_error)?;
                Ok(rows.into_iter().map(row_to_patient).collect())
            })
            .await
    }

    async fn search(
        &self,
        search: &PatientSearch,
        limit: Option<i64>,
    ) -> Result<Vec<Patient>, StoreError> {
        self.pool
            .bounded("search patients", async {
                let mut conn = self.pool.get().await?;
                let mut query = pacientes::table
                    .select(PatientRow::as_select())
                    .order_by(pacientes::id.asc())
                    .into_boxed::<Pg>();
                if let Some(name) = search.name_contains() {
                    query = query.filter(pacientes::nombre.like(like_contains_pattern(name)));
                }
                if let Some(age) = search.age() {
                    query = query.filter(pacientes::edad.eq(age));
                }
                if let Some(limit) = limit {
                    query = query.limit(limit);
                }
                let rows: Vec<PatientRow> =
                    query.load(&mut conn).await.map_err(map_diesel_error)?;
                Ok(rows.into_iter().map(row_to_patient).collect())
            })
            .await
    }

    async fn find(&self, id: PatientId) -> Result<Option<Patient>, StoreError> {
        self.pool
            .bounded("find patient", async {
                let mut conn = self.pool.get().await?;
                pacientes::table
                    .find(id.get())
                    .select(PatientRow::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
                    .map(|row| row.map(row_to_patient))
                    .map_err(map_diesel_error)
            })
            .await
    }

    async fn find_first_by_name(&self, name: &str) -> Result<Option<Patient>, StoreError> {
        self.pool
            .bounded("find own patient record", async {
                let mut conn = self.pool.get().await?;
                pacientes::table
                    .filter(pacientes::nombre.eq(name))
                    .order_by(pacientes::id.asc())
                    .select(PatientRow::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
                    .map(|row| row.map(row_to_patient))
                    .map_err(map_diesel_error)
            })
            .await
    }

    async fn update(&self, id: PatientId, draft: &PatientDraft) -> Result<bool, StoreError> {
        self.pool
            .bounded("update patient", async {
                let mut conn = self.pool.get().await?;
                let updated = diesel::update(pacientes::table.find(id.get()))
                    .set(values(draft))
                    .execute(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                Ok(updated > 0)
            })
            .await
    }

    async fn delete(&self, id: PatientId) -> Result<usize, StoreError> {
        self.pool
            .bounded("delete patient", async {
                let mut conn = self.pool.get().await?;
                diesel::delete(pacientes::table.find(id.get()))
                    .execute(&mut conn)
                    .await
                    .map_err(map_diesel_error)
            })
            .await
    }

    async fn insert_batch(&self, drafts: &[PatientDraft]) -> Result<usize, StoreError> {
        if drafts.is_empty() {
            return Ok(0);
        }
        let rows: Vec<PatientValues<'_>> = drafts.iter().map(values).collect();
        self.pool
            .bounded("import patients", async {
                let mut conn = self.pool.get().await?;
                conn.transaction(|conn| {
                    async move {
                        let mut inserted = 0;
                        for chunk in rows.chunks(IMPORT_CHUNK_ROWS) {
                            inserted += diesel::insert_into(pacientes::table)
                                .values(chunk)
                                .execute(conn)
                                .await?;
                        }
                        Ok::<_, diesel::result::Error>(inserted)
                    }
                    .scope_boxed()
                })
                .await
                .map_err(map_diesel_error)
            })
            .await
    }
}
