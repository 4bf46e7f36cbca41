//! PostgreSQL-backed `PhysicianRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PhysicianRepository, StoreError};
use crate::domain::{Physician, PhysicianDraft};

use super::diesel_error_mapping::map_diesel_error;
use super::models::{NewPhysicianRow, PhysicianRow};
use super::pool::DbPool;
use super::schema::medicos;

#[derive(Clone)]
pub struct DieselPhysicianRepository {
    pool: DbPool,
}

impl DieselPhysicianRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_physician(row: PhysicianRow) -> Physician {
    Physician {
        id: row.id,
        name: row.nombre,
        specialty: row.especialidad,
    }
}

#[async_trait]
impl PhysicianRepository for DieselPhysicianRepository {
    async fn create(&self, draft: &PhysicianDraft) -> Result<Physician, StoreError> {
        self.pool
            .bounded("insert physician", async {
                let mut conn = self.pool.get().await?;
                diesel::insert_into(medicos::table)
                    .values(NewPhysicianRow {
                        nombre: draft.name(),
                        especialidad: draft.specialty(),
                    })
                    .returning(PhysicianRow::as_returning())
                    .get_result(&mut conn)
                    .await
                    .map(row_to_physician)
                    .map_err(map_diesel_error)
            })
            .await
    }

    async fn list(&self) -> Result<Vec<Physician>, StoreError> {
        self.pool
            .bounded("list physicians", async {
                let mut conn = self.pool.get().await?;
                let rows: Vec<PhysicianRow> = medicos::table
                    .select(PhysicianRow::as_select())
                    .order_by(medicos::id.asc())
                    .load(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                Ok(rows.into_iter().map(row_to_physician).collect())
            })
            .await
    }
}
