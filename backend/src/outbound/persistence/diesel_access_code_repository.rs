//! PostgreSQL-backed `AccessCodeRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::Role;
use crate::domain::ports::{AccessCodeRepository, StoreError};

use super::diesel_error_mapping::map_diesel_error;
use super::pool::DbPool;
use super::schema::codigos_acceso;

#[derive(Clone)]
pub struct DieselAccessCodeRepository {
    pool: DbPool,
}

impl DieselAccessCodeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccessCodeRepository for DieselAccessCodeRepository {
    async fn find_role(&self, code: &str) -> Result<Option<Role>, StoreError> {
        self.pool
            .bounded("find access code", async {
                let mut conn = self.pool.get().await?;
                let role: Option<String> = codigos_acceso::table
                    .filter(codigos_acceso::codigo.eq(code))
                    .select(codigos_acceso::tipo_usuario)
                    .first(&mut conn)
                    .await
                    .optional()
                    .map_err(map_diesel_error)?;
                role.map(|raw| raw.parse::<Role>())
                    .transpose()
                    .map_err(|err| StoreError::query(err.to_string()))
            })
            .await
    }
}
