//! PostgreSQL-backed `UserAccountRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StoreError, UserAccountRepository};
use crate::domain::{NewUserAccount, Role, StoredCredentials, UserAccount, UserId};

use super::diesel_error_mapping::map_diesel_error;
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::usuarios;

#[derive(Clone)]
pub struct DieselUserAccountRepository {
    pool: DbPool,
}

impl DieselUserAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_credentials(row: UserRow) -> Result<StoredCredentials, StoreError> {
    let role: Role = row
        .tipo_usuario
        .parse()
        .map_err(|err: crate::domain::UnknownRole| StoreError::query(err.to_string()))?;
    Ok(StoredCredentials {
        account: UserAccount {
            id: UserId::new(row.id),
            username: row.nombre_usuario,
            role,
        },
        password_hash: row.password_hash,
    })
}

#[async_trait]
impl UserAccountRepository for DieselUserAccountRepository {
    async fn create(&self, account: &NewUserAccount) -> Result<UserAccount, StoreError> {
        self.pool
            .bounded("insert user", async {
                let mut conn = self.pool.get().await?;
                let row: UserRow = diesel::insert_into(usuarios::table)
                    .values(NewUserRow {
                        nombre_usuario: &account.username,
                        password_hash: &account.password_hash,
                        tipo_usuario: account.role.as_str(),
                    })
                    .returning(UserRow::as_returning())
                    .get_result(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                row_to_credentials(row).map(|stored| stored.account)
            })
            .await
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, StoreError> {
        self.pool
            .bounded("find user", async {
                let mut conn = self.pool.get().await?;
                let row: Option<UserRow> = usuarios::table
                    .filter(usuarios::nombre_usuario.eq(username))
                    .select(UserRow::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
                    .map_err(map_diesel_error)?;
                row.map(row_to_credentials).transpose()
            })
            .await
    }

    async fn list(&self) -> Result<Vec<UserAccount>, StoreError> {
        self.pool
            .bounded("list users", async {
                let mut conn = self.pool.get().await?;
                let rows: Vec<UserRow> = usuarios::table
                    .select(UserRow::as_select())
                    .order_by(usuarios::id)
                    .load(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                rows.into_iter()
                    .map(|row| row_to_credentials(row).map(|stored| stored.account))
                    .collect()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(tipo: &str) -> UserRow {
        UserRow {
            id: 3,
            nombre_usuario: "jdoe".into(),
            password_hash: "$argon2id$...".into(),
            tipo_usuario: tipo.into(),
        }
    }

    #[test]
    fn row_maps_stored_role() {
        let stored = row_to_credentials(row("paciente")).expect("known role");
        assert_eq!(stored.account.role, Role::Patient);
        assert_eq!(stored.account.id, UserId::new(3));
    }

    #[test]
    fn unknown_stored_role_is_a_query_error() {
        let err = row_to_credentials(row("superuser")).expect_err("unknown role");
        assert!(matches!(err, StoreError::Query { .. }));
    }
}
