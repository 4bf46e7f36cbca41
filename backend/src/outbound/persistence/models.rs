//! Internal Diesel row structs.
//!
//! These never leave the persistence layer.

use diesel::prelude::*;

use super::schema::{medicos, pacientes, usuarios};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = usuarios)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub nombre_usuario: String,
    pub password_hash: String,
    pub tipo_usuario: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = usuarios)]
pub(crate) struct NewUserRow<'a> {
    pub nombre_usuario: &'a str,
    pub password_hash: &'a str,
    pub tipo_usuario: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pacientes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PatientRow {
    pub id: i32,
    pub nombre: String,
    pub edad: i32,
    pub frecuencia_cardiaca: i32,
}

/// Insert and update payload for `pacientes`.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = pacientes)]
pub(crate) struct PatientValues<'a> {
    pub nombre: &'a str,
    pub edad: i32,
    pub frecuencia_cardiaca: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = medicos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PhysicianRow {
    pub id: i32,
    pub nombre: String,
    pub especialidad: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = medicos)]
pub(crate) struct NewPhysicianRow<'a> {
    pub nombre: &'a str,
    pub especialidad: &'a str,
}
