//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `migrations/` exactly.

diesel::table! {
    /// Pre-provisioned registration codes and the role each grants.
    codigos_acceso (codigo) {
        codigo -> Text,
        tipo_usuario -> Text,
    }
}

diesel::table! {
    /// Registered accounts. `nombre_usuario` carries a unique constraint.
    usuarios (id) {
        id -> Int4,
        nombre_usuario -> Text,
        password_hash -> Text,
        tipo_usuario -> Text,
    }
}

diesel::table! {
    pacientes (id) {
        id -> Int4,
        nombre -> Text,
        edad -> Int4,
        frecuencia_cardiaca -> Int4,
    }
}

diesel::table! {
    medicos (id) {
        id -> Int4,
        nombre -> Text,
        especialidad -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(codigos_acceso, usuarios, pacientes, medicos);
