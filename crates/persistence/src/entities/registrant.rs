//! Registrant entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the registros table.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrantEntity {
    pub id: i32,
    pub nombre: String,
    pub apellido: String,
    pub whatsapp: String,
    pub email: String,
    pub fecha_viaje: String,
    pub tratamiento_datos: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<RegistrantEntity> for domain::models::Registrant {
    fn from(entity: RegistrantEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.nombre,
            last_name: entity.apellido,
            phone: entity.whatsapp,
            email: entity.email,
            consent: entity.tratamiento_datos.unwrap_or(false),
            travel_date: entity.fecha_viaje,
            // Column has a NOW() default and is always set on insert.
            created_at: entity.created_at.unwrap_or_else(Utc::now),
        }
    }
}
