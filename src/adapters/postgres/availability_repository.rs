//! PostgreSQL implementation of AvailabilityRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::availability::AvailabilityTemplate;
use crate::domain::foundation::{
    DayOfWeek, DomainError, ErrorCode, TemplateId, TimeRange, Timestamp, TrainerId,
};
use crate::ports::AvailabilityRepository;

use super::db_error;

/// PostgreSQL implementation of [`AvailabilityRepository`].
#[derive(Clone)]
pub struct PostgresAvailabilityRepository {
    pool: PgPool,
}

impl PostgresAvailabilityRepository {
    /// Creates a new PostgresAvailabilityRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityRepository for PostgresAvailabilityRepository {
    async fn save(&self, template: &AvailabilityTemplate) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO availability_templates (
                id, trainer_id, day_of_week, start_time, end_time, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(template.id().as_uuid())
        .bind(template.trainer_id().as_uuid())
        .bind(day_to_str(template.day_of_week()))
        .bind(template.window().start())
        .bind(template.window().end())
        .bind(template.created_at().as_datetime())
        .bind(template.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert template", e))?;

        Ok(())
    }

    async fn update(&self, template: &AvailabilityTemplate) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE availability_templates SET
                day_of_week = $2,
                start_time = $3,
                end_time = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(template.id().as_uuid())
        .bind(day_to_str(template.day_of_week()))
        .bind(template.window().start())
        .bind(template.window().end())
        .bind(template.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update template", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::TemplateNotFound,
                format!("Template not found: {}", template.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &TemplateId,
    ) -> Result<Option<AvailabilityTemplate>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, trainer_id, day_of_week, start_time, end_time, created_at, updated_at
            FROM availability_templates
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch template", e))?;

        row.map(row_to_template).transpose()
    }

    async fn find_by_trainer(
        &self,
        trainer_id: &TrainerId,
    ) -> Result<Vec<AvailabilityTemplate>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, trainer_id, day_of_week, start_time, end_time, created_at, updated_at
            FROM availability_templates
            WHERE trainer_id = $1
            ORDER BY array_position(
                ARRAY['MON','TUE','WED','THU','FRI','SAT','SUN'], day_of_week
            ), start_time
            "#,
        )
        .bind(trainer_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("fetch templates by trainer", e))?;

        rows.into_iter().map(row_to_template).collect()
    }

    async fn delete(&self, id: &TemplateId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM availability_templates WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete template", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::TemplateNotFound,
                format!("Template not found: {}", id),
            ));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn day_to_str(day: DayOfWeek) -> &'static str {
    match day {
        DayOfWeek::Mon => "MON",
        DayOfWeek::Tue => "TUE",
        DayOfWeek::Wed => "WED",
        DayOfWeek::Thu => "THU",
        DayOfWeek::Fri => "FRI",
        DayOfWeek::Sat => "SAT",
        DayOfWeek::Sun => "SUN",
    }
}

fn str_to_day(s: &str) -> Result<DayOfWeek, DomainError> {
    match s {
        "MON" => Ok(DayOfWeek::Mon),
        "TUE" => Ok(DayOfWeek::Tue),
        "WED" => Ok(DayOfWeek::Wed),
        "THU" => Ok(DayOfWeek::Thu),
        "FRI" => Ok(DayOfWeek::Fri),
        "SAT" => Ok(DayOfWeek::Sat),
        "SUN" => Ok(DayOfWeek::Sun),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid day of week: {}", s),
        )),
    }
}

fn row_to_template(row: sqlx::postgres::PgRow) -> Result<AvailabilityTemplate, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| db_error("get id", e))?;
    let trainer_id: uuid::Uuid = row
        .try_get("trainer_id")
        .map_err(|e| db_error("get trainer_id", e))?;
    let day_str: String = row
        .try_get("day_of_week")
        .map_err(|e| db_error("get day_of_week", e))?;
    let start_time: chrono::NaiveTime = row
        .try_get("start_time")
        .map_err(|e| db_error("get start_time", e))?;
    let end_time: chrono::NaiveTime = row
        .try_get("end_time")
        .map_err(|e| db_error("get end_time", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_error("get created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| db_error("get updated_at", e))?;

    let window = TimeRange::new(start_time, end_time)
        .map_err(|e| db_error("decode template window", e))?;

    Ok(AvailabilityTemplate::reconstitute(
        TemplateId::from_uuid(id),
        TrainerId::from_uuid(trainer_id),
        str_to_day(&day_str)?,
        window,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_conversion_roundtrips() {
        for day in [
            DayOfWeek::Mon,
            DayOfWeek::Tue,
            DayOfWeek::Wed,
            DayOfWeek::Thu,
            DayOfWeek::Fri,
            DayOfWeek::Sat,
            DayOfWeek::Sun,
        ] {
            assert_eq!(str_to_day(day_to_str(day)).unwrap(), day);
        }
    }

    #[test]
    fn str_to_day_rejects_invalid() {
        assert!(str_to_day("LUN").is_err());
    }
}
