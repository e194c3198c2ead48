use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use medimatch_common::models::doctor::{
    consultation_count, experience_years, format_consultations, Availability, Doctor,
    DoctorMetadata, DoctorStatus, Education,
};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use uuid::Uuid;

const DOCTOR_COLUMNS: &str = "doctor_id, name, specialty, experience, rating, consultations, \
     response_time, status, avatar, description, expertise, education, languages, availability, \
     consultation_fee, is_verified, is_active, featured, views, likes, success_rate, \
     created_at, updated_at";

/// Doctor row from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DoctorRow {
    pub doctor_id: Uuid,
    pub name: String,
    pub specialty: String,
    pub experience: String,
    pub rating: f64,
    pub consultations: String,
    pub response_time: String,
    pub status: String,
    pub avatar: String,
    pub description: String,
    pub expertise: Vec<String>,
    pub education: JsonValue,
    pub languages: Vec<String>,
    pub availability: Option<JsonValue>,
    pub consultation_fee: f64,
    pub is_verified: bool,
    pub is_active: bool,
    pub featured: bool,
    pub views: i64,
    pub likes: i64,
    pub success_rate: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DoctorRow> for Doctor {
    fn from(row: DoctorRow) -> Self {
        let education: Vec<Education> =
            serde_json::from_value(row.education).unwrap_or_default();
        let availability: Option<Availability> = row
            .availability
            .and_then(|v| serde_json::from_value(v).ok());
        // status is CHECK-constrained in the schema; the model default
        // applies if a value somehow fails to parse
        let status = row.status.parse().unwrap_or(DoctorStatus::Online);
        Doctor {
            id: row.doctor_id,
            experience_years: experience_years(&row.experience),
            consultation_count: consultation_count(&row.consultations),
            name: row.name,
            specialty: row.specialty,
            experience: row.experience,
            rating: row.rating,
            consultations: row.consultations,
            response_time: row.response_time,
            status,
            avatar: row.avatar,
            description: row.description,
            expertise: row.expertise,
            education,
            languages: row.languages,
            availability,
            consultation_fee: row.consultation_fee,
            is_verified: row.is_verified,
            is_active: row.is_active,
            featured: row.featured,
            metadata: DoctorMetadata {
                views: row.views,
                likes: row.likes,
                success_rate: row.success_rate,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insert payload for a new doctor profile
#[derive(Debug, Clone)]
pub struct NewDoctor {
    pub name: String,
    pub specialty: String,
    pub experience: String,
    pub rating: f64,
    pub consultations: String,
    pub response_time: String,
    pub status: DoctorStatus,
    pub avatar: String,
    pub description: String,
    pub expertise: Vec<String>,
    pub education: Vec<Education>,
    pub languages: Vec<String>,
    pub availability: Option<Availability>,
    pub consultation_fee: f64,
    pub is_verified: bool,
    pub featured: bool,
}

/// Repository for doctor operations
pub struct DoctorRepo;

impl DoctorRepo {
    pub async fn create(pool: &PgPool, doctor: &NewDoctor) -> Result<Uuid> {
        if !doctor.avatar.starts_with("http") {
            bail!("Avatar must be a valid URL");
        }
        let doctor_id = Uuid::new_v4();
        let education = serde_json::to_value(&doctor.education)?;
        let availability = doctor
            .availability
            .as_ref()
            .map(serde_json::to_value)
            .transpose()?;

        sqlx::query(
            r#"
            INSERT INTO doctor (doctor_id, name, specialty, experience, rating, consultations,
                response_time, status, avatar, description, expertise, education, languages,
                availability, consultation_fee, is_verified, featured)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(doctor_id)
        .bind(&doctor.name)
        .bind(&doctor.specialty)
        .bind(&doctor.experience)
        .bind(doctor.rating)
        .bind(&doctor.consultations)
        .bind(&doctor.response_time)
        .bind(doctor.status.as_str())
        .bind(&doctor.avatar)
        .bind(&doctor.description)
        .bind(&doctor.expertise)
        .bind(education)
        .bind(&doctor.languages)
        .bind(availability)
        .bind(doctor.consultation_fee)
        .bind(doctor.is_verified)
        .bind(doctor.featured)
        .execute(pool)
        .await
        .context("Failed to create doctor")?;

        Ok(doctor_id)
    }

    /// List active doctors, best-rated first, newest profiles breaking ties.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<DoctorRow>> {
        let rows = sqlx::query_as::<_, DoctorRow>(&format!(
            "SELECT {DOCTOR_COLUMNS} FROM doctor WHERE is_active = TRUE \
             ORDER BY rating DESC, created_at DESC"
        ))
        .fetch_all(pool)
        .await
        .context("Failed to list active doctors")?;
        Ok(rows)
    }

    pub async fn get(pool: &PgPool, doctor_id: Uuid) -> Result<Option<DoctorRow>> {
        let row = sqlx::query_as::<_, DoctorRow>(&format!(
            "SELECT {DOCTOR_COLUMNS} FROM doctor WHERE doctor_id = $1"
        ))
        .bind(doctor_id)
        .fetch_optional(pool)
        .await
        .context("Failed to get doctor by ID")?;
        Ok(row)
    }

    /// Bump the profile view counter. Best-effort: concurrent increments
    /// may race and lost updates are acceptable.
    pub async fn increment_views(pool: &PgPool, doctor_id: Uuid) -> Result<()> {
        sqlx::query("UPDATE doctor SET views = views + 1, updated_at = NOW() WHERE doctor_id = $1")
            .bind(doctor_id)
            .execute(pool)
            .await
            .context("Failed to increment doctor views")?;
        Ok(())
    }

    pub async fn update_rating(pool: &PgPool, doctor_id: Uuid, rating: f64) -> Result<()> {
        sqlx::query("UPDATE doctor SET rating = $2, updated_at = NOW() WHERE doctor_id = $1")
            .bind(doctor_id)
            .bind(rating)
            .execute(pool)
            .await
            .context("Failed to update doctor rating")?;
        Ok(())
    }

    /// Re-derive the consultation count from the stored display string,
    /// add one, and write the reformatted value back.
    pub async fn increment_consultations(pool: &PgPool, doctor_id: Uuid) -> Result<()> {
        let row = Self::get(pool, doctor_id)
            .await?
            .context("Doctor not found")?;
        let next = consultation_count(&row.consultations) + 1.0;
        let formatted = format_consultations(next);
        sqlx::query(
            "UPDATE doctor SET consultations = $2, updated_at = NOW() WHERE doctor_id = $1",
        )
        .bind(doctor_id)
        .bind(&formatted)
        .execute(pool)
        .await
        .context("Failed to increment doctor consultations")?;
        Ok(())
    }

    pub async fn count(pool: &PgPool) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM doctor")
            .fetch_one(pool)
            .await
            .context("Failed to count doctors")?;
        Ok(count)
    }
}
