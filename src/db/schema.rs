use chrono::{Duration, Local, NaiveTime};
use sqlx::PgPool;
use tracing::{debug, error, info};

use crate::auth::hash_password;
use crate::db::{events, users, SeedOptions};
use crate::models::{EventDraft, EventStatus};
use crate::utils::error::AppError;

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        email VARCHAR(255) UNIQUE NOT NULL,
        password VARCHAR(255) NOT NULL,
        name VARCHAR(255) NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CREATE_EVENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS events (
        id SERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        description TEXT,
        event_date DATE NOT NULL,
        event_time TIME NOT NULL,
        status VARCHAR(50) NOT NULL DEFAULT 'andamento',
        image_url TEXT,
        location TEXT,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

pub async fn initialize(pool: &PgPool, seed: &SeedOptions) -> Result<(), AppError> {
    info!("Starting database initialization");

    if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
        error!(error = %e, "Database connection failed");
        return Err(e.into());
    }

    sqlx::query(CREATE_USERS).execute(pool).await?;
    debug!("Users table created/verified");

    sqlx::query(CREATE_EVENTS).execute(pool).await?;
    debug!("Events table created/verified");

    upgrade_events_table(pool, &seed.default_location).await;

    seed_default_admin(pool, seed).await?;

    if seed.sample_events {
        seed_sample_events(pool, &seed.default_location).await?;
    }

    info!("Database initialization completed");
    Ok(())
}

/// Brings tables created by older deployments up to date. Each step is
/// best effort.
async fn upgrade_events_table(pool: &PgPool, default_location: &str) {
    if let Err(e) = sqlx::query("ALTER TABLE events ALTER COLUMN image_url TYPE TEXT")
        .execute(pool)
        .await
    {
        debug!(error = %e, "image_url column left unchanged");
    }

    if let Err(e) = sqlx::query("ALTER TABLE events ADD COLUMN IF NOT EXISTS location TEXT")
        .execute(pool)
        .await
    {
        debug!(error = %e, "location column left unchanged");
        return;
    }

    match sqlx::query("UPDATE events SET location = $1 WHERE location IS NULL")
        .bind(default_location)
        .execute(pool)
        .await
    {
        Ok(done) if done.rows_affected() > 0 => {
            info!(rows = done.rows_affected(), "Back-filled event locations");
        }
        Ok(_) => {}
        Err(e) => debug!(error = %e, "Location back-fill skipped"),
    }
}

async fn seed_default_admin(pool: &PgPool, seed: &SeedOptions) -> Result<(), AppError> {
    if users::count(pool).await? > 0 {
        return Ok(());
    }

    let hash = hash_password(&seed.admin.password)?;
    users::insert(pool, &seed.admin.name, &seed.admin.email, &hash).await?;
    info!(email = %seed.admin.email, "Default admin user created");
    Ok(())
}

/// Demo data relative to today: one past, two upcoming, one cancelled.
pub fn sample_events(default_location: &str) -> Vec<EventDraft> {
    let today = Local::now().date_naive();
    let at = |h: u32| NaiveTime::from_hms_opt(h, 0, 0).unwrap_or(NaiveTime::MIN);

    vec![
        EventDraft {
            title: "Acampamento de Verão".to_string(),
            description: Some("Acampamento anual de verão para todos os grupos".to_string()),
            event_date: today - Duration::days(30),
            event_time: at(9),
            image_url: None,
            location: default_location.to_string(),
            status: EventStatus::Realizado,
        },
        EventDraft {
            title: "Reunião Semanal".to_string(),
            description: Some("Reunião semanal do grupo escoteiro".to_string()),
            event_date: today + Duration::days(7),
            event_time: at(19),
            image_url: None,
            location: default_location.to_string(),
            status: EventStatus::Andamento,
        },
        EventDraft {
            title: "Caminhada Ecológica".to_string(),
            description: Some("Atividade de conscientização ambiental".to_string()),
            event_date: today + Duration::days(14),
            event_time: at(8),
            image_url: None,
            location: "Parque Municipal de Pirabeiraba".to_string(),
            status: EventStatus::Andamento,
        },
        EventDraft {
            title: "Festival de Talentos".to_string(),
            description: Some("Apresentação dos talentos dos escoteiros".to_string()),
            event_date: today + Duration::days(21),
            event_time: at(15),
            image_url: None,
            location: "Escola Municipal de Pirabeiraba".to_string(),
            status: EventStatus::Cancelado,
        },
    ]
}

async fn seed_sample_events(pool: &PgPool, default_location: &str) -> Result<(), AppError> {
    if events::count(pool, None).await? > 0 {
        return Ok(());
    }

    let drafts = sample_events(default_location);
    for draft in &drafts {
        events::insert(pool, draft).await?;
    }
    info!(count = drafts.len(), "Sample events created");
    Ok(())
}
