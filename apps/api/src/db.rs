use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use tracing::info;

/// Creates the PostgreSQL connection pool and bootstraps the schema.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    ensure_schema(&pool).await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Safe to run on every boot.
async fn ensure_schema(pool: &PgPool) -> Result<()> {
    const SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS candidate_profiles (
      id           uuid PRIMARY KEY,
      filename     text NOT NULL,
      source_text  text NOT NULL,
      skills       text[] NOT NULL DEFAULT '{}',
      experience   text[] NOT NULL DEFAULT '{}',
      education    text[] NOT NULL DEFAULT '{}',
      summary      text NOT NULL,
      created_at   timestamptz NOT NULL DEFAULT now()
    );
    CREATE INDEX IF NOT EXISTS idx_profiles_created_at
      ON candidate_profiles (created_at DESC);

    CREATE TABLE IF NOT EXISTS job_postings (
      id           uuid PRIMARY KEY,
      title        text NOT NULL,
      company      text NOT NULL,
      location     text NOT NULL,
      description  text NOT NULL,
      requirements text NOT NULL,
      url          text NOT NULL,
      posted_date  text NOT NULL,
      match_score  double precision NOT NULL,
      applied      boolean NOT NULL DEFAULT false,
      created_at   timestamptz NOT NULL DEFAULT now()
    );
    CREATE INDEX IF NOT EXISTS idx_postings_match_score
      ON job_postings (match_score DESC);

    CREATE TABLE IF NOT EXISTS applications (
      id               uuid PRIMARY KEY,
      job_id           uuid NOT NULL REFERENCES job_postings (id),
      profile_id       uuid NOT NULL REFERENCES candidate_profiles (id),
      cover_letter     text NOT NULL,
      application_date timestamptz NOT NULL DEFAULT now(),
      status           text NOT NULL DEFAULT 'applied'
    );
    CREATE INDEX IF NOT EXISTS idx_applications_date
      ON applications (application_date DESC);
    "#;

    pool.execute(SQL).await?;
    Ok(())
}
