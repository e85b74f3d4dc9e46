//! Applies module migrations against Postgres, recording each one in a
//! `schema_migrations` ledger so it runs at most once.

use std::collections::HashSet;

use anyhow::Context;
use bookrec_kernel::Migration;
use sqlx::PgPool;

const LEDGER_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_migrations (
    module     TEXT        NOT NULL,
    id         TEXT        NOT NULL,
    applied_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    PRIMARY KEY (module, id)
)
"#;

/// Apply every migration not yet in the ledger, in the order given.
/// Each migration and its ledger row commit together. Returns how many ran.
pub async fn run_migrations(pool: &PgPool, migrations: &[(String, Migration)]) -> anyhow::Result<usize> {
    sqlx::raw_sql(LEDGER_DDL)
        .execute(pool)
        .await
        .context("failed to create schema_migrations ledger")?;

    let applied: HashSet<(String, String)> =
        sqlx::query_as::<_, (String, String)>("SELECT module, id FROM schema_migrations")
            .fetch_all(pool)
            .await
            .context("failed to read schema_migrations ledger")?
            .into_iter()
            .collect();

    let pending = pending_migrations(migrations, &applied);
    if pending.is_empty() {
        tracing::info!("schema is up to date");
        return Ok(0);
    }

    for (module, migration) in &pending {
        tracing::info!(module = %module, migration = migration.id, "applying migration");

        let mut tx = pool
            .begin()
            .await
            .context("failed to open migration transaction")?;

        sqlx::raw_sql(migration.up)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("migration {module}/{} failed", migration.id))?;

        sqlx::query("INSERT INTO schema_migrations (module, id) VALUES ($1, $2)")
            .bind(module.as_str())
            .bind(migration.id)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("failed to record migration {module}/{}", migration.id))?;

        tx.commit()
            .await
            .with_context(|| format!("failed to commit migration {module}/{}", migration.id))?;
    }

    Ok(pending.len())
}

fn pending_migrations<'a>(
    migrations: &'a [(String, Migration)],
    applied: &HashSet<(String, String)>,
) -> Vec<&'a (String, Migration)> {
    migrations
        .iter()
        .filter(|(module, migration)| {
            !applied.contains(&(module.clone(), migration.id.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn migration(id: &'static str) -> Migration {
        Migration {
            id,
            up: "SELECT 1",
        }
    }

    #[test]
    fn applied_migrations_are_skipped() {
        let migrations = vec![
            ("authors".to_string(), migration("001_init")),
            ("books".to_string(), migration("001_init")),
            ("books".to_string(), migration("002_isbn_index")),
        ];
        let applied: HashSet<(String, String)> =
            [("books".to_string(), "001_init".to_string())].into_iter().collect();

        let pending: Vec<(&str, &str)> = pending_migrations(&migrations, &applied)
            .into_iter()
            .map(|(module, m)| (module.as_str(), m.id))
            .collect();

        assert_eq!(
            pending,
            vec![("authors", "001_init"), ("books", "002_isbn_index")]
        );
    }
}
