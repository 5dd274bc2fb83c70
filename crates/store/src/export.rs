//! Writing a finished dataset out to SQLite.
//!
//! Two artifacts are produced per run: the full database, and a "no text"
//! copy with the bulky talk text and topic tables dropped for consumers
//! that only need the relational metadata.

use std::path::Path;

use exn::ResultExt;
use podium_model::Dataset;
use tracing::{info, instrument};

use crate::db::Database;
use crate::error::{ErrorKind, Result};

/// Insert every row of `dataset` into `db` in a single transaction.
///
/// Row ids were assigned during model building and are inserted verbatim,
/// so the database agrees with the JSON export. Expects a freshly migrated
/// database; re-running against a populated one trips the unique
/// constraints.
#[instrument(skip_all, fields(talks = dataset.talks.len()))]
pub async fn write_dataset(db: &Database, dataset: &Dataset) -> Result<()> {
    let mut tx = db.pool().begin().await.or_raise(|| ErrorKind::Database)?;

    for row in &dataset.speakers {
        sqlx::query(include_str!("../queries/insert_speaker.sql"))
            .bind(row.id)
            .bind(&row.name)
            .execute(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
    }
    for row in &dataset.organizations {
        sqlx::query(include_str!("../queries/insert_organization.sql"))
            .bind(row.id)
            .bind(&row.name)
            .execute(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
    }
    for row in &dataset.callings {
        sqlx::query(include_str!("../queries/insert_calling.sql"))
            .bind(row.id)
            .bind(&row.name)
            .bind(row.organization)
            .bind(row.rank)
            .execute(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
    }
    for row in &dataset.conferences {
        sqlx::query(include_str!("../queries/insert_conference.sql"))
            .bind(row.id)
            .bind(i64::from(row.year))
            .bind(row.season.as_str())
            .execute(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
    }
    for row in &dataset.sessions {
        sqlx::query(include_str!("../queries/insert_session.sql"))
            .bind(row.id)
            .bind(row.conference)
            .bind(&row.name)
            .bind(row.position)
            .execute(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
    }
    for row in &dataset.talks {
        sqlx::query(include_str!("../queries/insert_talk.sql"))
            .bind(row.id)
            .bind(&row.title)
            .bind(row.emeritus)
            .execute(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
    }
    for row in &dataset.talk_conferences {
        sqlx::query(include_str!("../queries/insert_talk_conference.sql"))
            .bind(row.id)
            .bind(row.talk)
            .bind(row.conference)
            .execute(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
    }
    for row in &dataset.talk_sessions {
        sqlx::query(include_str!("../queries/insert_talk_session.sql"))
            .bind(row.id)
            .bind(row.talk)
            .bind(row.session)
            .bind(row.position)
            .execute(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
    }
    for row in &dataset.talk_speakers {
        sqlx::query(include_str!("../queries/insert_talk_speaker.sql"))
            .bind(row.id)
            .bind(row.talk)
            .bind(row.speaker)
            .execute(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
    }
    for row in &dataset.talk_callings {
        sqlx::query(include_str!("../queries/insert_talk_calling.sql"))
            .bind(row.id)
            .bind(row.talk)
            .bind(row.speaker)
            .bind(row.calling)
            .execute(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
    }
    for row in &dataset.talk_texts {
        sqlx::query(include_str!("../queries/insert_talk_text.sql"))
            .bind(row.id)
            .bind(row.talk)
            .bind(&row.text)
            .execute(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
    }
    for row in &dataset.talk_urls {
        sqlx::query(include_str!("../queries/insert_talk_url.sql"))
            .bind(row.id)
            .bind(row.talk)
            .bind(&row.url)
            .bind(&row.kind)
            .execute(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
    }
    for row in &dataset.talk_topics {
        sqlx::query(include_str!("../queries/insert_talk_topic.sql"))
            .bind(row.id)
            .bind(row.talk)
            .bind(&row.name)
            .execute(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
    }

    tx.commit().await.or_raise(|| ErrorKind::Database)?;
    info!(talks = dataset.talks.len(), speakers = dataset.speakers.len(), "dataset written");
    Ok(())
}

/// Produce the "no text" variant of an already-written database.
///
/// Copies the file at `source` to `dest`, then drops the text and topic
/// tables from the copy and vacuums it back down to size. The source must
/// be closed first so its WAL has been checkpointed.
#[instrument]
pub async fn write_no_text_copy(source: &Path, dest: &Path) -> Result<()> {
    tokio::fs::copy(source, dest)
        .await
        .or_raise(|| ErrorKind::ExportFile(dest.to_path_buf()))?;

    let db = Database::connect(dest).await?;
    sqlx::query("DROP TABLE talk_texts")
        .execute(db.pool())
        .await
        .or_raise(|| ErrorKind::Database)?;
    sqlx::query("DROP TABLE talk_topics")
        .execute(db.pool())
        .await
        .or_raise(|| ErrorKind::Database)?;
    // VACUUM cannot run inside a transaction.
    sqlx::query("VACUUM")
        .execute(db.pool())
        .await
        .or_raise(|| ErrorKind::Database)?;
    db.close().await;
    info!(dest = %dest.display(), "no-text copy written");
    Ok(())
}
