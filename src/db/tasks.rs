//! Task CRUD operations.
//!
//! Each operation is a single parameterized statement. Writes report the
//! number of affected rows and leave existence checks to the caller.

use super::{Database, now_ms};
use crate::types::Task;
use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, Row, params};

const TASK_COLUMNS: &str = "id, title, description, is_completed, created_at";

pub fn parse_task_row(row: &Row) -> rusqlite::Result<Task> {
    let created_at_ms: i64 = row.get("created_at")?;
    let created_at = DateTime::<Utc>::from_timestamp_millis(created_at_ms).ok_or_else(|| {
        rusqlite::Error::IntegralValueOutOfRange(4, created_at_ms)
    })?;

    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        is_completed: row.get("is_completed")?,
        created_at,
    })
}

impl Database {
    /// Pending tasks, newest first, at most `limit` rows.
    pub fn list_recent_tasks(&self, limit: usize) -> Result<Vec<Task>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM task
                 WHERE is_completed = 0
                 ORDER BY created_at DESC, id DESC
                 LIMIT ?1",
                TASK_COLUMNS
            ))?;
            let tasks = stmt
                .query_map(params![limit as i64], parse_task_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(tasks)
        })
    }

    /// Every task, newest first.
    pub fn list_all_tasks(&self) -> Result<Vec<Task>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM task ORDER BY created_at DESC, id DESC",
                TASK_COLUMNS
            ))?;
            let tasks = stmt
                .query_map([], parse_task_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(tasks)
        })
    }

    /// Fetch a single task.
    pub fn get_task(&self, id: i64) -> Result<Option<Task>> {
        self.with_conn(|conn| {
            let task = conn
                .query_row(
                    &format!("SELECT {} FROM task WHERE id = ?1", TASK_COLUMNS),
                    params![id],
                    parse_task_row,
                )
                .optional()?;
            Ok(task)
        })
    }

    /// Insert a task and return its id.
    ///
    /// A missing title is handed to the store as NULL and rejected by the
    /// column constraint.
    pub fn create_task(&self, title: Option<&str>, description: Option<&str>) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO task (title, description, is_completed, created_at)
                 VALUES (?1, ?2, 0, ?3)",
                params![title, description, now_ms()],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Overwrite title and description. Returns affected rows.
    pub fn update_task(
        &self,
        id: i64,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<usize> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE task SET title = ?1, description = ?2 WHERE id = ?3",
                params![title, description, id],
            )?;
            Ok(affected)
        })
    }

    /// Set `is_completed`. Returns affected rows.
    pub fn mark_task_done(&self, id: i64) -> Result<usize> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE task SET is_completed = 1 WHERE id = ?1",
                params![id],
            )?;
            Ok(affected)
        })
    }

    /// Hard delete. Returns affected rows.
    pub fn delete_task(&self, id: i64) -> Result<usize> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM task WHERE id = ?1", params![id])?;
            Ok(affected)
        })
    }
}
