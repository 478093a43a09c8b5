//! Note repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert / list / get / delete over the `notes` collection.
//! - Scope every write in its own transaction; listings read under `query_only`.
//! - Log failures where they occur before handing them back to callers.
//!
//! # Invariants
//! - Writes report success only after the transaction has committed.
//! - Listing yields notes in ascending id order and nothing else.
//! - Deleting a missing id is a successful no-op.

use crate::db::DbError;
use crate::model::note::{Note, NoteId};
use log::{debug, error, info};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::iter::FusedIterator;
use std::time::Instant;

const NOTE_SELECT_SQL: &str = "SELECT id, title, body FROM notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for note operations.
pub trait NoteRepository {
    /// Adds one note and returns the key assigned by the store.
    fn insert_note(&mut self, title: &str, body: &str) -> RepoResult<NoteId>;
    /// Returns every note in ascending id order.
    fn list_all(&self) -> RepoResult<Vec<Note>>;
    /// Gets one note by id.
    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>>;
    /// Removes one note if present.
    fn delete_note(&mut self, id: NoteId) -> RepoResult<()>;
}

/// SQLite-backed notes repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from an opened, upgraded connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_notes_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Opens a read-only cursor over all notes.
    ///
    /// The cursor reads lazily, one record per advance. A new call always
    /// starts from the lowest key, even while another cursor is still open.
    pub fn list_notes(&self) -> RepoResult<NoteCursor<'_>> {
        NoteCursor::open(self.conn)
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn insert_note(&mut self, title: &str, body: &str) -> RepoResult<NoteId> {
        let started_at = Instant::now();
        match insert_in_tx(self.conn, title, body) {
            Ok(id) => {
                info!(
                    "event=note_insert module=repo status=ok note_id={} duration_ms={}",
                    id,
                    started_at.elapsed().as_millis()
                );
                Ok(id)
            }
            Err(err) => {
                error!(
                    "event=note_insert module=repo status=error duration_ms={} error_code=tx_aborted error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn list_all(&self) -> RepoResult<Vec<Note>> {
        self.list_notes()?.collect()
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let note = self
            .conn
            .query_row(
                &format!("{NOTE_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_note_row,
            )
            .optional()?;
        Ok(note)
    }

    fn delete_note(&mut self, id: NoteId) -> RepoResult<()> {
        let started_at = Instant::now();
        match delete_in_tx(self.conn, id) {
            Ok(removed) => {
                info!(
                    "event=note_delete module=repo status=ok note_id={} removed={} duration_ms={}",
                    id,
                    removed,
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=note_delete module=repo status=error note_id={} duration_ms={} error_code=tx_aborted error={}",
                    id,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

/// Lazy, forward-only cursor over the `notes` collection.
///
/// Yields `Ok(note)` per record in ascending key order. Exhaustion is `None`;
/// after `None` or an `Err`, the cursor stays finished.
///
/// The first cursor on an idle connection owns a read transaction with
/// `query_only` set until it finishes or is dropped. Cursors opened while a
/// transaction is already active read inside that transaction.
pub struct NoteCursor<'conn> {
    conn: &'conn Connection,
    scope: Option<Transaction<'conn>>,
    finished: bool,
    last_id: NoteId,
    yielded: usize,
    started_at: Instant,
}

impl<'conn> NoteCursor<'conn> {
    pub(crate) fn open(conn: &'conn Connection) -> RepoResult<Self> {
        let scope = if conn.is_autocommit() {
            Some(begin_read_scope(conn).inspect_err(|err| {
                error!("event=note_list module=repo status=error error_code=tx_begin_failed error={err}");
            })?)
        } else {
            None
        };
        Ok(Self {
            conn,
            scope,
            finished: false,
            last_id: 0,
            yielded: 0,
            started_at: Instant::now(),
        })
    }

    fn advance(&self) -> RepoResult<Option<Note>> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "{NOTE_SELECT_SQL} WHERE id > ?1 ORDER BY id ASC LIMIT 1;"
        ))?;
        let note = stmt.query_row([self.last_id], parse_note_row).optional()?;
        Ok(note)
    }

    fn finish(&mut self) {
        self.finished = true;
        if let Some(tx) = self.scope.take() {
            if let Err(err) = tx.execute_batch("PRAGMA query_only = OFF;") {
                error!("event=note_list module=repo status=error error_code=scope_reset_failed error={err}");
            }
        }
    }
}

impl Iterator for NoteCursor<'_> {
    type Item = RepoResult<Note>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.advance() {
            Ok(Some(note)) => {
                self.last_id = note.id;
                self.yielded += 1;
                Some(Ok(note))
            }
            Ok(None) => {
                self.finish();
                debug!(
                    "event=note_list module=repo status=ok count={} duration_ms={}",
                    self.yielded,
                    self.started_at.elapsed().as_millis()
                );
                None
            }
            Err(err) => {
                self.finish();
                error!(
                    "event=note_list module=repo status=error after_id={} error={}",
                    self.last_id, err
                );
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for NoteCursor<'_> {}

impl Drop for NoteCursor<'_> {
    fn drop(&mut self) {
        self.finish();
    }
}

fn begin_read_scope(conn: &Connection) -> RepoResult<Transaction<'_>> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch("PRAGMA query_only = ON;")?;
    Ok(tx)
}

fn insert_in_tx(conn: &mut Connection, title: &str, body: &str) -> RepoResult<NoteId> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    tx.execute(
        "INSERT INTO notes (title, body) VALUES (?1, ?2);",
        params![title, body],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;
    Ok(id)
}

fn delete_in_tx(conn: &mut Connection, id: NoteId) -> RepoResult<usize> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let removed = tx.execute("DELETE FROM notes WHERE id = ?1;", [id])?;
    tx.commit()?;
    Ok(removed)
}

fn parse_note_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get("id")?,
        title: row.get("title")?,
        body: row.get("body")?,
    })
}

fn ensure_notes_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, "notes")? {
        return Err(RepoError::MissingRequiredTable("notes"));
    }

    for column in ["id", "title", "body"] {
        if !table_has_column(conn, "notes", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "notes",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::{NoteCursor, NoteRepository, SqliteNoteRepository};
    use crate::db::migrations::latest_version;
    use crate::db::open_db_in_memory;

    #[test]
    fn cursor_is_fused_after_exhaustion() {
        let mut conn = open_db_in_memory(latest_version()).unwrap();
        let mut repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
        repo.insert_note("only", "one").unwrap();

        let mut cursor = repo.list_notes().unwrap();
        assert!(cursor.next().is_some());
        assert!(cursor.next().is_none());
        assert!(cursor.next().is_none());
    }

    #[test]
    fn fresh_cursor_restarts_from_lowest_key() {
        let mut conn = open_db_in_memory(latest_version()).unwrap();
        let mut repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
        let first = repo.insert_note("a", "").unwrap();
        repo.insert_note("b", "").unwrap();

        let mut partial = repo.list_notes().unwrap();
        assert_eq!(partial.next().unwrap().unwrap().id, first);
        drop(partial);

        let ids = repo
            .list_notes()
            .unwrap()
            .map(|note| note.unwrap().id)
            .collect::<Vec<_>>();
        assert_eq!(ids.first(), Some(&first));
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn try_new_rejects_connection_without_notes_table() {
        let mut conn = rusqlite::Connection::open_in_memory().unwrap();
        let err = SqliteNoteRepository::try_new(&mut conn).err().unwrap();
        assert!(err.to_string().contains("notes"));
    }

    #[test]
    fn second_listing_succeeds_while_a_cursor_is_open() {
        let mut conn = open_db_in_memory(latest_version()).unwrap();
        let mut repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
        let id = repo.insert_note("shared", "scope").unwrap();

        let mut first = repo.list_notes().unwrap();
        assert_eq!(first.next().unwrap().unwrap().id, id);

        let second = repo.list_notes();
        assert!(second.is_ok());
        let ids = second
            .unwrap()
            .map(|note| note.unwrap().id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![id]);
        assert_eq!(repo.list_all().unwrap().len(), 1);

        assert!(first.next().is_none());
    }

    #[test]
    fn open_cursor_rejects_writes_until_dropped() {
        let conn = open_db_in_memory(latest_version()).unwrap();

        let cursor = NoteCursor::open(&conn).unwrap();
        let err = conn
            .execute("INSERT INTO notes (title, body) VALUES ('x', 'y');", [])
            .unwrap_err();
        assert!(err.to_string().contains("readonly"));
        drop(cursor);

        conn.execute("INSERT INTO notes (title, body) VALUES ('x', 'y');", [])
            .unwrap();
        assert!(conn.is_autocommit());
    }
}
