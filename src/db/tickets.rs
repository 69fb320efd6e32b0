// src/db/tickets.rs
use crate::domain::{Ticket, TicketStatus};
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension, Row};

const TICKET_COLUMNS: &str = "id, category, description, status, created_at";

fn ticket_from_row(row: &Row<'_>) -> rusqlite::Result<Ticket> {
    Ok(Ticket {
        id: row.get(0)?,
        category: row.get(1)?,
        description: row.get(2)?,
        status: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// Insert a new Open ticket and return its id.
pub fn create_ticket(
    conn: &Connection,
    category: &str,
    description: &str,
) -> Result<i64, ServerError> {
    conn.execute(
        "INSERT INTO tickets (category, description, status) VALUES (?, ?, ?)",
        params![category, description, TicketStatus::Open],
    )
    .map_err(|e| ServerError::DbError(format!("insert ticket failed: {e}")))?;
    Ok(conn.last_insert_rowid())
}

/// All tickets, newest first.
pub fn list_tickets(conn: &Connection) -> Result<Vec<Ticket>, ServerError> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {TICKET_COLUMNS} FROM tickets ORDER BY id DESC"
        ))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map([], ticket_from_row)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut tickets = Vec::new();
    for r in rows {
        tickets.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(tickets)
}

pub fn get_ticket(conn: &Connection, id: i64) -> Result<Option<Ticket>, ServerError> {
    conn.query_row(
        &format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE id = ?"),
        params![id],
        ticket_from_row,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("load ticket failed: {e}")))
}

/// Mark a ticket Resolved. Returns whether a ticket with that id exists;
/// resolving twice is not an error.
pub fn resolve_ticket(conn: &Connection, id: i64) -> Result<bool, ServerError> {
    let updated = conn
        .execute(
            "UPDATE tickets SET status = ? WHERE id = ?",
            params![TicketStatus::Resolved, id],
        )
        .map_err(|e| ServerError::DbError(format!("resolve ticket failed: {e}")))?;
    Ok(updated > 0)
}

pub fn count_tickets(conn: &Connection) -> Result<i64, ServerError> {
    conn.query_row("SELECT COUNT(*) FROM tickets", [], |r| r.get(0))
        .map_err(|e| ServerError::DbError(format!("count tickets failed: {e}")))
}
