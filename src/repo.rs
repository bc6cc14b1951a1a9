use rusqlite::Connection;

use crate::error::Result;
use crate::models::{Balance, Category, NewTransaction, Transaction};

// ---------------------------------------------------------------------------
// Category store
// ---------------------------------------------------------------------------

/// Single bulk lookup: all categories whose title appears in `titles`.
/// Duplicate input titles are harmless.
pub fn find_categories_by_title(conn: &Connection, titles: &[String]) -> Result<Vec<Category>> {
    if titles.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = vec!["?"; titles.len()].join(",");
    let sql = format!("SELECT id, title FROM categories WHERE title IN ({placeholders})");
    let mut stmt = conn.prepare(&sql)?;
    let categories = stmt
        .query_map(rusqlite::params_from_iter(titles.iter()), |row| {
            Ok(Category {
                id: row.get(0)?,
                title: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(categories)
}

/// Bulk create: one insert per title inside a single SQLite transaction.
/// Returns the created records, ids populated, in input order.
pub fn create_categories(conn: &Connection, titles: &[String]) -> Result<Vec<Category>> {
    if titles.is_empty() {
        return Ok(Vec::new());
    }
    let tx = conn.unchecked_transaction()?;
    let mut created = Vec::with_capacity(titles.len());
    {
        let mut stmt = tx.prepare("INSERT INTO categories (title) VALUES (?1)")?;
        for title in titles {
            stmt.execute([title])?;
            created.push(Category {
                id: tx.last_insert_rowid(),
                title: title.clone(),
            });
        }
    }
    tx.commit()?;
    Ok(created)
}

pub fn list_categories(conn: &Connection) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare("SELECT id, title FROM categories ORDER BY id")?;
    let categories = stmt
        .query_map([], |row| {
            Ok(Category {
                id: row.get(0)?,
                title: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(categories)
}

// ---------------------------------------------------------------------------
// Transaction store
// ---------------------------------------------------------------------------

/// Bulk save: persists all rows inside a single SQLite transaction and
/// returns the stored records with generated ids, in input order.
pub fn create_transactions(conn: &Connection, rows: &[NewTransaction]) -> Result<Vec<Transaction>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let tx = conn.unchecked_transaction()?;
    let mut saved = Vec::with_capacity(rows.len());
    {
        let mut stmt = tx.prepare(
            "INSERT INTO transactions (title, type, value, category_id) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for row in rows {
            stmt.execute(rusqlite::params![row.title, row.kind, row.value, row.category_id])?;
            saved.push(Transaction {
                id: tx.last_insert_rowid(),
                title: row.title.clone(),
                kind: row.kind.clone(),
                value: row.value,
                category_id: row.category_id,
            });
        }
    }
    tx.commit()?;
    Ok(saved)
}

/// Transactions joined with their category title (None when uncategorized).
pub fn list_transactions(conn: &Connection) -> Result<Vec<(Transaction, Option<String>)>> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.title, t.type, t.value, t.category_id, c.title \
         FROM transactions t LEFT JOIN categories c ON t.category_id = c.id \
         ORDER BY t.id",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                Transaction {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    kind: row.get(2)?,
                    value: row.get(3)?,
                    category_id: row.get(4)?,
                },
                row.get::<_, Option<String>>(5)?,
            ))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn balance(conn: &Connection) -> Result<Balance> {
    let (income, outcome): (f64, f64) = conn.query_row(
        "SELECT \
             COALESCE(SUM(CASE WHEN type = 'income' THEN value ELSE 0 END), 0), \
             COALESCE(SUM(CASE WHEN type = 'outcome' THEN value ELSE 0 END), 0) \
         FROM transactions",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    Ok(Balance {
        income,
        outcome,
        total: income - outcome,
    })
}
