use std::collections::{HashMap, HashSet};
use std::path::Path;

use rusqlite::Connection;

use crate::error::{PennyError, Result};
use crate::models::{NewTransaction, ParsedRow, Transaction};
use crate::repo;

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Drains the whole file into memory. The first line is a header and is
/// skipped regardless of content; data starts at line 2. Rows missing title,
/// type, or value are dropped without error; an empty category is kept.
pub fn parse_rows(file_path: &Path) -> Result<Vec<ParsedRow>> {
    let file = std::fs::File::open(file_path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let title = record.get(0).unwrap_or("").trim().to_string();
        let kind = record.get(1).unwrap_or("").trim().to_string();
        let value = record.get(2).unwrap_or("").trim().to_string();
        let category = record.get(3).unwrap_or("").trim().to_string();
        if title.is_empty() || kind.is_empty() || value.is_empty() {
            continue;
        }
        rows.push(ParsedRow {
            title,
            kind,
            value,
            category,
        });
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// import_file
// ---------------------------------------------------------------------------

/// Imports a CSV of transactions, creating missing categories on the fly,
/// and deletes the source file once everything is persisted.
///
/// The steps are sequential with no transactional wrapping across them:
/// categories committed before a later failure stay committed, and a failed
/// file deletion propagates even though the transactions are already saved.
pub fn import_file(conn: &Connection, file_path: &Path) -> Result<Vec<Transaction>> {
    // Full drain before any store access.
    let rows = parse_rows(file_path)?;

    // Every non-empty category name mentioned, duplicates included.
    let mentioned: Vec<String> = rows
        .iter()
        .filter(|r| !r.category.is_empty())
        .map(|r| r.category.clone())
        .collect();

    let existing = repo::find_categories_by_title(conn, &mentioned)?;
    let existing_titles: HashSet<&str> = existing.iter().map(|c| c.title.as_str()).collect();

    // Unknown titles, deduplicated in first-seen order.
    let mut seen: HashSet<&str> = HashSet::new();
    let new_titles: Vec<String> = mentioned
        .iter()
        .filter(|t| !existing_titles.contains(t.as_str()))
        .filter(|t| seen.insert(t.as_str()))
        .cloned()
        .collect();

    let created = repo::create_categories(conn, &new_titles)?;

    let mut by_title: HashMap<&str, i64> = HashMap::new();
    for cat in created.iter().chain(existing.iter()) {
        by_title.insert(cat.title.as_str(), cat.id);
    }

    let mut new_rows = Vec::with_capacity(rows.len());
    for row in &rows {
        let value: f64 = row
            .value
            .parse()
            .map_err(|_| PennyError::InvalidValue(row.value.clone()))?;
        new_rows.push(NewTransaction {
            title: row.title.clone(),
            kind: row.kind.clone(),
            value,
            // Empty or unresolved category leaves the reference absent.
            category_id: by_title.get(row.category.as_str()).copied(),
        });
    }

    let saved = repo::create_transactions(conn, &new_rows)?;

    std::fs::remove_file(file_path)?;

    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{get_connection, init_db};

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    fn write_csv(dir: &Path, name: &str, rows: &[(&str, &str, &str, &str)]) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut content = String::from("title,type,value,category\n");
        for (title, kind, value, category) in rows {
            content.push_str(&format!("{title},{kind},{value},{category}\n"));
        }
        std::fs::write(&path, &content).unwrap();
        path
    }

    fn category_titles(conn: &Connection) -> Vec<String> {
        conn.prepare("SELECT title FROM categories ORDER BY id")
            .unwrap()
            .query_map([], |r| r.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_import_creates_transactions_and_categories() {
        let (dir, conn) = test_db();
        let csv_path = write_csv(dir.path(), "import.csv", &[
            ("Salary", "income", "5000", "Job"),
            ("Lunch", "outcome", "20", "Food"),
            ("Dinner", "outcome", "35", "Food"),
        ]);
        let saved = import_file(&conn, &csv_path).unwrap();
        assert_eq!(saved.len(), 3);
        assert!(saved.iter().all(|t| t.id > 0));
        assert_eq!(category_titles(&conn), vec!["Job", "Food"]);
    }

    #[test]
    fn test_import_example_scenario() {
        // Salary/Lunch/Gift against an empty store: 3 transactions, two new
        // categories, and the empty-category row stays uncategorized.
        let (dir, conn) = test_db();
        let csv_path = write_csv(dir.path(), "import.csv", &[
            ("Salary", "income", "5000", "Job"),
            ("Lunch", "outcome", "20", "Food"),
            ("Gift", "income", "50", ""),
        ]);
        let saved = import_file(&conn, &csv_path).unwrap();
        assert_eq!(saved.len(), 3);
        assert_eq!(category_titles(&conn), vec!["Job", "Food"]);
        assert_eq!(saved[2].title, "Gift");
        assert_eq!(saved[2].category_id, None);
    }

    #[test]
    fn test_import_skips_rows_missing_required_fields() {
        let (dir, conn) = test_db();
        let csv_path = write_csv(dir.path(), "import.csv", &[
            ("", "outcome", "10", "Food"),
            ("Lunch", "", "20", "Food"),
            ("Dinner", "outcome", "", "Food"),
            ("Taxi", "outcome", "15", "Transport"),
        ]);
        let saved = import_file(&conn, &csv_path).unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].title, "Taxi");
        // "Food" was only mentioned by dropped rows, so it is never created.
        assert_eq!(category_titles(&conn), vec!["Transport"]);
    }

    #[test]
    fn test_import_reuses_existing_categories() {
        let (dir, conn) = test_db();
        let first = write_csv(dir.path(), "first.csv", &[
            ("Salary", "income", "5000", "Job"),
            ("Lunch", "outcome", "20", "Food"),
        ]);
        import_file(&conn, &first).unwrap();

        let second = write_csv(dir.path(), "second.csv", &[
            ("Salary", "income", "5000", "Job"),
            ("Lunch", "outcome", "20", "Food"),
        ]);
        let saved = import_file(&conn, &second).unwrap();
        assert_eq!(saved.len(), 2);
        // No duplicate category rows across sequential runs.
        assert_eq!(category_titles(&conn), vec!["Job", "Food"]);
        let count: i64 = conn
            .query_row("SELECT count(*) FROM transactions", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 4);
    }

    #[test]
    fn test_import_resolves_mixed_existing_and_new() {
        let (dir, conn) = test_db();
        let existing = repo::create_categories(&conn, &["Food".to_string()]).unwrap();
        let csv_path = write_csv(dir.path(), "import.csv", &[
            ("Lunch", "outcome", "20", "Food"),
            ("Salary", "income", "5000", "Job"),
        ]);
        let saved = import_file(&conn, &csv_path).unwrap();
        assert_eq!(saved[0].category_id, Some(existing[0].id));
        assert!(saved[1].category_id.is_some());
        assert_ne!(saved[1].category_id, saved[0].category_id);
        assert_eq!(category_titles(&conn), vec!["Food", "Job"]);
    }

    #[test]
    fn test_import_dedupes_new_categories_first_seen_order() {
        let (dir, conn) = test_db();
        let csv_path = write_csv(dir.path(), "import.csv", &[
            ("Lunch", "outcome", "20", "Food"),
            ("Salary", "income", "5000", "Job"),
            ("Dinner", "outcome", "35", "Food"),
        ]);
        import_file(&conn, &csv_path).unwrap();
        assert_eq!(category_titles(&conn), vec!["Food", "Job"]);
    }

    #[test]
    fn test_import_deletes_source_file() {
        let (dir, conn) = test_db();
        let csv_path = write_csv(dir.path(), "import.csv", &[
            ("Salary", "income", "5000", "Job"),
        ]);
        import_file(&conn, &csv_path).unwrap();
        assert!(!csv_path.exists());
    }

    #[test]
    fn test_import_header_only_file() {
        let (dir, conn) = test_db();
        let csv_path = write_csv(dir.path(), "import.csv", &[]);
        let saved = import_file(&conn, &csv_path).unwrap();
        assert!(saved.is_empty());
        assert!(category_titles(&conn).is_empty());
        // Even an empty import consumes its source file.
        assert!(!csv_path.exists());
    }

    #[test]
    fn test_import_missing_file_errors() {
        let (dir, conn) = test_db();
        let err = import_file(&conn, &dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, PennyError::Io(_)));
    }

    #[test]
    fn test_import_non_numeric_value_errors_after_categories() {
        // The value parse happens at the persistence step, after category
        // creation: the categories stay committed, the transactions do not,
        // and the source file survives.
        let (dir, conn) = test_db();
        let csv_path = write_csv(dir.path(), "import.csv", &[
            ("Lunch", "outcome", "twenty", "Food"),
        ]);
        let err = import_file(&conn, &csv_path).unwrap_err();
        assert!(matches!(err, PennyError::InvalidValue(_)));
        assert_eq!(category_titles(&conn), vec!["Food"]);
        let count: i64 = conn
            .query_row("SELECT count(*) FROM transactions", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 0);
        assert!(csv_path.exists());
    }

    #[test]
    fn test_parse_rows_trims_fields_and_skips_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        let content = "\
title,type,value,category
 Salary , income , 5000 , Job
Lunch,outcome,20
";
        std::fs::write(&path, content).unwrap();
        let rows = parse_rows(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "Salary");
        assert_eq!(rows[0].kind, "income");
        assert_eq!(rows[0].value, "5000");
        assert_eq!(rows[0].category, "Job");
        // Short row: category column absent, treated as empty.
        assert_eq!(rows[1].category, "");
    }

    #[test]
    fn test_parse_rows_header_skipped_even_if_data_shaped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        let content = "\
Coffee,outcome,4,Food
Lunch,outcome,20,Food
";
        std::fs::write(&path, content).unwrap();
        let rows = parse_rows(&path).unwrap();
        // Line 1 is always the header, whatever it contains.
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Lunch");
    }
}
