use std::path::PathBuf;

use crate::db::get_connection;
use crate::error::{PennyError, Result};
use crate::importer::import_file;
use crate::settings::get_data_dir;

pub fn run(file: &str) -> Result<()> {
    let file_path = PathBuf::from(file);
    if !file_path.exists() {
        return Err(PennyError::FileNotFound(file.to_string()));
    }
    let data_dir = get_data_dir();
    let conn = get_connection(&data_dir.join("penny.db"))?;

    let saved = import_file(&conn, &file_path)?;

    let categorized = saved.iter().filter(|t| t.category_id.is_some()).count();
    println!(
        "{} transactions imported ({} categorized)",
        saved.len(),
        categorized
    );
    Ok(())
}
