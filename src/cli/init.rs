use std::path::PathBuf;

use crate::db::{get_connection, init_db};
use crate::error::Result;
use crate::settings::{save_settings, shellexpand_path, Settings};

pub fn run(data_dir: Option<String>) -> Result<()> {
    let dir = data_dir
        .map(|d| shellexpand_path(&d))
        .unwrap_or_else(|| Settings::default().data_dir);
    let path = PathBuf::from(&dir);
    std::fs::create_dir_all(&path)?;

    let conn = get_connection(&path.join("penny.db"))?;
    init_db(&conn)?;

    save_settings(&Settings { data_dir: dir.clone() })?;
    println!("Initialized penny database in {dir}");
    Ok(())
}
