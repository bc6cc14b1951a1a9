use comfy_table::{Cell, Table};

use crate::db::get_connection;
use crate::error::Result;
use crate::repo::list_categories;
use crate::settings::get_data_dir;

pub fn run() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("penny.db"))?;
    let categories = list_categories(&conn)?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title"]);
    for category in categories {
        table.add_row(vec![Cell::new(category.id), Cell::new(category.title)]);
    }
    println!("Categories\n{table}");
    Ok(())
}
