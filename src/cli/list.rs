use comfy_table::{Cell, Table};

use crate::db::get_connection;
use crate::error::Result;
use crate::repo::list_transactions;
use crate::settings::get_data_dir;

pub fn run() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("penny.db"))?;
    let rows = list_transactions(&conn)?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Type", "Value", "Category"]);
    for (txn, category) in rows {
        table.add_row(vec![
            Cell::new(txn.id),
            Cell::new(txn.title),
            Cell::new(txn.kind),
            Cell::new(format!("{:.2}", txn.value)),
            Cell::new(category.unwrap_or_default()),
        ]);
    }
    println!("Transactions\n{table}");
    Ok(())
}
