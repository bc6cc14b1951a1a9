use crate::db::get_connection;
use crate::error::Result;
use crate::repo::balance;
use crate::settings::get_data_dir;

pub fn run() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("penny.db"))?;
    let b = balance(&conn)?;
    println!("Income:  {:.2}", b.income);
    println!("Outcome: {:.2}", b.outcome);
    println!("Total:   {:.2}", b.total);
    Ok(())
}
