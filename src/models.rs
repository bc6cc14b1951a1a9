#[derive(Debug, Clone)]
pub struct Category {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: i64,
    pub title: String,
    /// "income" or "outcome" by convention; stored as free text.
    pub kind: String,
    pub value: f64,
    pub category_id: Option<i64>,
}

/// A transaction built from a parsed row, before the store assigns an id.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub title: String,
    pub kind: String,
    pub value: f64,
    pub category_id: Option<i64>,
}

/// Intermediate representation of one CSV data row before DB insert.
/// `value` stays textual until the persistence step parses it.
#[derive(Debug, Clone)]
pub struct ParsedRow {
    pub title: String,
    pub kind: String,
    pub value: String,
    pub category: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Balance {
    pub income: f64,
    pub outcome: f64,
    pub total: f64,
}
