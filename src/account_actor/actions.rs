#[derive(Debug, Clone)]
pub enum BookAction<R> {
    Add { record: R, make_main: bool },
    /// Replaces the fields of an existing record.
    Update { id: String, record: R },
    SetMain(String),
    Remove(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookActionResult {
    Added(String),
    Updated(String),
    MainChanged(String),
    /// Carries the id of the record promoted to main, if the main one was removed.
    Removed { new_main: Option<String> },
}
