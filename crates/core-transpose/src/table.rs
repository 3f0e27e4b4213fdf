use indexmap::IndexMap;
use serde_json::Value;

/// One record: field name to JSON value, in insertion order.
pub type Row = IndexMap<String, Value>;

/// Field name to one value per row, keyed in first-seen field order.
pub type ColumnTable = IndexMap<String, Vec<Value>>;

/// Turns a row-oriented list into a column table.
///
/// Rows are expected to be rectangular (identical key sets). A key absent
/// from a row contributes no entry to that key's column, so sparse rows
/// desynchronize column alignment from row index:
/// `[{a:1,b:2},{a:3}]` becomes `{a:[1,3], b:[2]}`.
#[must_use]
pub fn transpose(rows: &[Row]) -> ColumnTable {
    let mut table = ColumnTable::new();
    for row in rows {
        for (key, value) in row {
            table.entry(key.clone()).or_default().push(value.clone());
        }
    }
    table
}

/// Rebuilds the row-oriented list from a column table.
///
/// Row count is taken from the first column; shorter columns yield
/// `Value::Null` for out-of-range rows and longer columns are truncated.
#[must_use]
pub fn untranspose(table: &ColumnTable) -> Vec<Row> {
    let row_count = table.values().next().map_or(0, Vec::len);
    (0..row_count)
        .map(|index| {
            table
                .iter()
                .map(|(key, values)| {
                    let value = values.get(index).cloned().unwrap_or(Value::Null);
                    (key.clone(), value)
                })
                .collect()
        })
        .collect()
}
