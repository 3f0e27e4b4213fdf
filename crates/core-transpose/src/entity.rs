use crate::errors::FieldWriteError;
use crate::table::ColumnTable;
use serde_json::Value;

/// One column of a typed entity: name plus read/write access.
///
/// Descriptor order is the column order. A `read` returning `None` records
/// `Value::Null` for that entity instead of failing the call.
pub struct FieldDescriptor<T> {
    pub name: &'static str,
    pub read: fn(&T) -> Option<Value>,
    pub write: fn(&mut T, Value) -> Result<(), FieldWriteError>,
}

/// An entity with a statically-declared ordered field list.
pub trait ColumnarEntity: Default {
    fn fields() -> &'static [FieldDescriptor<Self>];
}

#[derive(Debug)]
pub struct RowFailure {
    pub row: usize,
    pub error: FieldWriteError,
}

/// Entities rebuilt from a column table plus the rows that were dropped.
#[derive(Debug)]
pub struct EntityRows<T> {
    pub entities: Vec<T>,
    pub failures: Vec<RowFailure>,
}

/// Turns an entity list into a column table, one column per field
/// descriptor, in descriptor order.
#[must_use]
pub fn transpose_entities<T: ColumnarEntity + 'static>(entities: &[T]) -> ColumnTable {
    let mut table = ColumnTable::new();
    if entities.is_empty() {
        return table;
    }

    for field in T::fields() {
        let values = entities
            .iter()
            .map(|entity| (field.read)(entity).unwrap_or(Value::Null))
            .collect();
        table.insert(field.name.to_string(), values);
    }
    table
}

/// Rebuilds entities from a column table.
///
/// Row count and null padding follow [`crate::table::untranspose`]. A row
/// whose assignment fails (unknown column or incompatible value) is dropped,
/// logged, and reported in [`EntityRows::failures`]; remaining rows are
/// unaffected.
#[must_use]
pub fn untranspose_entities<T: ColumnarEntity + 'static>(table: &ColumnTable) -> EntityRows<T> {
    let mut result = EntityRows {
        entities: Vec::new(),
        failures: Vec::new(),
    };
    let row_count = table.values().next().map_or(0, Vec::len);

    'rows: for row in 0..row_count {
        let mut entity = T::default();
        for (key, values) in table {
            let value = values.get(row).cloned().unwrap_or(Value::Null);
            let Some(field) = T::fields().iter().find(|field| field.name == key.as_str()) else {
                let error = FieldWriteError::UnknownField { field: key.clone() };
                tracing::warn!(row, %error, "dropping row");
                result.failures.push(RowFailure { row, error });
                continue 'rows;
            };
            if let Err(error) = (field.write)(&mut entity, value) {
                tracing::warn!(row, %error, "dropping row");
                result.failures.push(RowFailure { row, error });
                continue 'rows;
            }
        }
        result.entities.push(entity);
    }
    result
}
