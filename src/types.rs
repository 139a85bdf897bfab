//! In-memory table types.
//!
//! The loader produces a [`DataSet`]: an ordered list of column names ([`Schema`]) plus row-major
//! cells ([`Value`]). Every operation here returns a new [`DataSet`]; the input is left untouched,
//! so each pipeline stage works on its own snapshot.

use std::fmt;

use crate::error::{PipelineError, PipelineResult};

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty cell.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the string slice for [`Value::Utf8`] cells.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Utf8(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric value for [`Value::Int64`] and [`Value::Float64`] cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(i) => Some(*i as f64),
            Value::Float64(f) => Some(*f),
            _ => None,
        }
    }

    /// Short type label used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int64(_) => "integer",
            Value::Float64(_) => "float",
            Value::Bool(_) => "bool",
            Value::Utf8(_) => "string",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Int64(i) => write!(f, "{i}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Utf8(s) => f.write_str(s),
        }
    }
}

/// Ordered column names describing the shape of a [`DataSet`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    pub columns: Vec<String>,
}

impl Schema {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Iterate column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    /// Returns the index of a column by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Like [`Schema::index_of`], but a missing column is a schema error.
    pub fn require(&self, name: &str) -> PipelineResult<usize> {
        self.index_of(name).ok_or_else(|| {
            PipelineError::schema(format!(
                "column '{name}' does not exist. columns={:?}",
                self.columns
            ))
        })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] columns.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.schema.len()
    }

    /// Cell at `row` in column `column`, if both exist.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.schema.index_of(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// All cells of `column`, top to bottom.
    pub fn column_values(&self, column: &str) -> PipelineResult<Vec<&Value>> {
        let idx = self.schema.require(column)?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(idx).unwrap_or(&Value::Null))
            .collect())
    }

    /// Create a new dataset containing only rows that match `predicate`.
    ///
    /// Surviving rows keep their relative order.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Create a new dataset by applying `mapper` to every cell.
    pub fn map_values<F>(&self, mut mapper: F) -> Self
    where
        F: FnMut(&Value) -> Value,
    {
        let rows = self
            .rows
            .iter()
            .map(|row| row.iter().map(&mut mapper).collect())
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Returns a dataset without `columns`.
    ///
    /// Every listed column must exist. Missing ones are reported together as a schema error and
    /// nothing is dropped.
    pub fn drop_columns<S: AsRef<str>>(&self, columns: &[S]) -> PipelineResult<Self> {
        let missing: Vec<&str> = columns
            .iter()
            .map(|c| c.as_ref())
            .filter(|c| !self.schema.contains(c))
            .collect();
        if !missing.is_empty() {
            return Err(PipelineError::schema(format!(
                "columns not found: {}",
                missing.join(", ")
            )));
        }

        let keep: Vec<usize> = self
            .schema
            .columns
            .iter()
            .enumerate()
            .filter(|(_, name)| !columns.iter().any(|c| c.as_ref() == name.as_str()))
            .map(|(idx, _)| idx)
            .collect();

        let schema = Schema::new(keep.iter().map(|&i| self.schema.columns[i].clone()));
        let rows = self
            .rows
            .iter()
            .map(|row| {
                keep.iter()
                    .map(|&i| row.get(i).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();
        Ok(Self { schema, rows })
    }

    /// Returns a dataset with `values` appended as a new trailing column.
    pub fn with_column(&self, name: &str, values: Vec<Value>) -> PipelineResult<Self> {
        if self.schema.contains(name) {
            return Err(PipelineError::schema(format!("column '{name}' already exists")));
        }
        if values.len() != self.row_count() {
            return Err(PipelineError::schema(format!(
                "column '{name}' has {} values but the dataset has {} rows",
                values.len(),
                self.row_count()
            )));
        }

        let mut schema = self.schema.clone();
        schema.columns.push(name.to_string());
        let rows = self
            .rows
            .iter()
            .zip(values)
            .map(|(row, v)| {
                let mut out = row.clone();
                out.push(v);
                out
            })
            .collect();
        Ok(Self { schema, rows })
    }
}
