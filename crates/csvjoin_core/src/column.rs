use crate::scalar::{DataType, ScalarValue};

/// A named sequence of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<ScalarValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = ScalarValue>) -> Self {
        Column {
            name: name.into(),
            values: values.into_iter().collect(),
        }
    }

    /// Create a column containing only nulls.
    pub fn new_null(name: impl Into<String>, len: usize) -> Self {
        Column {
            name: name.into(),
            values: vec![ScalarValue::Null; len],
        }
    }

    /// Create a column from anything convertible into scalars, mostly useful
    /// for tests.
    pub fn from_values<T>(name: impl Into<String>, values: impl IntoIterator<Item = T>) -> Self
    where
        T: Into<ScalarValue>,
    {
        Self::new(name, values.into_iter().map(Into::into))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[ScalarValue] {
        &self.values
    }

    pub fn get(&self, idx: usize) -> Option<&ScalarValue> {
        self.values.get(idx)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Widest type across all non-null values.
    pub fn datatype(&self) -> DataType {
        self.values
            .iter()
            .map(|v| v.datatype())
            .max()
            .unwrap_or(DataType::Null)
    }

    /// Create a new column from the values at `indices`.
    ///
    /// Indices must be in bounds.
    pub fn take(&self, indices: &[usize]) -> Column {
        Column {
            name: self.name.clone(),
            values: indices.iter().map(|&idx| self.values[idx].clone()).collect(),
        }
    }

    /// Like `take`, but a `None` index produces a null.
    pub fn take_optional(&self, indices: &[Option<usize>]) -> Column {
        let values = indices
            .iter()
            .map(|idx| match idx {
                Some(idx) => self.values[*idx].clone(),
                None => ScalarValue::Null,
            })
            .collect();

        Column {
            name: self.name.clone(),
            values,
        }
    }

    /// Empty column with the same name.
    pub fn empty_like(&self) -> Column {
        Column {
            name: self.name.clone(),
            values: Vec::new(),
        }
    }
}
