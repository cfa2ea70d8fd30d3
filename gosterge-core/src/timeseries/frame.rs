use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

use crate::{Field, GostergeError, ObservationTable};

/// One named column of an [`AlignedFrame`].
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Provider symbol or derived key (e.g. `GC=FxTRY=X`).
    pub key: String,
    /// One slot per index row; `None` marks a missing value.
    pub values: Vec<Option<f64>>,
}

/// Wide table sharing one sorted timestamp index across all columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlignedFrame {
    index: Vec<DateTime<Utc>>,
    columns: Vec<Column>,
}

impl AlignedFrame {
    /// Build a frame from parts.
    ///
    /// # Errors
    /// Returns `GostergeError::Data` if a column length differs from the index
    /// length or the index is not strictly increasing.
    pub fn from_parts(
        index: Vec<DateTime<Utc>>,
        columns: Vec<Column>,
    ) -> Result<Self, GostergeError> {
        if index.windows(2).any(|w| w[0] >= w[1]) {
            return Err(GostergeError::Data(
                "frame index must be strictly increasing".into(),
            ));
        }
        if let Some(bad) = columns.iter().find(|c| c.values.len() != index.len()) {
            return Err(GostergeError::Data(format!(
                "column {} has {} values for {} rows",
                bad.key,
                bad.values.len(),
                index.len()
            )));
        }
        Ok(Self { index, columns })
    }

    /// Outer-join the `field` column of each symbol on timestamp.
    ///
    /// Symbols missing from the table become all-missing columns. The index is
    /// the union of the selected symbols' timestamps; a duplicated timestamp
    /// within one symbol keeps its last bar.
    #[must_use]
    pub fn select(table: &ObservationTable, field: Field, symbols: &[&str]) -> Self {
        let index: Vec<DateTime<Utc>> = symbols
            .iter()
            .filter_map(|s| table.series(s))
            .flatten()
            .map(|o| o.ts)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let columns = symbols
            .iter()
            .map(|&symbol| {
                let by_ts: BTreeMap<DateTime<Utc>, Option<f64>> = table
                    .series(symbol)
                    .unwrap_or_default()
                    .iter()
                    .map(|o| (o.ts, o.value(field)))
                    .collect();
                Column {
                    key: symbol.to_string(),
                    values: index
                        .iter()
                        .map(|ts| by_ts.get(ts).copied().flatten())
                        .collect(),
                }
            })
            .collect();

        Self { index, columns }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True when there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Row timestamps.
    #[must_use]
    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    /// All columns in their current order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column by key.
    #[must_use]
    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub(crate) fn into_parts(self) -> (Vec<DateTime<Utc>>, Vec<Column>) {
        (self.index, self.columns)
    }

    /// Remove every row holding a missing or non-finite value in any column.
    #[must_use]
    pub fn drop_incomplete(self) -> Self {
        let keep: Vec<bool> = (0..self.index.len())
            .map(|row| {
                self.columns
                    .iter()
                    .all(|c| c.values[row].is_some_and(f64::is_finite))
            })
            .collect();
        let retain = |values: Vec<Option<f64>>| -> Vec<Option<f64>> {
            values
                .into_iter()
                .zip(&keep)
                .filter_map(|(v, &k)| k.then_some(v))
                .collect()
        };
        let index = self
            .index
            .into_iter()
            .zip(&keep)
            .filter_map(|(ts, &k)| k.then_some(ts))
            .collect();
        let columns = self
            .columns
            .into_iter()
            .map(|c| Column {
                key: c.key,
                values: retain(c.values),
            })
            .collect();
        Self { index, columns }
    }

    /// Add `key` as the row-wise product of columns `left` and `right`.
    ///
    /// # Errors
    /// Returns `GostergeError::Data` if either operand column is absent.
    pub fn derive_product(
        &mut self,
        key: impl Into<String>,
        left: &str,
        right: &str,
    ) -> Result<(), GostergeError> {
        let missing = |k: &str| GostergeError::Data(format!("column {k} is not in the frame"));
        let l = self.column(left).ok_or_else(|| missing(left))?;
        let r = self.column(right).ok_or_else(|| missing(right))?;
        let values = l
            .values
            .iter()
            .zip(&r.values)
            .map(|(a, b)| Some((*a)? * (*b)?))
            .collect();
        let key = key.into();
        self.columns.retain(|c| c.key != key);
        self.columns.push(Column { key, values });
        Ok(())
    }

    /// Keep only the listed columns, in the listed order.
    ///
    /// # Errors
    /// Returns `GostergeError::Data` if a listed column is absent.
    pub fn retain_columns(&mut self, keys: &[String]) -> Result<(), GostergeError> {
        let mut picked = Vec::with_capacity(keys.len());
        for key in keys {
            let pos = self
                .columns
                .iter()
                .position(|c| &c.key == key)
                .ok_or_else(|| GostergeError::Data(format!("column {key} is not in the frame")))?;
            picked.push(self.columns.swap_remove(pos));
        }
        self.columns = picked;
        Ok(())
    }

    /// Divide every column by its own first-row value.
    ///
    /// # Errors
    /// Returns `GostergeError::Data` if a first-row value is missing, zero or
    /// not finite.
    pub fn normalize(&mut self) -> Result<(), GostergeError> {
        if self.index.is_empty() {
            return Ok(());
        }
        for col in &mut self.columns {
            let base = col.values[0]
                .filter(|b| b.is_finite() && *b != 0.0)
                .ok_or_else(|| {
                    GostergeError::Data(format!("column {} has no usable baseline", col.key))
                })?;
            for v in col.values.iter_mut().flatten() {
                *v /= base;
            }
        }
        Ok(())
    }
}
