use anyhow::{anyhow, Result};
use arrow::{
    array::{ArrayRef, BooleanArray, Float64Array, Int32Array, StringArray},
    compute::filter_record_batch,
    record_batch::RecordBatch,
};

/// An immutable, loaded trip table. Filtering produces a new frame; rows are
/// never mutated in place.
#[derive(Debug, Clone)]
pub struct TripFrame {
    batch: RecordBatch,
}

impl TripFrame {
    pub fn new(batch: RecordBatch) -> Self {
        Self { batch }
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.batch.column_by_name(name).is_some()
    }

    fn column(&self, name: &str) -> Result<&ArrayRef> {
        self.batch
            .column_by_name(name)
            .ok_or_else(|| anyhow!("missing column {:?}", name))
    }

    pub fn utf8(&self, name: &str) -> Result<&StringArray> {
        self.column(name)?
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| anyhow!("column {:?} is not a string column", name))
    }

    pub fn f64(&self, name: &str) -> Result<&Float64Array> {
        self.column(name)?
            .as_any()
            .downcast_ref::<Float64Array>()
            .ok_or_else(|| anyhow!("column {:?} is not a float column", name))
    }

    pub fn i32(&self, name: &str) -> Result<&Int32Array> {
        self.column(name)?
            .as_any()
            .downcast_ref::<Int32Array>()
            .ok_or_else(|| anyhow!("column {:?} is not an int column", name))
    }

    /// Keep only the rows where the named string column equals `value`.
    /// Null cells never match.
    pub fn filter_eq(&self, name: &str, value: &str) -> Result<Self> {
        let col = self.utf8(name)?;
        let mask: BooleanArray = col.iter().map(|v| Some(v == Some(value))).collect();
        let filtered = filter_record_batch(&self.batch, &mask)?;
        Ok(Self::new(filtered))
    }
}
