//! Delimited-text sink for leaf records and raw list items.

use anyhow::{Context, Result, anyhow};
use std::io::Write;

use crate::types::{Item, LeafRecord};

const HEADER: [&str; 2] = ["id", "name"];

/// CSV writer with a configurable delimiter. Buffered; `csv` flushes on drop as well.
pub struct RecordWriter<W: Write> {
    inner: csv::Writer<W>,
    written: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(writer: W, delimiter: u8, header: bool) -> Result<Self> {
        let mut inner = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .from_writer(writer);
        if header {
            inner.write_record(HEADER).context("write header")?;
        }
        Ok(Self { inner, written: 0 })
    }

    /// `id_str,name`.
    pub fn write_leaf(&mut self, leaf: &LeafRecord) -> Result<()> {
        self.inner
            .write_record([leaf.id_str.as_str(), leaf.name.as_str()])
            .context("write record")?;
        self.written += 1;
        Ok(())
    }

    /// `id,name` for a list item.
    pub fn write_item(&mut self, item: &Item) -> Result<()> {
        let id = item.id.to_string();
        self.inner
            .write_record([id.as_str(), item.name.as_str()])
            .context("write record")?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush().context("flush output")
    }

    pub fn into_inner(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|e| anyhow!("flush output: {}", e.error()))
    }
}
