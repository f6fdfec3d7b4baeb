use crate::traits::CSVWrite;
use anyhow::Result;
use csv::{Writer, WriterBuilder};
use serde::Serialize;
use std::io::{self, Stdout, Write};

/// Writes table rows as CSV, with a header line taken from the row's fields.
pub struct CsvTableWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> CsvTableWriter<W> {
    pub fn new(sink: W) -> Self {
        CsvTableWriter {
            writer: WriterBuilder::new().from_writer(sink),
        }
    }

    /// Flushes and hands back the underlying sink.
    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(|err| anyhow::anyhow!(err.to_string()))
    }
}

impl CsvTableWriter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> CSVWrite for CsvTableWriter<W> {
    fn write_record<T: Serialize>(&mut self, record: &T) -> Result<()> {
        Ok(self.writer.serialize(record)?)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(self.writer.flush()?)
    }
}
