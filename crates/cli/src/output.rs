use crate::error::CliError;
use serde::Serialize;
use std::{
    fs::File,
    io::{BufWriter, Write},
};

/// Writes records as newline-delimited JSON.
pub struct RecordWriter {
    out: BufWriter<Box<dyn Write>>,
    written: u64,
}

impl RecordWriter {
    pub fn new(out: Box<dyn Write>) -> Self {
        Self {
            out: BufWriter::new(out),
            written: 0,
        }
    }

    /// Writer targeting `path`, or stdout when no path is given.
    pub fn open(path: Option<&str>) -> Result<Self, CliError> {
        let out: Box<dyn Write> = match path {
            Some(path) => Box::new(File::create(path)?),
            None => Box::new(std::io::stdout()),
        };
        Ok(Self::new(out))
    }

    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<(), CliError> {
        serde_json::to_writer(&mut self.out, record)?;
        self.out.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn finish(mut self) -> Result<u64, CliError> {
        self.out.flush()?;
        Ok(self.written)
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
