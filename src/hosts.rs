use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use anyhow::Context;

const FIELD_SEPARATOR: char = '|';

/// A named host entry from the hosts file. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    name: String,
    host: String,
    search_text: String,
}

impl Record {
    pub fn new(name: impl Into<String>, host: impl Into<String>) -> Self {
        let name = name.into();
        let host = host.into();
        let search_text = format!("{} {}", name, host).to_lowercase();
        Self {
            name,
            host,
            search_text,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Lowercased `"<name> <host>"`, matched against the select box filter.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    // `needle` must already be lowercase
    pub(crate) fn matches_query(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.host.to_lowercase().contains(needle)
    }

    // `needle` must already be lowercase
    pub(crate) fn matches_filter(&self, needle: &str) -> bool {
        self.search_text.contains(needle)
    }
}

/// Parses `name | host` lines. Lines without a separator are skipped and
/// anything after the second field is ignored.
pub fn parse_records<R: BufRead>(reader: R) -> io::Result<Vec<Record>> {
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let mut fields = line.split(FIELD_SEPARATOR);
        if let (Some(name), Some(host)) = (fields.next(), fields.next()) {
            records.push(Record::new(name.trim(), host.trim()));
        }
    }

    Result::Ok(records)
}

pub fn load_records<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Record>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("failed to open hosts file {:?}", path))?;
    let records = parse_records(BufReader::new(file))
        .with_context(|| format!("failed to read hosts file {:?}", path))?;

    Ok(records)
}
