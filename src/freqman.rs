//! Frequency database.
//!
//! A database is a list of named frequencies, stored as text with one entry
//! per line:
//!
//! ```text
//! f=145500000,d=Calling channel
//! ```
//!
//! Errors stay on the control plane; callers report them to the user and let
//! them retry.

use std::collections::BTreeMap;
use std::io::{self, BufRead, BufReader, Read, Write};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FreqmanError {
    #[error("frequency database could not be accessed")]
    Access(#[from] io::Error),

    #[error("no frequency databases available")]
    NoFiles,

    #[error("{0} Hz is already in the database")]
    Duplicate(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreqmanEntry {
    /// Frequency in Hz.
    pub value: u64,
    /// Display form, MHz with four decimals.
    pub frequency_str: String,
    pub description: String,
}

impl FreqmanEntry {
    /// Line breaks in `description` become spaces; an entry is one line on disk.
    pub fn new(value: u64, description: impl Into<String>) -> Self {
        Self {
            value,
            frequency_str: format_mhz(value),
            description: single_line(&description.into()),
        }
    }

    /// One-line label for list views, cut to `max_len` characters.
    pub fn item_string(&self, max_len: usize) -> String {
        let label = if self.description.is_empty() {
            self.frequency_str.clone()
        } else {
            format!("{}: {}", self.frequency_str, self.description)
        };
        label.chars().take(max_len).collect()
    }
}

fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

fn format_mhz(hz: u64) -> String {
    format!("{}.{:04}", hz / 1_000_000, (hz % 1_000_000) / 100)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreqmanDb {
    pub entries: Vec<FreqmanEntry>,
}

impl FreqmanDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry; a frequency may appear only once.
    pub fn insert(&mut self, entry: FreqmanEntry) -> Result<(), FreqmanError> {
        if self.entries.iter().any(|e| e.value == entry.value) {
            return Err(FreqmanError::Duplicate(entry.value));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Parse a database. Lines without a valid `f=` field are skipped.
    pub fn load<R: Read>(reader: R) -> Result<Self, FreqmanError> {
        let mut db = Self::new();
        for line in BufReader::new(reader).lines() {
            let line = line?;
            let Some(entry) = parse_line(&line) else {
                log::debug!("skipping freqman line {:?}", line);
                continue;
            };
            if let Err(FreqmanError::Duplicate(hz)) = db.insert(entry) {
                log::warn!("duplicate frequency {} Hz ignored", hz);
            }
        }
        Ok(db)
    }

    pub fn save<W: Write>(&self, mut writer: W) -> Result<(), FreqmanError> {
        for entry in &self.entries {
            writeln!(writer, "f={},d={}", entry.value, single_line(&entry.description))?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Fields are comma separated; `d=` runs to the end of the line, so a
/// description may itself contain commas.
fn parse_line(line: &str) -> Option<FreqmanEntry> {
    let mut value = None;
    let mut description = "";
    let mut rest = line.trim_end_matches('\r').trim_start();

    while !rest.is_empty() {
        if let Some(d) = rest.strip_prefix("d=") {
            description = d;
            break;
        }
        let (field, tail) = rest.split_once(',').unwrap_or((rest, ""));
        if let Some(v) = field.strip_prefix("f=") {
            value = v.trim().parse::<u64>().ok();
        }
        rest = tail;
    }

    value.map(|v| FreqmanEntry::new(v, description))
}

/// Named databases available to the UI.
#[derive(Debug, Default)]
pub struct FreqmanLibrary {
    databases: BTreeMap<String, FreqmanDb>,
}

impl FreqmanLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<R: Read>(&mut self, stem: &str, reader: R) -> Result<&FreqmanDb, FreqmanError> {
        let db = FreqmanDb::load(reader)?;
        log::info!("loaded freqman {:?}: {} entries", stem, db.entries.len());
        let slot = self.databases.entry(stem.to_string()).or_default();
        *slot = db;
        Ok(slot)
    }

    /// Database names, sorted. Fails with `NoFiles` when nothing is loaded.
    pub fn stems(&self) -> Result<Vec<&str>, FreqmanError> {
        if self.databases.is_empty() {
            return Err(FreqmanError::NoFiles);
        }
        Ok(self.databases.keys().map(String::as_str).collect())
    }

    pub fn get(&self, stem: &str) -> Option<&FreqmanDb> {
        self.databases.get(stem)
    }

    pub fn get_mut(&mut self, stem: &str) -> Option<&mut FreqmanDb> {
        self.databases.get_mut(stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "f=145500000,d=Calling\nf=433920000,d=ISM\ngarbage\nf=145500000,d=Again\n";

    #[test]
    fn test_load_skips_bad_and_duplicate_lines() {
        let db = FreqmanDb::load(SAMPLE.as_bytes()).unwrap();
        assert_eq!(db.entries.len(), 2);
        assert_eq!(db.entries[0].frequency_str, "145.5000");
        assert_eq!(db.entries[1].description, "ISM");
    }

    #[test]
    fn test_save_then_load() {
        let db = FreqmanDb::load(SAMPLE.as_bytes()).unwrap();
        let mut out = Vec::new();
        db.save(&mut out).unwrap();
        assert_eq!(String::from_utf8(out.clone()).unwrap(), "f=145500000,d=Calling\nf=433920000,d=ISM\n");
        assert_eq!(FreqmanDb::load(out.as_slice()).unwrap(), db);
    }

    #[test]
    fn test_description_keeps_commas() {
        let mut db = FreqmanDb::new();
        db.insert(FreqmanEntry::new(145_500_000, "Repeater, north")).unwrap();
        db.insert(FreqmanEntry::new(433_920_000, "d=odd,f=1")).unwrap();

        let mut out = Vec::new();
        db.save(&mut out).unwrap();
        assert_eq!(FreqmanDb::load(out.as_slice()).unwrap(), db);
    }

    #[test]
    fn test_line_breaks_do_not_split_entries() {
        let mut db = FreqmanDb::new();
        db.insert(FreqmanEntry::new(100_000_000, "two\nlines")).unwrap();
        db.entries.push(FreqmanEntry {
            value: 200_000_000,
            frequency_str: "200.0000".into(),
            description: "raw\r\nbreak".into(),
        });

        let mut out = Vec::new();
        db.save(&mut out).unwrap();
        let back = FreqmanDb::load(out.as_slice()).unwrap();
        assert_eq!(back.entries.len(), 2);
        assert_eq!(back.entries[0].description, "two lines");
        assert_eq!(back.entries[1].description, "raw  break");
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut db = FreqmanDb::new();
        db.insert(FreqmanEntry::new(100_000_000, "a")).unwrap();
        assert!(matches!(
            db.insert(FreqmanEntry::new(100_000_000, "b")),
            Err(FreqmanError::Duplicate(100_000_000))
        ));
    }

    #[test]
    fn test_item_string_truncates() {
        let entry = FreqmanEntry::new(446_006_250, "PMR channel 1");
        assert_eq!(entry.item_string(64), "446.0062: PMR channel 1");
        assert_eq!(entry.item_string(8), "446.0062");
    }

    #[test]
    fn test_library_reports_no_files() {
        let mut library = FreqmanLibrary::new();
        assert!(matches!(library.stems(), Err(FreqmanError::NoFiles)));

        library.load("pmr", "f=446006250,d=PMR1\n".as_bytes()).unwrap();
        assert_eq!(library.stems().unwrap(), vec!["pmr"]);
        assert_eq!(library.get("pmr").unwrap().entries.len(), 1);
    }

    #[test]
    fn test_read_failure_is_access_error() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
            }
        }
        assert!(matches!(FreqmanDb::load(Broken), Err(FreqmanError::Access(_))));
    }
}
