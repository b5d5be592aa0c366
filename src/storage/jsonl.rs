//! JSONL (JSON Lines) storage.
//!
//! Each line is a valid JSON object representing one record. Used for replay
//! scripts (one command per line) and for machine-readable reports.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use super::StorageError;

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Write records, replacing the entire file.
    pub fn write_all(&self, records: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        let count = write_jsonl(&mut writer, records)?;
        writer.flush()?;

        info!("Wrote {} records to {:?}", count, self.path);
        Ok(count)
    }
}

/// Write records as JSON lines to any sink.
pub fn write_jsonl<W: Write, T: Serialize>(
    mut writer: W,
    records: &[T],
) -> Result<usize, StorageError> {
    let mut count = 0;
    for record in records {
        let json = serde_json::to_string(record).map_err(|source| StorageError::Json {
            line: count + 1,
            source,
        })?;
        writeln!(writer, "{}", json)?;
        count += 1;
    }
    Ok(count)
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create an iterator over the file, yielding `(line number, record)`.
    pub fn iter(&self) -> Result<JsonlIterator<T>, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::PathNotFound(self.path.clone()));
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        debug!("Reading records from {:?}", self.path);

        Ok(JsonlIterator {
            reader,
            line_num: 0,
            _marker: PhantomData,
        })
    }
}

/// Iterator over JSONL file entries.
pub struct JsonlIterator<T> {
    reader: BufReader<File>,
    line_num: usize,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> Iterator for JsonlIterator<T> {
    type Item = Result<(usize, T), StorageError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();

        loop {
            line.clear();
            self.line_num += 1;
            match self.reader.read_line(&mut line) {
                Ok(0) => return None, // EOF
                Ok(_) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() || trimmed.starts_with("//") {
                        continue;
                    }
                    let line_num = self.line_num;
                    return Some(
                        serde_json::from_str(trimmed)
                            .map(|record| (line_num, record))
                            .map_err(|source| StorageError::Json {
                                line: line_num,
                                source,
                            }),
                    );
                }
                Err(e) => return Some(Err(StorageError::Io(e))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestRecord {
        id: i32,
        name: String,
    }

    fn records() -> Vec<TestRecord> {
        vec![
            TestRecord {
                id: 1,
                name: "First".to_string(),
            },
            TestRecord {
                id: 2,
                name: "Second".to_string(),
            },
        ]
    }

    #[test]
    fn test_jsonl_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("test.jsonl");

        let writer: JsonlWriter<TestRecord> = JsonlWriter::new(path.clone());
        assert_eq!(writer.write_all(&records()).unwrap(), 2);

        let reader: JsonlReader<TestRecord> = JsonlReader::new(path);
        let read: Vec<TestRecord> = reader
            .iter()
            .unwrap()
            .map(|entry| entry.unwrap().1)
            .collect();
        assert_eq!(read, records());
    }

    #[test]
    fn test_jsonl_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let reader: JsonlReader<TestRecord> =
            JsonlReader::new(temp_dir.path().join("nonexistent.jsonl"));

        assert!(matches!(reader.iter(), Err(StorageError::PathNotFound(_))));
    }

    #[test]
    fn test_jsonl_iter_reports_line_numbers() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lines.jsonl");
        fs::write(
            &path,
            "{\"id\":1,\"name\":\"a\"}\n\n// comment\nnot json\n{\"id\":2,\"name\":\"b\"}\n",
        )
        .unwrap();

        let reader: JsonlReader<TestRecord> = JsonlReader::new(path);
        let entries: Vec<_> = reader.iter().unwrap().collect();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].as_ref().unwrap().0, 1);
        assert!(matches!(
            entries[1],
            Err(StorageError::Json { line: 4, .. })
        ));
        assert_eq!(entries[2].as_ref().unwrap().0, 5);
    }

    #[test]
    fn test_write_jsonl_to_buffer() {
        let mut buffer = Vec::new();
        let count = write_jsonl(&mut buffer, &records()).unwrap();
        assert_eq!(count, 2);

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "{\"id\":1,\"name\":\"First\"}\n{\"id\":2,\"name\":\"Second\"}\n"
        );
    }
}
