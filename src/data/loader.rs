// ============================================================
// Layer 4 — JSON Loader / Writer
// ============================================================
// Reads the two kinds of input and writes the merged output:
//
//   {input}.json                          → [{uid, document, summary}]
//   {input}_answer_extract_{span}.json    → SQuAD-shaped QA layer
//
// Output is pretty-printed with 4-space indentation.

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::domain::document::CorpusRecord;
use crate::domain::qa_pair::SquadDataset;
use crate::domain::traits::CorpusSource;

/// Loads the document/summary corpus from a JSON array.
pub struct JsonCorpusLoader {
    path: PathBuf,
}

impl JsonCorpusLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Raw corpus bytes, e.g. for hashing before parsing.
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        fs::read(&self.path)
            .with_context(|| format!("Cannot read corpus '{}'", self.path.display()))
    }

    /// Parse records from bytes already read from this loader's file.
    pub fn parse(&self, bytes: &[u8]) -> Result<Vec<CorpusRecord>> {
        let records: Vec<CorpusRecord> = serde_json::from_slice(bytes)
            .with_context(|| format!("Cannot parse JSON in '{}'", self.path.display()))?;
        tracing::info!(
            "Loaded {} documents from '{}'",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}

impl CorpusSource for JsonCorpusLoader {
    fn load_records(&self) -> Result<Vec<CorpusRecord>> {
        self.parse(&self.read_bytes()?)
    }
}

/// Load one span-type QA layer.
pub fn load_layer(path: &Path) -> Result<SquadDataset> {
    let dataset: SquadDataset = read_json(path)?;
    tracing::info!(
        "Loaded {} questions from '{}'",
        dataset.qa_count(),
        path.display()
    );
    Ok(dataset)
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)
        .with_context(|| format!("Cannot open '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Cannot parse JSON in '{}'", path.display()))
}

/// Write `value` as 4-space indented JSON, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create directory '{}'", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Cannot create '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);
    let mut ser = Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut ser)
        .with_context(|| format!("Cannot serialise JSON to '{}'", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Cannot write '{}'", path.display()))?;

    tracing::debug!("Wrote '{}'", path.display());
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_loads_from_json() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        fs::write(
            &path,
            r#"[{"uid": "d1", "document": "text", "summary": ["a.", "b."]}]"#,
        )
        .unwrap();

        let records = JsonCorpusLoader::new(&path).load_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].uid, "d1");
        assert_eq!(records[0].summary, vec!["a.", "b."]);
    }

    #[test]
    fn test_parse_uses_given_bytes() {
        // The file is gone; parsing must not touch the disk again
        let dir    = tempfile::tempdir().unwrap();
        let path   = dir.path().join("corpus.json");
        fs::write(&path, r#"[{"uid": "d2", "document": "", "summary": []}]"#).unwrap();
        let loader = JsonCorpusLoader::new(&path);

        let bytes = loader.read_bytes().unwrap();
        fs::remove_file(&path).unwrap();

        let records = loader.parse(&bytes).unwrap();
        assert_eq!(records[0].uid, "d2");
        assert!(loader.load_records().is_err());
    }

    #[test]
    fn test_layer_written_with_four_space_indent() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");
        let raw  = r#"{"data": [{"paragraphs": [{"context": "abc", "qas": [
            {"id": "d_1", "question": "q", "answers": [{"text": "b", "answer_start": 1}]}
        ]}]}]}"#;
        let ds: SquadDataset = serde_json::from_str(raw).unwrap();

        write_json(&path, &ds).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("{\n    \"data\""));

        let back = load_layer(&path).unwrap();
        assert_eq!(back.qa_count(), 1);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_layer(&dir.path().join("absent.json")).is_err());
    }
}
