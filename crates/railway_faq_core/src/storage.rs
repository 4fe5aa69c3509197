use crate::corpus::FaqCorpus;
use crate::error::Result;
use crate::model::FaqEntry;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

pub fn save_corpus_jsonl(path: &Path, corpus: &FaqCorpus) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    for entry in corpus.entries() {
        let line = serde_json::to_string(entry)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

/// Reads one `{"question": .., "answer": ..}` object per line; blank lines are skipped.
pub fn load_corpus_jsonl(path: &Path) -> Result<FaqCorpus> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut entries = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let entry: FaqEntry = serde_json::from_str(&line)?;
        entries.push(entry);
    }

    tracing::debug!(path = %path.display(), entries = entries.len(), "loaded corpus");
    FaqCorpus::from_entries(entries)
}
