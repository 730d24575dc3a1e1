// File: src/persistence.rs
use crate::core::trie::PinyinTrie;
use crate::error::{PinyinError, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

const SNAPSHOT_VERSION: u32 = 1;

/// On-disk form of a built dictionary.
#[derive(serde::Serialize, serde::Deserialize)]
struct Snapshot {
    version: u32,
    trie: PinyinTrie,
}

/// Writes the trie as bincode. The file is replaced atomically.
pub fn save_snapshot(trie: &PinyinTrie, path: &Path) -> Result<()> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let snapshot = Snapshot { version: SNAPSHOT_VERSION, trie: trie.clone() };

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    let mut writer = BufWriter::new(&temp_file);
    bincode::serialize_into(&mut writer, &snapshot)?;
    writer.flush()?;
    drop(writer);

    temp_file.persist(path).map_err(|e| PinyinError::Io(e.error))?;
    Ok(())
}

pub fn load_snapshot(path: &Path) -> Result<PinyinTrie> {
    let reader = BufReader::new(File::open(path)?);
    let snapshot: Snapshot = bincode::deserialize_from(reader)?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(PinyinError::Snapshot(format!(
            "unsupported snapshot version {}",
            snapshot.version
        )));
    }
    snapshot.trie.validate()?;
    Ok(snapshot.trie)
}


/// A well-formed bincode snapshot whose root has an edge `0x41 -> 7` in a
/// one-node arena.
#[cfg(test)]
pub(crate) fn dangling_edge_snapshot() -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
    bytes.extend_from_slice(&1u64.to_le_bytes()); // nodes
    bytes.extend_from_slice(&1u64.to_le_bytes()); // root children
    bytes.extend_from_slice(&0x41u32.to_le_bytes());
    bytes.extend_from_slice(&7u64.to_le_bytes());
    bytes.push(0); // candidates: None
    bytes.push(0); // phrase: None
    bytes.extend_from_slice(&1u64.to_le_bytes()); // single_count
    bytes.extend_from_slice(&0u64.to_le_bytes()); // phrase_count
    bytes
}
