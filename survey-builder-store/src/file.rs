use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::{KeyValueStore, StoreError};

const EXTENSION: &str = "json";

/// A store keeping one `<key>.json` file per entry in a directory.
///
/// Keys may hold any text. ASCII letters, digits, `-` and `_` are kept in the
/// file name as they are; every other byte is written as `%` plus two hex
/// digits, so `team.lunch` lives in `team%2elunch.json`.
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so readers never see a half-written entry.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir` as the backing directory. It is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The backing directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.{EXTENSION}", encode_key(key))))
    }
}

fn is_plain(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_'
}

fn encode_key(key: &str) -> String {
    let mut name = String::with_capacity(key.len());
    for &byte in key.as_bytes() {
        if is_plain(byte) {
            name.push(char::from(byte));
        } else {
            name.push('%');
            name.push_str(&hex::encode([byte]));
        }
    }
    name
}

/// Inverse of [`encode_key`]. Names this store would not have written give `None`.
fn decode_key(name: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(name.len());
    let mut rest = name.as_bytes();
    while let Some((&byte, tail)) = rest.split_first() {
        if is_plain(byte) {
            bytes.push(byte);
            rest = tail;
        } else if byte == b'%' && tail.len() >= 2 {
            bytes.extend(hex::decode(&tail[..2]).ok()?);
            rest = &tail[2..];
        } else {
            return None;
        }
    }
    let key = String::from_utf8(bytes).ok()?;
    (!key.is_empty() && encode_key(&key) == name).then_some(key)
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::io(path, err)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|err| StoreError::io(&self.dir, err))?;

        let mut file = tempfile::NamedTempFile::new_in(&self.dir)
            .map_err(|err| StoreError::io(&self.dir, err))?;
        file.write_all(value.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|err| StoreError::io(file.path(), err))?;
        file.persist(&path)
            .map_err(|err| StoreError::io(&path, err.error))?;

        tracing::trace!(path = %path.display(), bytes = value.len(), "wrote entry");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(StoreError::io(path, err)),
        }
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::io(&self.dir, err)),
        };

        let mut keys = Vec::new();
        for entry in entries {
            let path = entry.map_err(|err| StoreError::io(&self.dir, err))?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(key) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(decode_key)
            {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}
