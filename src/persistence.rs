//! JSON save files under `~/.viper/`.
//!
//! Loads fall back to defaults on any failure, so a missing or mangled
//! save file never breaks a running game. Saves go through a temp file
//! and a rename, so a crash mid-write cannot truncate an existing save.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::PathBuf;

const DATA_DIR: &str = ".viper";
const TMP_EXTENSION: &str = "json.tmp";

/// Resolve `filename` inside the save directory, creating the directory
/// on first use.
pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    let dir = dirs::home_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?
        .join(DATA_DIR);
    fs::create_dir_all(&dir)?;
    Ok(dir.join(filename))
}

/// Read and deserialize a save file; any failure yields `T::default()`.
pub fn load_json_or_default<T: Default + DeserializeOwned>(filename: &str) -> T {
    save_path(filename)
        .and_then(fs::read_to_string)
        .ok()
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or_default()
}

/// Serialize and write a save file atomically (temp file + rename).
pub fn save_json<T: Serialize>(filename: &str, data: &T) -> io::Result<()> {
    let path = save_path(filename)?;
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let tmp = path.with_extension(TMP_EXTENSION);
    fs::write(&tmp, json)?;
    fs::rename(&tmp, &path)
}
