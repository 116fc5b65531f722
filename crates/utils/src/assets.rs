use std::{io, path::PathBuf};

use directories::ProjectDirs;

pub const ASSETS_DIR_ENV: &str = "LEGAL_NEXUS_ASSETS_DIR";

pub fn asset_dir() -> io::Result<PathBuf> {
    if let Ok(custom) = std::env::var(ASSETS_DIR_ENV) {
        let custom_path = PathBuf::from(custom);
        if !custom_path.exists() {
            std::fs::create_dir_all(&custom_path)?;
        }
        return Ok(custom_path);
    }

    let path = ProjectDirs::from("com", "legalnexus", "legal-nexus")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory available"))?;

    if !path.exists() {
        std::fs::create_dir_all(&path)?;
    }

    Ok(path)
}

pub fn config_path() -> io::Result<PathBuf> {
    Ok(asset_dir()?.join("prioritization.json"))
}
