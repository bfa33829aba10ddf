use crate::model::Planner;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge l'état du planner depuis un support.
    fn load(&self) -> anyhow::Result<Planner>;
    /// Sauvegarde de manière atomique.
    fn save(&self, planner: &Planner) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self { path: path.as_ref().to_path_buf() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// État vide si le fichier n'existe pas encore ; un fichier corrompu
    /// reste une erreur.
    pub fn load_or_init(&self) -> anyhow::Result<Planner> {
        if !self.path.exists() {
            return Ok(Planner::default());
        }
        self.load()
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Planner> {
        let data = fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let planner: Planner = serde_json::from_slice(&data).with_context(|| "parsing planner.json")?;
        Ok(planner)
    }

    fn save(&self, planner: &Planner) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(planner)?;
        let mut tmp = NamedTempFile::new_in(
            self.path.parent().unwrap_or_else(|| Path::new(".")))
            .with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}
