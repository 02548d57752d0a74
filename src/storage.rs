use crate::model::SwapRequest;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge les demandes d'échange ; un fichier absent donne une liste vide.
    fn load(&self) -> anyhow::Result<Vec<SwapRequest>>;
    /// Réécrit la collection complète.
    fn save(&self, requests: &[SwapRequest]) -> anyhow::Result<()>;
}

/// Contenu du fichier de données (seules les demandes sont persistées).
#[derive(Debug, Serialize, Deserialize)]
pub struct SwapFile {
    #[serde(default)]
    pub swap_requests: Vec<SwapRequest>,
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
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Vec<SwapRequest>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no data file yet, starting empty");
                return Ok(Vec::new());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("reading {}", self.path.display()))
            }
        };
        let file: SwapFile = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        tracing::debug!(count = file.swap_requests.len(), "swap requests loaded");
        Ok(file.swap_requests)
    }

    /// Écriture atomique : fichier temporaire dans le même dossier puis rename.
    fn save(&self, requests: &[SwapRequest]) -> anyhow::Result<()> {
        #[derive(Serialize)]
        struct SwapFileRef<'a> {
            swap_requests: &'a [SwapRequest],
        }

        let json = serde_json::to_vec_pretty(&SwapFileRef { swap_requests: requests })?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        tracing::debug!(count = requests.len(), path = %self.path.display(), "swap requests saved");
        Ok(())
    }
}
