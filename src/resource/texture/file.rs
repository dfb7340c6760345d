use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::error::Error;
use crate::resource::texture::dds::DdsTextureSource;

pub struct FileSystemTextureLoader {
    pub path: PathBuf,
}

impl FileSystemTextureLoader {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn load(&self) -> Result<DdsTextureSource> {
        if !self.path.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("The given path is not a file: {}", self.path.display()),
            )
            .into());
        }

        let dds_data = std::fs::read(&self.path)?;

        match DdsTextureSource::from_bytes(&dds_data) {
            Ok(source) => Ok(source),
            Err(error) => Err(Error::new(format!(
                "Failed to load {}: {error}",
                self.path.display()
            ))
            .into()),
        }
    }
}
