use crate::domain::ports::ImageRef;
use crate::utils::error::Result;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Upload bytes written to a temp file. The file is deleted when this value is dropped.
#[derive(Debug)]
pub struct StagedUpload {
    file: NamedTempFile,
    mime_type: String,
    size: usize,
}

impl StagedUpload {
    /// 檔案建立與寫入在 blocking 執行緒上進行
    pub async fn stage(dir: &Path, bytes: Vec<u8>, mime_type: &str) -> Result<Self> {
        let dir = dir.to_path_buf();
        let size = bytes.len();
        let file = tokio::task::spawn_blocking(move || write_temp(&dir, &bytes))
            .await
            .map_err(std::io::Error::other)??;

        tracing::debug!("Staged {} bytes at {}", size, file.path().display());

        Ok(Self {
            file,
            mime_type: mime_type.to_string(),
            size,
        })
    }

    pub fn image(&self) -> ImageRef<'_> {
        ImageRef {
            path: self.file.path(),
            mime_type: &self.mime_type,
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

fn write_temp(dir: &Path, bytes: &[u8]) -> std::io::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("eco-upload-")
        .tempfile_in(dir)?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}
