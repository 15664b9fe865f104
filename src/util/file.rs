use crate::error::{BundleError, BundleResult};
use std::path::Path;
use tokio::fs as async_fs;
use tracing::debug;

/// Remove everything inside `dir` but keep the directory itself. A missing
/// directory counts as already clean. Returns the number of removed entries.
pub async fn clean_dir(dir: &Path) -> Result<usize, std::io::Error> {
    let mut read_dir = match async_fs::read_dir(dir).await {
        Ok(read_dir) => read_dir,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("Nothing to clean in {:?}", dir);
            return Ok(0);
        }
        Err(e) => return Err(e),
    };

    let mut removed = 0;
    while let Some(entry) = read_dir.next_entry().await? {
        let path = entry.path();
        if entry.file_type().await?.is_dir() {
            async_fs::remove_dir_all(&path).await?;
        } else {
            async_fs::remove_file(&path).await?;
        }
        debug!("Removed {:?}", path);
        removed += 1;
    }

    Ok(removed)
}

/// Write a bundle, creating missing parent directories
pub async fn write_artifact(path: &Path, contents: &[u8]) -> BundleResult<()> {
    let to_write_error = |source| BundleError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        async_fs::create_dir_all(parent)
            .await
            .map_err(to_write_error)?;
    }

    async_fs::write(path, contents).await.map_err(to_write_error)?;
    debug!("Wrote {} bytes to {:?}", contents.len(), path);
    Ok(())
}
