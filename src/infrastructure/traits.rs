//! Filesystem boundary used by the export services

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};
use tracing::trace;

/// File access needed to read a hierarchy CSV and write one output file.
pub trait FileSystem: Send + Sync {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Replace `path` with `content`. A failed write leaves any previous file intact.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    fn is_file(&self, path: &Path) -> bool;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create the directory an output file goes into.
    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => self.create_dir_all(dir),
            _ => Ok(()),
        }
    }
}

/// Local disk. Writes go through a temp file next to the target and a rename.
///
/// The result looks like a plain create: new files get `0o666` minus the umask,
/// an existing file keeps its mode, and a symlinked output is written through.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl RealFileSystem {
    /// The file a write to `path` should replace.
    fn write_target(path: &Path) -> io::Result<PathBuf> {
        match fs::symlink_metadata(path) {
            Ok(meta) if meta.file_type().is_symlink() => {
                let link = fs::read_link(path)?;
                Ok(match path.parent() {
                    Some(dir) if link.is_relative() => dir.join(link),
                    _ => link,
                })
            }
            _ => Ok(path.to_path_buf()),
        }
    }

    #[cfg(unix)]
    fn staging_file(dir: &Path) -> io::Result<NamedTempFile> {
        use std::os::unix::fs::PermissionsExt;
        // open(2) applies the umask to this mode
        Builder::new()
            .prefix(".divid")
            .permissions(fs::Permissions::from_mode(0o666))
            .tempfile_in(dir)
    }

    #[cfg(not(unix))]
    fn staging_file(dir: &Path) -> io::Result<NamedTempFile> {
        Builder::new().prefix(".divid").tempfile_in(dir)
    }
}

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        let target = Self::write_target(path)?;
        let dir = match target.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let existing = fs::metadata(&target).ok().map(|meta| meta.permissions());

        let mut staged = Self::staging_file(dir)?;
        staged.write_all(content.as_bytes())?;
        staged.as_file().sync_all()?;
        if let Some(permissions) = existing {
            fs::set_permissions(staged.path(), permissions)?;
        }
        trace!("persisting {} -> {}", staged.path().display(), target.display());
        staged.persist(&target).map_err(|e| e.error)?;
        Ok(())
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }
}
