//! File-system access for the generator.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// What currently sits at a destination path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existing {
    Missing,
    Identical,
    Different,
    Directory,
    /// A parent component of the path is a file.
    BlockedParent,
}

/// Compares the destination with the rendered contents without modifying
/// anything.
pub fn inspect(path: &Path, contents: &[u8]) -> io::Result<Existing> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotADirectory => {
            return Ok(Existing::BlockedParent);
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            // Some platforms report a file parent as NotFound
            return Ok(if has_file_ancestor(path) {
                Existing::BlockedParent
            } else {
                Existing::Missing
            });
        }
        Err(e) => return Err(e),
    };

    if metadata.is_dir() {
        return Ok(Existing::Directory);
    }

    // Cheap length check before reading the whole file
    if metadata.len() != contents.len() as u64 {
        return Ok(Existing::Different);
    }

    if fs::read(path)? == contents {
        Ok(Existing::Identical)
    } else {
        Ok(Existing::Different)
    }
}

/// Whether the nearest existing ancestor of `path` is something other than
/// a directory.
fn has_file_ancestor(path: &Path) -> bool {
    path.ancestors()
        .skip(1)
        .find_map(|ancestor| fs::metadata(ancestor).ok())
        .is_some_and(|metadata| !metadata.is_dir())
}

/// Writes `contents` to `path`, creating parent directories as needed.
///
/// Data goes to a temporary file in the destination directory first and is
/// renamed into place, so `path` never holds a partially written file.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let parent = path.parent().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no parent directory", path.display()),
        )
    })?;
    fs::create_dir_all(parent)?;

    let mut builder = tempfile::Builder::new();
    builder.prefix(".emvc-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }

    let mut file = builder.tempfile_in(parent)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    Ok(())
}
