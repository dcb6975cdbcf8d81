use std::fs;
use std::path::Path;

use fs_extra::dir::CopyOptions;
use walkdir::WalkDir;

use crate::error::Result;

/// Replace the contents of `destination` with a copy of `content`.
///
/// The destination is created if missing and emptied first. Not
/// transactional: a failure partway leaves whatever was copied so far.
/// Returns the number of regular files copied.
pub fn copy_tree(content: &Path, destination: &Path) -> Result<usize> {
    fs::create_dir_all(destination)?;
    clean_dir(destination)?;

    let mut options = CopyOptions::new();
    options.content_only = true;
    fs_extra::dir::copy(content, destination, &options)?;

    let mut copied = 0;
    for entry in WalkDir::new(destination) {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() {
            copied += 1;
        }
    }
    Ok(copied)
}

/// Remove everything inside `dir`, keeping `dir` itself.
fn clean_dir(dir: &Path) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(entry.path())?;
        } else {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}
