//! Text file access with classified outcomes.
//!
//! Nothing here returns `Err` or panics on I/O failure: every path ends in a
//! [`FileReadResult`] / [`FileWriteResult`], and every failure is logged first.

use std::{fs, io, path::Path};

use crate::{
    here,
    logging::{log, log_exception, LogLevel},
    outcome::{FileReadResult, FileWriteResult, OutcomeKind},
};

pub fn read_text(path: &Path) -> FileReadResult {
    if path.as_os_str().is_empty() {
        log(LogLevel::Error, "cannot read a file from an empty path");
        return FileReadResult::failure(OutcomeKind::InvalidPath);
    }
    match lookup(path) {
        Ok(Some(meta)) if meta.is_dir() => {
            log(
                LogLevel::Error,
                &format!("file {} is a directory", path.display()),
            );
            return FileReadResult::failure(OutcomeKind::IsADirectory);
        }
        Ok(Some(_)) => {}
        Ok(None) => {
            log(
                LogLevel::Error,
                &format!("file {} does not exist", path.display()),
            );
            return FileReadResult::failure(OutcomeKind::FileNotFound);
        }
        Err(e) => {
            log_exception(&e, Some(here!()), "while opening a file");
            return FileReadResult::failure(OutcomeKind::from_io_error(&e));
        }
    }

    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            log_exception(&e, Some(here!()), "while reading a file");
            return FileReadResult::failure(OutcomeKind::from_io_error(&e));
        }
    };

    match String::from_utf8(bytes) {
        Ok(text) => FileReadResult::success(text),
        Err(e) => {
            log_exception(&e, Some(here!()), "while decoding a file");
            FileReadResult::failure(OutcomeKind::InvalidEncoding)
        }
    }
}

/// Write `content` to `path`, creating missing parent directories.
///
/// `content` must be valid UTF-8; anything else is rejected as
/// [`OutcomeKind::InvalidData`] before touching the filesystem.
pub fn write_text(path: &Path, content: impl AsRef<[u8]>) -> FileWriteResult {
    if path.as_os_str().is_empty() {
        log(LogLevel::Error, "cannot write a file to an empty path");
        return FileWriteResult::new(OutcomeKind::InvalidPath);
    }

    let text = match std::str::from_utf8(content.as_ref()) {
        Ok(t) => t,
        Err(e) => {
            log(
                LogLevel::Error,
                &format!("refusing to store non-text data in {}: {e}", path.display()),
            );
            return FileWriteResult::new(OutcomeKind::InvalidData);
        }
    };

    let existed = match lookup(path) {
        Ok(Some(meta)) if meta.is_dir() => {
            log(
                LogLevel::Error,
                &format!("file {} is a directory", path.display()),
            );
            return FileWriteResult::new(OutcomeKind::IsADirectory);
        }
        Ok(found) => found.is_some(),
        Err(e) => {
            log_exception(&e, Some(here!()), "while opening a file");
            return FileWriteResult::new(OutcomeKind::from_io_error(&e));
        }
    };

    if existed {
        log(LogLevel::Info, &format!("overwrite file {}", path.display()));
    } else {
        if let Err(e) = ensure_parent(path) {
            log_exception(&e, Some(here!()), "while creating a directory");
            return FileWriteResult::new(OutcomeKind::from_io_error(&e));
        }
        log(LogLevel::Info, &format!("create file {}", path.display()));
    }

    match fs::write(path, text) {
        Ok(()) => FileWriteResult::new(OutcomeKind::Success),
        Err(e) => {
            log_exception(&e, Some(here!()), "while writing a file");
            FileWriteResult::new(OutcomeKind::from_io_error(&e))
        }
    }
}

/// Metadata for `path`, `None` when nothing is there.
///
/// Every other failure (no search permission on a parent, a parent that is a
/// regular file) is returned as is.
fn lookup(path: &Path) -> io::Result<Option<fs::Metadata>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

fn ensure_parent(path: &Path) -> io::Result<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    if lookup(parent)?.is_none() {
        log(
            LogLevel::Info,
            &format!("create directory {}", parent.display()),
        );
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
