use std::path::Path;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, ReadContentError>;

/// Reads a whole file as UTF-8 text.
pub fn read_content<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let file_path = file_path.as_ref();
    if !file_path.is_file() {
        return Err(ReadContentError::PathIsNotAFile(file_path.to_path_buf()));
    }

    let bytes = std::fs::read(file_path)
        .map_err(|err| ReadContentError::FileReadError {
            file_path: file_path.to_path_buf(),
            err,
        })?;

    String::from_utf8(bytes)
        .map_err(|err| ReadContentError::FileDecodeError {
            file_path: file_path.to_path_buf(),
            err,
        })
}

#[derive(Debug, thiserror::Error)]
pub enum ReadContentError {
    #[error("{} is not valid UTF-8: {err}", .file_path.display())]
    FileDecodeError {
        file_path: PathBuf,
        err: std::string::FromUtf8Error,
    },

    #[error("failed to read {}: {err}", .file_path.display())]
    FileReadError {
        file_path: PathBuf,
        err: std::io::Error,
    },

    #[error("{} is not a file", .0.display())]
    PathIsNotAFile(PathBuf),
}

impl std::cmp::PartialEq for ReadContentError {
    fn eq(&self, other: &Self) -> bool {
        use ReadContentError::*;
        match (self, other) {
            (
                FileDecodeError { file_path: a_path, err: a_err },
                FileDecodeError { file_path: b_path, err: b_err },
            ) => a_path == b_path && a_err == b_err,

            (
                FileReadError { file_path: a_path, err: a_err },
                FileReadError { file_path: b_path, err: b_err },
            ) => a_path == b_path && a_err.kind() == b_err.kind(),

            (PathIsNotAFile(a_path), PathIsNotAFile(b_path)) => a_path == b_path,

            _ => false,
        }
    }
}
