use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),
    #[error("failed to read '{}': {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("source required (positional FILE or --source)")]
    Missing,
}

/// Inline text wins over a path; `-` reads stdin.
pub fn load_source(path: Option<&Path>, text: Option<&str>) -> Result<String, LoadError> {
    if let Some(text) = text {
        return Ok(text.to_string());
    }
    match path {
        Some(path) => load_path(path),
        None => Err(LoadError::Missing),
    }
}

pub fn load_path(path: &Path) -> Result<String, LoadError> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(LoadError::Stdin)?;
        return Ok(buf);
    }
    fs::read_to_string(path).map_err(|source| LoadError::File {
        path: path.to_path_buf(),
        source,
    })
}

/// Display name used in diagnostics.
pub fn display_name(path: &Path) -> String {
    if path.as_os_str() == "-" {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}

/// Prints the error and exits, like every other fatal CLI error.
pub fn load_or_exit(path: Option<&Path>, text: Option<&str>) -> String {
    load_source(path, text).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    })
}
