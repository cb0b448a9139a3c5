use crate::geometry::Size;

use thiserror::Error;

use std::path::PathBuf;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("surface {view} is too small for text measuring {text}")]
    SurfaceTooSmall { view: Size, text: Size },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access settings file `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings file `{}` is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("settings file `{}` must contain a JSON object", path.display())]
    NotAnObject { path: PathBuf },
    #[error("failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}
