use std::path::PathBuf;

use thiserror::Error;
use tyndustre_render::RenderError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read asset `{}`", path.display())]
    Asset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Render(#[from] RenderError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
