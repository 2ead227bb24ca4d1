//! Tipos de error para la limpieza de metadata de documentos Word.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use zip::result::ZipError;

/// Resultado propio de las operaciones de limpieza.
pub type Result<T> = std::result::Result<T, ScrubError>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ScrubError {
    /// Ninguna parte del archivo termina en `document.xml`.
    #[error("No se encontró ninguna parte que termine en '{suffix}'")]
    MandatoryPartMissing { suffix: &'static str },

    #[error("No es un documento Office válido: {0}")]
    MalformedInput(#[source] ZipError),

    #[error("Ruta de salida inválida: {0}")]
    InvalidOutput(String),

    #[error("La verificación indicó que la metadata sigue presente en {}", .0.display())]
    VerificationFailed(PathBuf),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("{context}: {source}")]
    Archive {
        context: String,
        #[source]
        source: ZipError,
    },
}

impl ScrubError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        ScrubError::Io {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn archive(context: impl Into<String>, source: ZipError) -> Self {
        ScrubError::Archive {
            context: context.into(),
            source,
        }
    }
}
