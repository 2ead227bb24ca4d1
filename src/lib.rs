//! Motor de docscrub: elimina o enmascara autores y fechas de documentos Word.

pub mod docx;
pub mod error;

pub use docx::{ScrubMode, ScrubReport, scrub_docx, scrub_docx_file};
pub use error::{Result, ScrubError};
