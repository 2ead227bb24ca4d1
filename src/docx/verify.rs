use std::io::Read;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use regex::bytes::Regex as BytesRegex;

use crate::error::{Result, ScrubError};

use super::archive::open_docx;
use super::constants::{
    ANONYMOUS_AUTHOR, AUTHOR_PATTERN, COMMENTS_PART_SUFFIX, DATE_PATTERN, DOCUMENT_PART_SUFFIX,
    TIMESTAMP_PATTERN,
};
use super::sanitize::ScrubMode;

lazy_static! {
    static ref AUTHOR_VALUE_RE: BytesRegex =
        BytesRegex::new(AUTHOR_PATTERN).expect("patrón de autor válido");
    static ref DATE_VALUE_RE: BytesRegex =
        BytesRegex::new(DATE_PATTERN).expect("patrón de fecha válido");
    static ref TIMESTAMP_RE: Regex = Regex::new(TIMESTAMP_PATTERN).expect("patrón de marca válido");
}

/// Valor que se espera en los atributos de fecha tras la limpieza.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateExpectation {
    Empty,
    Timestamp,
}

/// Comprueba que un documento limpio no conserva autores ni fechas originales.
pub fn verify_docx_scrubbed(path: &Path, mode: ScrubMode) -> Result<bool> {
    let mut archive = open_docx(path)?;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i).map_err(|e| {
            ScrubError::archive("No se pudo acceder a una parte durante la verificación", e)
        })?;
        let name = file.name().to_string();

        let expectation = if name.ends_with(DOCUMENT_PART_SUFFIX) {
            DateExpectation::Empty
        } else if name.ends_with(COMMENTS_PART_SUFFIX) {
            match mode {
                ScrubMode::Erase => DateExpectation::Empty,
                ScrubMode::Mask => DateExpectation::Timestamp,
            }
        } else {
            continue;
        };

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| {
            ScrubError::io(format!("No se pudo leer {} durante la verificación", name), e)
        })?;

        if !is_part_clean(&contents, expectation) {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Verifica autores anónimos y fechas con el formato esperado en una parte.
pub fn is_part_clean(contents: &[u8], dates: DateExpectation) -> bool {
    let authors_clean = AUTHOR_VALUE_RE
        .captures_iter(contents)
        .all(|caps| &caps[1] == ANONYMOUS_AUTHOR.as_bytes());

    let dates_clean = DATE_VALUE_RE.captures_iter(contents).all(|caps| {
        let value = &caps[1];
        match dates {
            DateExpectation::Empty => value.is_empty(),
            DateExpectation::Timestamp => std::str::from_utf8(value)
                .map(|text| TIMESTAMP_RE.is_match(text))
                .unwrap_or(false),
        }
    });

    authors_clean && dates_clean
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erased_part_is_clean() {
        let part = br#"<w:ins w:author="Unknown Author" w:date=""/>"#;
        assert!(is_part_clean(part, DateExpectation::Empty));
    }

    #[test]
    fn original_author_is_flagged() {
        let part = br#"<w:ins w:author="Jane" w:date=""/>"#;
        assert!(!is_part_clean(part, DateExpectation::Empty));
    }

    #[test]
    fn masked_dates_must_be_timestamps() {
        let masked = br#"<w:comment w:author="Unknown Author" w:date="2024-01-01T12:01:00Z"/>"#;
        let erased = br#"<w:comment w:author="Unknown Author" w:date=""/>"#;

        assert!(is_part_clean(masked, DateExpectation::Timestamp));
        assert!(!is_part_clean(erased, DateExpectation::Timestamp));
        assert!(!is_part_clean(masked, DateExpectation::Empty));
    }
}
