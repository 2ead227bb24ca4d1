use lazy_static::lazy_static;
use rand::Rng;
use regex::bytes::{Captures, Regex};
use serde::Serialize;
use tracing::debug;

use super::constants::{
    AUTHOR_PATTERN, DATE_MARKER, DATE_PATTERN, ERASED_AUTHOR, ERASED_DATE,
};
use super::timestamps::{Clock, generate_masked_timestamps};

lazy_static! {
    static ref AUTHOR_RE: Regex = Regex::new(AUTHOR_PATTERN).expect("patrón de autor válido");
    static ref DATE_RE: Regex = Regex::new(DATE_PATTERN).expect("patrón de fecha válido");
}

/// Forma de tratar las fechas de los comentarios.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrubMode {
    /// Vacía los valores de fecha.
    #[default]
    Erase,
    /// Sustituye las fechas por marcas sintéticas verosímiles.
    Mask,
}

/// Recuento de atributos reescritos en una parte.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PartStats {
    pub authors: usize,
    pub dates_erased: usize,
    pub dates_masked: usize,
}

/// Sustituye cada `w:author="..."` por el autor anónimo.
pub fn erase_author(contents: &[u8]) -> (Vec<u8>, usize) {
    let count = AUTHOR_RE.find_iter(contents).count();
    let replaced = AUTHOR_RE.replace_all(contents, ERASED_AUTHOR).into_owned();
    (replaced, count)
}

/// Vacía el valor de cada `w:date="..."`.
pub fn erase_dates(contents: &[u8]) -> (Vec<u8>, usize) {
    let count = DATE_RE.find_iter(contents).count();
    let replaced = DATE_RE.replace_all(contents, ERASED_DATE).into_owned();
    (replaced, count)
}

/// Asigna a la i-ésima fecha del texto la i-ésima marca de `timestamps`.
///
/// La sustitución es posicional: dos fechas con el mismo valor original reciben
/// marcas distintas. Las apariciones sin marca disponible quedan intactas.
pub fn mask_dates(contents: &[u8], timestamps: &[String]) -> (Vec<u8>, usize) {
    let mut index = 0;
    let replaced = DATE_RE
        .replace_all(contents, |caps: &Captures<'_>| {
            let replacement = match timestamps.get(index) {
                Some(stamp) => format!("{DATE_MARKER}\"{stamp}\"").into_bytes(),
                None => caps[0].to_vec(),
            };
            index += 1;
            replacement
        })
        .into_owned();
    (replaced, index.min(timestamps.len()))
}

/// Cuenta las apariciones del marcador `w:date=`, tengan o no un valor válido.
pub fn count_date_markers(contents: &[u8]) -> usize {
    let marker = DATE_MARKER.as_bytes();
    contents
        .windows(marker.len())
        .filter(|window| *window == marker)
        .count()
}

/// Limpia la parte principal; siempre se borra, sea cual sea el modo.
pub fn scrub_document_part(contents: &[u8]) -> (Vec<u8>, PartStats) {
    let (contents, authors) = erase_author(contents);
    let (contents, dates_erased) = erase_dates(&contents);
    debug!(authors, dates_erased, "parte principal limpiada");
    (
        contents,
        PartStats {
            authors,
            dates_erased,
            dates_masked: 0,
        },
    )
}

/// Limpia la parte de comentarios según `mode`.
pub fn scrub_comments_part<R>(
    contents: &[u8],
    mode: ScrubMode,
    clock: &dyn Clock,
    rng: &mut R,
) -> (Vec<u8>, PartStats)
where
    R: Rng + ?Sized,
{
    let (contents, authors) = erase_author(contents);
    let mut stats = PartStats {
        authors,
        ..PartStats::default()
    };

    let contents = match mode {
        ScrubMode::Erase => {
            let (contents, erased) = erase_dates(&contents);
            stats.dates_erased = erased;
            contents
        }
        ScrubMode::Mask => {
            let markers = count_date_markers(&contents);
            let timestamps = generate_masked_timestamps(markers, clock.now(), rng);
            let (contents, masked) = mask_dates(&contents, &timestamps);
            stats.dates_masked = masked;
            contents
        }
    };

    debug!(?mode, ?stats, "comentarios limpiados");
    (contents, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::timestamps::FixedClock;
    use chrono::{TimeZone, Utc};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;

    const COMMENTS: &[u8] = br#"<w:comments><w:comment w:id="0" w:author="Ana" w:date="2023-02-01T10:00:00Z" w:initials="A"/><w:comment w:id="1" w:author="Luis" w:date="2023-02-01T10:00:00Z"/><w:comment w:id="2" w:author="Ana" w:date="2023-02-03T08:15:00Z"/></w:comments>"#;

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn document_part_erases_every_author_and_date() {
        let input = br#"<w:ins w:author="Jane" w:date="2024-01-01T00:00:00Z"/><w:del w:author="Bob Smith" w:date="2024-01-02T00:00:00Z"/>"#;

        let (output, stats) = scrub_document_part(input);

        assert_eq!(
            output,
            br#"<w:ins w:author="Unknown Author" w:date=""/><w:del w:author="Unknown Author" w:date=""/>"#
        );
        assert_eq!(stats.authors, 2);
        assert_eq!(stats.dates_erased, 2);
    }

    #[test]
    fn erasing_twice_is_idempotent() {
        let input = br#"<w:ins w:author="Jane" w:date="2024-01-01T00:00:00Z"/>"#;

        let (once, _) = scrub_document_part(input);
        let (twice, _) = scrub_document_part(&once);

        assert_eq!(once, twice);
    }

    #[test]
    fn content_without_attributes_is_untouched() {
        let input = br#"<w:p><w:r><w:t>author="x" sin prefijo</w:t></w:r></w:p>"#;

        let (output, stats) = scrub_document_part(input);

        assert_eq!(output, input);
        assert_eq!(stats, PartStats::default());
    }

    #[test]
    fn malformed_attribute_is_left_alone() {
        let input = br#"<w:ins w:author=Jane w:date="2024-01-01T00:00:00Z"/>"#;

        let (output, stats) = scrub_document_part(input);

        assert_eq!(output, br#"<w:ins w:author=Jane w:date=""/>"#);
        assert_eq!(stats.authors, 0);
    }

    #[test]
    fn comments_erase_mode_empties_dates() {
        let mut rng = StdRng::seed_from_u64(3);

        let (output, stats) = scrub_comments_part(COMMENTS, ScrubMode::Erase, &clock(), &mut rng);
        let text = String::from_utf8(output).unwrap();

        assert!(!text.contains("Ana") && !text.contains("Luis"));
        assert_eq!(text.matches(r#"w:author="Unknown Author""#).count(), 3);
        assert_eq!(text.matches(r#"w:date="""#).count(), 3);
        assert!(text.contains(r#"w:initials="A""#));
        assert_eq!(stats.dates_erased, 3);
        assert_eq!(stats.dates_masked, 0);
    }

    #[test]
    fn comments_mask_mode_replaces_by_position() {
        let mut rng = StepRng::new(0, 0);

        let (output, stats) = scrub_comments_part(COMMENTS, ScrubMode::Mask, &clock(), &mut rng);
        let text = String::from_utf8(output).unwrap();

        // Las dos primeras fechas compartían valor y aun así reciben marcas distintas.
        let expected = [
            r#"w:date="2024-01-01T12:01:00Z""#,
            r#"w:date="2024-01-01T12:02:00Z""#,
            r#"w:date="2024-01-01T12:03:00Z""#,
        ];
        let mut cursor = 0;
        for needle in expected {
            let found = text[cursor..].find(needle).expect("marca en orden");
            cursor += found + needle.len();
        }
        assert!(!text.contains("2023-02"));
        assert_eq!(stats.dates_masked, 3);
        assert_eq!(stats.authors, 3);
    }

    #[test]
    fn mask_dates_keeps_occurrences_without_timestamp() {
        let input = br#"w:date="a" w:date="b""#;
        let (output, masked) = mask_dates(input, &["2024-01-01T00:00:00Z".to_string()]);

        assert_eq!(output, br#"w:date="2024-01-01T00:00:00Z" w:date="b""#);
        assert_eq!(masked, 1);
    }

    #[test]
    fn date_markers_count_even_without_value() {
        assert_eq!(count_date_markers(br#"w:date= w:date="x" w:author="y""#), 2);
    }
}
