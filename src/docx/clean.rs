use std::fs::{self, File};
use std::path::{Path, PathBuf};

use rand::Rng;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Result, ScrubError};

use super::archive::{find_part, open_docx, rewrite_docx};
use super::constants::{COMMENTS_PART_SUFFIX, DOCUMENT_PART_SUFFIX};
use super::sanitize::{PartStats, ScrubMode, scrub_comments_part, scrub_document_part};
use super::timestamps::{Clock, SystemClock};
use super::utils::{TempFileGuard, cleared_output_path, generate_temp_filename};
use super::verify::verify_docx_scrubbed;

/// Resumen de una limpieza completada.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrubReport {
    pub output: PathBuf,
    pub mode: ScrubMode,
    pub document_part: String,
    pub comments_part: Option<String>,
    pub authors_replaced: usize,
    pub dates_erased: usize,
    pub dates_masked: usize,
    pub parts_copied: usize,
}

/// Limpia `input` y escribe el resultado en `<nombre>_cleared.<extensión>`.
pub fn scrub_docx_file(input: &Path, mode: ScrubMode) -> Result<ScrubReport> {
    let output = cleared_output_path(input);
    scrub_docx(input, &output, mode, &SystemClock, &mut rand::thread_rng())
}

/// Elimina la metadata de autoría de `input` y escribe el documento en `output`.
///
/// La parte principal siempre se borra; los comentarios se tratan según
/// `mode`. El resto de partes se copian sin cambios. El resultado se escribe
/// primero en un temporal que se verifica antes de moverse a `output`.
pub fn scrub_docx<R>(
    input: &Path,
    output: &Path,
    mode: ScrubMode,
    clock: &dyn Clock,
    rng: &mut R,
) -> Result<ScrubReport>
where
    R: Rng + ?Sized,
{
    ensure_distinct_paths(input, output)?;

    let mut archive = open_docx(input)?;

    let document_part =
        find_part(&archive, DOCUMENT_PART_SUFFIX).ok_or(ScrubError::MandatoryPartMissing {
            suffix: DOCUMENT_PART_SUFFIX,
        })?;
    let comments_part = find_part(&archive, COMMENTS_PART_SUFFIX);
    if comments_part.is_none() {
        warn!(input = %input.display(), "el documento no tiene comentarios");
    }

    let temp = TempFileGuard::new(generate_temp_filename(output));
    let target_file = File::create(temp.path())
        .map_err(|e| ScrubError::io("No se pudo crear archivo limpio", e))?;

    let mut totals = PartStats::default();
    let summary = rewrite_docx(&mut archive, target_file, |name, contents| {
        let scrubbed = if name.ends_with(DOCUMENT_PART_SUFFIX) {
            Some(scrub_document_part(&contents))
        } else if name.ends_with(COMMENTS_PART_SUFFIX) {
            Some(scrub_comments_part(&contents, mode, clock, &mut *rng))
        } else {
            None
        };

        match scrubbed {
            Some((data, stats)) => {
                totals.authors += stats.authors;
                totals.dates_erased += stats.dates_erased;
                totals.dates_masked += stats.dates_masked;
                (data, true)
            }
            None => (contents, false),
        }
    })?;

    if !verify_docx_scrubbed(temp.path(), mode)? {
        return Err(ScrubError::VerificationFailed(output.to_path_buf()));
    }

    temp.persist(output)
        .map_err(|e| ScrubError::io(format!("No se pudo escribir {}", output.display()), e))?;

    info!(
        output = %output.display(),
        ?mode,
        authors = totals.authors,
        dates_erased = totals.dates_erased,
        dates_masked = totals.dates_masked,
        "metadata eliminada"
    );

    Ok(ScrubReport {
        output: output.to_path_buf(),
        mode,
        document_part,
        comments_part,
        authors_replaced: totals.authors,
        dates_erased: totals.dates_erased,
        dates_masked: totals.dates_masked,
        parts_copied: summary.entries - summary.transformed,
    })
}

fn ensure_distinct_paths(input: &Path, output: &Path) -> Result<()> {
    let same = match (fs::canonicalize(input), fs::canonicalize(output)) {
        (Ok(a), Ok(b)) => a == b,
        _ => input == output,
    };

    if same {
        return Err(ScrubError::InvalidOutput(format!(
            "la salida no puede sobrescribir el documento original ({})",
            input.display()
        )));
    }
    Ok(())
}
