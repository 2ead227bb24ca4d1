//! Limpieza de la metadata de autoría en documentos Word basados en ZIP.

mod archive;
mod clean;
pub mod constants;
mod sanitize;
mod timestamps;
mod utils;
mod verify;

pub use archive::{RewriteSummary, find_part, open_docx, rewrite_docx};
pub use clean::{ScrubReport, scrub_docx, scrub_docx_file};
pub use sanitize::{
    PartStats, ScrubMode, count_date_markers, erase_author, erase_dates, mask_dates,
    scrub_comments_part, scrub_document_part,
};
pub use timestamps::{
    Clock, FixedClock, SystemClock, format_timestamp, generate_masked_timestamps,
};
pub use utils::{TempFileGuard, cleared_output_path, generate_temp_filename};
pub use verify::{DateExpectation, is_part_clean, verify_docx_scrubbed};
