//! Valores compartidos para localizar y normalizar la metadata de autoría.

/// Sufijo de la parte principal del documento; su presencia es obligatoria.
pub const DOCUMENT_PART_SUFFIX: &str = "document.xml";
/// Sufijo de la parte de comentarios; puede no existir.
pub const COMMENTS_PART_SUFFIX: &str = "comments.xml";

/// Los valores se toman hasta la siguiente comilla, sin exigir UTF-8 válido.
pub const AUTHOR_PATTERN: &str = r#"(?-u)w:author="([^"]*)""#;
pub const DATE_PATTERN: &str = r#"(?-u)w:date="([^"]*)""#;
pub const DATE_MARKER: &str = "w:date=";

pub const ERASED_AUTHOR: &[u8] = br#"w:author="Unknown Author""#;
pub const ERASED_DATE: &[u8] = br#"w:date="""#;
pub const ANONYMOUS_AUTHOR: &str = "Unknown Author";

/// Separación mínima y máxima, en segundos, entre comentarios enmascarados.
pub const MASK_SPACING_MIN_SECS: f64 = 60.0;
pub const MASK_SPACING_MAX_SECS: f64 = 120.0;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
pub const TIMESTAMP_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z$";

pub const CLEARED_SUFFIX: &str = "_cleared";
