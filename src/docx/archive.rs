use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;

use tracing::debug;
use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::error::{Result, ScrubError};

/// Recuento de entradas copiadas durante una reescritura.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RewriteSummary {
    pub entries: usize,
    pub transformed: usize,
}

/// Abre un documento Office como archivo ZIP de solo lectura.
pub fn open_docx(path: &Path) -> Result<ZipArchive<File>> {
    let source_file = File::open(path)
        .map_err(|e| ScrubError::io(format!("No se pudo abrir {}", path.display()), e))?;
    ZipArchive::new(source_file).map_err(ScrubError::MalformedInput)
}

/// Devuelve el nombre de la primera parte que termina en `suffix`.
pub fn find_part<R: Read + Seek>(archive: &ZipArchive<R>, suffix: &str) -> Option<String> {
    archive
        .file_names()
        .find(|name| name.ends_with(suffix))
        .map(str::to_string)
}

/// Reescribe un documento Office aplicando una transformación por parte.
///
/// `transform` recibe el nombre y el contenido de cada parte y devuelve los
/// bytes a escribir junto con un indicador de si la parte fue reescrita. Cada
/// entrada conserva compresión, permisos y fecha de modificación.
pub fn rewrite_docx<R, W, F>(
    archive: &mut ZipArchive<R>,
    target: W,
    mut transform: F,
) -> Result<RewriteSummary>
where
    R: Read + Seek,
    W: Write + Seek,
    F: FnMut(&str, Vec<u8>) -> (Vec<u8>, bool),
{
    let mut writer = ZipWriter::new(target);
    let mut summary = RewriteSummary::default();

    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| ScrubError::archive("Error leyendo archivo del ZIP", e))?;
        let name = file.name().to_string();

        let mut options = FileOptions::<'_, ()>::default().compression_method(file.compression());
        if let Some(mode) = file.unix_mode() {
            options = options.unix_permissions(mode);
        }
        if let Some(time) = file.last_modified() {
            options = options.last_modified_time(time);
        }

        summary.entries += 1;

        if file.is_dir() {
            writer
                .add_directory(name, options)
                .map_err(|e| ScrubError::archive("Error creando directorio en ZIP", e))?;
            continue;
        }

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .map_err(|e| ScrubError::io(format!("Error leyendo contenido de {}", name), e))?;

        let (data_to_write, transformed) = transform(&name, contents);
        if transformed {
            summary.transformed += 1;
        }
        debug!(part = %name, transformed, bytes = data_to_write.len(), "parte copiada");

        writer
            .start_file(name.as_str(), options)
            .map_err(|e| ScrubError::archive(format!("Error escribiendo {}", name), e))?;
        writer
            .write_all(&data_to_write)
            .map_err(|e| ScrubError::io(format!("Error escribiendo {}", name), e))?;
    }

    writer
        .finish()
        .map_err(|e| ScrubError::archive("Error finalizando archivo", e))?;

    Ok(summary)
}
