//! Utilidades compartidas para generar rutas de salida y temporales.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::warn;

use super::constants::CLEARED_SUFFIX;

/// Ruta hermana `<nombre>_cleared.<extensión>` del documento de entrada.
pub fn cleared_output_path(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();

    let file_name = match path.extension() {
        Some(extension) => format!(
            "{}{}.{}",
            stem,
            CLEARED_SUFFIX,
            extension.to_string_lossy()
        ),
        None => format!("{}{}", stem, CLEARED_SUFFIX),
    };
    parent.join(file_name)
}

/// Crea un nombre de archivo temporal oculto en el mismo directorio que `path`.
pub fn generate_temp_filename(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let extension = path.extension().unwrap_or_default().to_string_lossy();

    // Evita colisiones entre ejecuciones consecutivas.
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    parent.join(format!(".{}_temp_{}.{}", stem, timestamp, extension))
}

/// Archivo intermedio que se elimina al soltarse salvo que se haya persistido.
#[derive(Debug)]
pub struct TempFileGuard {
    path: PathBuf,
    armed: bool,
}

impl TempFileGuard {
    pub fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mueve el temporal a `destination` y desactiva la limpieza.
    pub fn persist(mut self, destination: &Path) -> std::io::Result<()> {
        fs::rename(&self.path, destination)?;
        self.armed = false;
        Ok(())
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if self.armed
            && self.path.exists()
            && let Err(error) = fs::remove_file(&self.path)
        {
            warn!(path = %self.path.display(), %error, "no se pudo borrar el temporal");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn cleared_path_keeps_directory_and_extension() {
        let path = Path::new("/tmp/informes/borrador.docx");
        assert_eq!(
            cleared_output_path(path),
            PathBuf::from("/tmp/informes/borrador_cleared.docx")
        );
    }

    #[test]
    fn cleared_path_without_extension() {
        assert_eq!(
            cleared_output_path(Path::new("notas")),
            PathBuf::from("notas_cleared")
        );
    }

    #[test]
    fn temp_filename_is_hidden_sibling() {
        let temp = generate_temp_filename(Path::new("/data/doc.docx"));
        assert_eq!(temp.parent(), Some(Path::new("/data")));
        let name = temp.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(".doc_temp_"));
        assert!(name.ends_with(".docx"));
    }

    #[test]
    fn guard_removes_file_on_drop() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let temp = dir.path().join(".x_temp.docx");
        fs::write(&temp, b"parcial")?;

        drop(TempFileGuard::new(temp.clone()));

        assert!(!temp.exists());
        Ok(())
    }

    #[test]
    fn guard_persist_keeps_destination() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let temp = dir.path().join(".x_temp.docx");
        let destination = dir.path().join("x_cleared.docx");
        fs::write(&temp, b"final")?;

        TempFileGuard::new(temp.clone()).persist(&destination)?;

        assert!(!temp.exists());
        assert_eq!(fs::read(&destination)?, b"final");
        Ok(())
    }
}
