//! Renderer interface and atomic artifact output.

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::RenderError;
use crate::theme::Theme;

/// Backend that serializes composed content into one binary artifact
pub trait Renderer {
    /// Content the backend consumes
    type Input: ?Sized;

    /// Short artifact name, e.g. `"pptx"`
    fn artifact(&self) -> &'static str;

    /// Produce the artifact bytes
    fn render(&self, input: &Self::Input, theme: &Theme) -> Result<Vec<u8>, RenderError>;
}

/// Render and write an artifact, returning its size in bytes
///
/// The bytes go to a temporary file next to `path` that is renamed over it
/// on success, so a failed run never leaves a partial file at `path`. Parent
/// directories are created and an existing file is replaced.
pub fn write_artifact<R: Renderer>(
    renderer: &R,
    input: &R::Input,
    theme: &Theme,
    path: &Path,
) -> Result<u64, RenderError> {
    let bytes = renderer.render(input, theme)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(&bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| RenderError::Io(e.error))?;

    info!(
        artifact = renderer.artifact(),
        path = %path.display(),
        bytes = bytes.len(),
        "wrote artifact"
    );
    Ok(bytes.len() as u64)
}
