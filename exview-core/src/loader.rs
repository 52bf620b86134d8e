/// Mesh loading with format detection from the file extension
use std::fs;
use std::path::Path;

use crate::error::{MeshError, Result};
use crate::geometry::Mesh;
use crate::{json, stl};

/// Supported mesh file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Triangle-soup JSON document (`{"v": [...]}`)
    Json,
    /// Binary or ASCII STL
    Stl,
}

impl Format {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Format::Json),
            "stl" => Some(Format::Stl),
            _ => None,
        }
    }
}

/// Load a mesh, choosing the parser from the extension.
///
/// JSON documents are read with `key` as the triangle key.
pub fn load_with_key<P: AsRef<Path>>(path: P, key: &str) -> Result<Mesh> {
    let path = path.as_ref();
    let format = Format::from_path(path).ok_or_else(|| MeshError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let mesh = match format {
        Format::Json => json::parse_with_key(&fs::read_to_string(path)?, key)?,
        Format::Stl => stl::parse_stl(&fs::read(path)?)?,
    };

    log::info!(
        "loaded {} triangles from {} ({:?})",
        mesh.len(),
        path.display(),
        format
    );
    Ok(mesh)
}

/// Load a mesh with the default JSON key.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    load_with_key(path, json::DEFAULT_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("chair.json")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("LEG.STL")), Some(Format::Stl));
        assert_eq!(Format::from_path(Path::new("chair.obj")), None);
        assert_eq!(Format::from_path(Path::new("chair")), None);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load("model.obj").unwrap_err();
        assert!(matches!(err, MeshError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load("definitely/not/here/chair.json").unwrap_err();
        assert!(matches!(err, MeshError::Io(_)));
    }
}
