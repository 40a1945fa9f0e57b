//! Header rendering and writing.

use crate::error::FsError;
use crate::extract::clean_signature;
use crate::model::Extraction;
use std::fs;
use std::path::{Path, PathBuf};

const GUARD: &str = "#pragma once";

/// Derive the header path: same directory and base name, final extension replaced.
/// "src/wave.c" → "src/wave.h", "lib.test.c" → "lib.test.h", "Makefile" → "Makefile.h"
pub fn header_path(source: &Path, header_ext: &str) -> PathBuf {
    let filename = source
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_default();
    let base = match filename.rfind('.') {
        Some(idx) => &filename[..idx],
        None => filename.as_str(),
    };
    source.with_file_name(format!("{}.{}", base, header_ext))
}

/// Render header content: guard, typedefs, struct bodies, then prototypes.
///
/// Struct bodies are copied byte for byte, so the result is only as UTF-8 as the
/// source was.
pub fn render(ex: &Extraction) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(GUARD.as_bytes());
    out.extend_from_slice(b"\n\n");

    for s in &ex.structs {
        out.extend_from_slice(format!("typedef struct {0} {0};\n", s.name).as_bytes());
    }
    if !ex.structs.is_empty() {
        out.push(b'\n');
    }

    for s in &ex.structs {
        out.extend_from_slice(&s.text);
        out.extend_from_slice(b"\n\n");
    }

    for f in &ex.functions {
        out.extend_from_slice(clean_signature(&f.raw).as_bytes());
        out.extend_from_slice(b";\n");
    }

    out
}

/// Truncate-and-write `content` to `path`.
pub fn write_header(path: &Path, content: &[u8]) -> Result<(), FsError> {
    fs::write(path, content).map_err(|source| FsError::Write {
        path: path.to_path_buf(),
        source,
    })
}
