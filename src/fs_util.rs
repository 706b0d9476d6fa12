use std::fs;
use std::io::Read;

use camino::Utf8Path;
use flate2::read::GzDecoder;

use crate::error::FetchError;

/// Reads a text file, transparently decompressing `.gz` files.
pub fn read_text(path: &Utf8Path) -> Result<String, FetchError> {
    let bytes =
        fs::read(path).map_err(|err| FetchError::Filesystem(format!("read {path}: {err}")))?;
    if !is_gzip(path) {
        return String::from_utf8(bytes)
            .map_err(|err| FetchError::Filesystem(format!("{path} is not UTF-8: {err}")));
    }
    let mut decoder = GzDecoder::new(bytes.as_slice());
    let mut text = String::new();
    decoder
        .read_to_string(&mut text)
        .map_err(|err| FetchError::Filesystem(format!("decompress {path}: {err}")))?;
    Ok(text)
}

fn is_gzip(path: &Utf8Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}
