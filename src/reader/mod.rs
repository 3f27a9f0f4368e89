pub mod catalog;
pub mod checksum;
pub mod genotype;

use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{CustomError, Result};

/// Opens a text file, transparently decompressing `.gz` input.
pub(crate) fn open_text(path: &impl AsRef<Path>) -> Result<Box<dyn BufRead>> {
    let f = File::open(path).map_err(|e| CustomError::ReadWithPath {
        source: e,
        path: path.as_ref().to_path_buf(),
    })?;
    let is_gzip = path
        .as_ref()
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));
    if is_gzip {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(f))))
    } else {
        Ok(Box::new(BufReader::new(f)))
    }
}

/// Feeds every line of `path` to `consume`, stopping at the first read error.
/// Bytes that are not valid UTF-8 are replaced rather than failing the file.
pub(crate) fn for_each_line(path: &impl AsRef<Path>, mut consume: impl FnMut(&str)) -> Result<()> {
    let mut reader = open_text(path)?;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| CustomError::ReadWithPath {
                source: e,
                path: path.as_ref().to_path_buf(),
            })?;
        if n == 0 {
            return Ok(());
        }
        consume(&*String::from_utf8_lossy(&buf));
    }
}
