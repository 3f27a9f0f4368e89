use md5::{Digest, Md5};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{CustomError, Result};

const MD5_HEX_LEN: usize = 32;

/// Sidecar checksum path NCBI publishes next to each archive (`<file>.md5`).
pub fn sidecar_path(path: &impl AsRef<Path>) -> PathBuf {
    let mut name = path.as_ref().as_os_str().to_owned();
    name.push(".md5");
    PathBuf::from(name)
}

/// Reads the digest from an `md5sum`-style file: `<hex digest>  <file name>`.
pub fn read_expected_md5(md5_path: &impl AsRef<Path>) -> Result<String> {
    let contents = std::fs::read_to_string(md5_path).map_err(|e| CustomError::ReadWithPath {
        source: e,
        path: md5_path.as_ref().to_path_buf(),
    })?;
    match contents.split_whitespace().next() {
        Some(digest)
            if digest.len() == MD5_HEX_LEN && digest.chars().all(|c| c.is_ascii_hexdigit()) =>
        {
            Ok(digest.to_ascii_lowercase())
        }
        _ => Err(CustomError::ChecksumFormat {
            path: md5_path.as_ref().to_path_buf(),
        }),
    }
}

pub fn compute_md5(path: &impl AsRef<Path>) -> Result<String> {
    let read_err = |e: io::Error| CustomError::ReadWithPath {
        source: e,
        path: path.as_ref().to_path_buf(),
    };
    let f = File::open(path).map_err(read_err)?;
    let mut hasher = Md5::new();
    io::copy(&mut BufReader::new(f), &mut hasher).map_err(read_err)?;
    Ok(format!("{:x}", hasher.finalize()))
}

pub fn verify_md5(data_path: &impl AsRef<Path>, md5_path: &impl AsRef<Path>) -> Result<()> {
    let expected = read_expected_md5(md5_path)?;
    let actual = compute_md5(data_path)?;
    if expected != actual {
        return Err(CustomError::ChecksumMismatch {
            path: data_path.as_ref().to_path_buf(),
            expected,
            actual,
        });
    }
    Ok(())
}
