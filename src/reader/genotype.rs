use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

use crate::error::{CustomError, Result};
use crate::genotype::GenotypeParser;
use crate::model::Individual;
use crate::reader::for_each_line;

pub const DEFAULT_ID_MARKER: &str = ".23andme.";

/// Genotype files directly inside `dir`, sorted by file name. Hidden files are ignored.
pub fn list_genotype_files(dir: &impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| CustomError::ReadWithPath {
            path: e
                .path()
                .map_or_else(|| dir.as_ref().to_path_buf(), Path::to_path_buf),
            source: e.into(),
        })?;
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if entry.file_type().is_file() && !hidden {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// File name up to the first occurrence of `marker`, or the whole name without it.
pub fn individual_id(path: &impl AsRef<Path>, marker: &str) -> String {
    let name = path
        .as_ref()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.split_once(marker) {
        Some((prefix, _)) => prefix.to_string(),
        None => name,
    }
}

pub fn read_individual(path: &impl AsRef<Path>, marker: &str) -> Result<Individual> {
    let mut parser = GenotypeParser::new(individual_id(path, marker));
    for_each_line(path, |line| parser.push_line(line))?;
    let stats = parser.stats();
    let individual = parser.finish();
    if individual.is_empty() {
        warn!(path = %path.as_ref().display(), "no genotype records in file");
    } else if stats.malformed > 0 {
        warn!(
            path = %path.as_ref().display(),
            malformed = stats.malformed,
            "skipped malformed genotype lines"
        );
    }
    Ok(individual)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_prefix_before_marker() {
        assert_eq!(
            individual_id(&"OpenHuman/user1234_file567.23andme.txt", DEFAULT_ID_MARKER),
            "user1234_file567"
        );
        assert_eq!(individual_id(&"dir/genome_Jane.txt", DEFAULT_ID_MARKER), "genome_Jane.txt");
    }

    #[test]
    fn lists_visible_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.23andme.txt", "a.23andme.txt", ".hidden"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("c.23andme.txt"), "").unwrap();

        let files = list_genotype_files(&dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.23andme.txt", "b.23andme.txt"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_genotype_files(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, CustomError::ReadWithPath { .. }));
    }

    #[test]
    fn reads_individual_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user7.23andme.txt");
        std::fs::write(
            &path,
            "# rsid\tchromosome\tposition\tgenotype\nrs123\t1\t500\tAT\ni4000123\t2\t42\tCC\n",
        )
        .unwrap();
        let individual = read_individual(&path, DEFAULT_ID_MARKER).unwrap();
        assert_eq!(individual.id(), "user7");
        assert_eq!(individual.len(), 2);
        assert_eq!(individual.get("4000123").unwrap().owner_id, "user7");
    }

    #[test]
    fn non_utf8_bytes_do_not_abort_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user8.23andme.txt");
        let mut contents = b"# Fichier g\xe9n\xe9r\xe9 par 23andMe\n".to_vec();
        contents.extend_from_slice(b"rs1\t1\t100\tAA\n");
        contents.extend_from_slice(b"rs2\t1\t2\xff0\tCC\n");
        contents.extend_from_slice(b"rs3\t2\t300\tGT\n");
        std::fs::write(&path, contents).unwrap();

        let individual = read_individual(&path, DEFAULT_ID_MARKER).unwrap();
        assert_eq!(individual.len(), 2);
        assert!(individual.get("2").is_none());
        assert_eq!(individual.get("3").unwrap().genotype, "GT");
    }
}
