use crate::Args;
use crate::compare::compare_all;
use crate::error::{CustomError, Result};
use crate::model::Individual;
use crate::output::{REPORT_FILE_NAME, write_risk_report};
use crate::reader::catalog::load_catalog;
use crate::reader::checksum::{sidecar_path, verify_md5};
use crate::reader::genotype::{list_genotype_files, read_individual};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecksumPolicy {
    /// Verify against this checksum file.
    Explicit(PathBuf),
    /// Verify against `<catalog>.md5` if it exists.
    Sidecar,
    Skip,
}

#[derive(Debug, Clone)]
pub struct InputSpec {
    catalog: PathBuf,
    checksum: ChecksumPolicy,
    genotype_dir: PathBuf,
    output_dir: PathBuf,
    id_marker: String,
    assembly: Option<String>,
    threads: Option<usize>,
}

impl InputSpec {
    pub fn print_paths(&self) {
        println!("CATALOG  : {}", self.catalog.display());
        println!("GENOTYPES: {}", self.genotype_dir.display());
        println!("REPORT   : {}", self.report_path().display());
        println!();
    }

    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_path()
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(REPORT_FILE_NAME)
    }

    // Resolve which checksum file, if any, guards the catalog
    fn checksum_file(&self) -> Option<PathBuf> {
        match &self.checksum {
            ChecksumPolicy::Explicit(path) => Some(path.clone()),
            ChecksumPolicy::Sidecar => {
                let sidecar = sidecar_path(&self.catalog);
                sidecar.is_file().then_some(sidecar)
            }
            ChecksumPolicy::Skip => None,
        }
    }
}

pub fn build_input_spec(args: &Args) -> InputSpec {
    let checksum = match (&args.md5, args.skip_checksum) {
        (_, true) => ChecksumPolicy::Skip,
        (Some(path), false) => ChecksumPolicy::Explicit(path.clone()),
        (None, false) => ChecksumPolicy::Sidecar,
    };
    InputSpec {
        catalog: args.catalog.clone(),
        checksum,
        genotype_dir: args.genotype_directory.clone(),
        output_dir: PathBuf::from(&args.output_directory),
        id_marker: args.id_marker.clone(),
        assembly: args.assembly.clone(),
        threads: args.threads,
    }
}

fn load_individuals(spec: &InputSpec) -> Result<Vec<Individual>> {
    let files = list_genotype_files(&spec.genotype_dir)?;
    let mut individuals = Vec::with_capacity(files.len());
    let mut seen = HashSet::new();
    for path in &files {
        let individual = read_individual(path, &spec.id_marker)?;
        if !seen.insert(individual.id().to_string()) {
            warn!(
                individual = individual.id(),
                path = %path.display(),
                "individual id appears in more than one file"
            );
        }
        individuals.push(individual);
    }
    Ok(individuals)
}

pub fn run(spec: &InputSpec) -> Result<()> {
    if let Some(md5_path) = spec.checksum_file() {
        println!("Checking MD5 of {}...", spec.catalog.display());
        verify_md5(&spec.catalog, &md5_path)?;
    } else {
        info!("no checksum file, skipping catalog verification");
    }

    println!("Loading variant catalog...");
    let catalog = load_catalog(&spec.catalog, spec.assembly.clone())?;

    println!("Loading genotype files...");
    let individuals = load_individuals(spec)?;
    if individuals.len() < 2 {
        return Err(CustomError::SampleCount {
            n_individuals: individuals.len(),
        });
    }

    let n_pairs = individuals.len() * (individuals.len() - 1) / 2;
    println!(
        "Comparing {} individuals ({} pairs)...",
        individuals.len(),
        n_pairs
    );
    let report = compare_all(&individuals, &catalog, spec.threads)?;
    if report.is_empty() {
        println!("No pathogenic alleles shared by any pair.");
    }

    let report_path = spec.report_path();
    println!(
        "Writing {} pathogenic genotype matches to {}...",
        report.len(),
        report_path.display()
    );
    write_risk_report(&report, &report_path)?;
    Ok(())
}
