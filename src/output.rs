use crate::error::{CustomError, Result};
use crate::report::RiskReport;
use std::fs::OpenOptions;
use std::path::Path;

pub const REPORT_FILE_NAME: &str = "pathogenic_snps.tsv";
pub const REPORT_HEADER: [&str; 7] = [
    "RS ID",
    "pathogenic genotype",
    "chromosome",
    "genotype parent 1",
    "genotype parent 2",
    "parent ID 1",
    "parent ID 2",
];

/// Appends the report to `path` as TSV; the header goes in only when the file is new or empty.
pub fn write_risk_report(report: &RiskReport, path: &impl AsRef<Path>) -> Result<()> {
    let write_err = |e: std::io::Error| CustomError::Write {
        source: e,
        path: path.as_ref().to_path_buf(),
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_err)?;
    let needs_header = file.metadata().map_err(write_err)?.len() == 0;

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(file);
    if needs_header {
        wtr.write_record(REPORT_HEADER)?;
    }
    for m in report.iter() {
        wtr.write_record([
            m.variant_id.as_str(),
            m.matched_genotype.as_str(),
            m.chromosome.as_str(),
            m.genotype_a.as_str(),
            m.genotype_b.as_str(),
            m.id_a.as_str(),
            m.id_b.as_str(),
        ])?;
    }
    wtr.flush().map_err(write_err)?;
    Ok(())
}
