use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{debug, info};

use crate::error::{CustomError, Result};
use crate::model::{GenotypeRecord, Individual};

pub const COMMENT_MARKER: char = '#';
const RS_MARKER: &str = "rs";
const INTERNAL_MARKER: &str = "i";
const GENOTYPE_FIELDS: usize = 4;
const MAX_ALLELES: usize = 2;

/// Strips the `rs` (dbSNP) or `i` (23andMe internal) marker from a raw id.
/// Ids carrying neither marker normalize to the empty string.
pub fn normalize_variant_id(raw: &str) -> &str {
    if let Some(id) = raw.strip_prefix(RS_MARKER) {
        id
    } else if let Some(id) = raw.strip_prefix(INTERNAL_MARKER) {
        id
    } else {
        ""
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GenotypeStats {
    pub records: usize,
    pub duplicates: usize,
    pub malformed: usize,
}

/// Builds one individual's lookup from raw genotype lines.
pub struct GenotypeParser {
    individual_id: String,
    records: IndexMap<String, GenotypeRecord>,
    stats: GenotypeStats,
    line_num: usize,
}

impl GenotypeParser {
    pub fn new(individual_id: impl Into<String>) -> Self {
        Self {
            individual_id: individual_id.into(),
            records: IndexMap::new(),
            stats: GenotypeStats::default(),
            line_num: 0,
        }
    }

    pub fn push_line(&mut self, line: &str) {
        self.line_num += 1;
        let line = line.trim_end_matches(['\r', '\n']);
        if line.starts_with(COMMENT_MARKER) || line.trim().is_empty() {
            return;
        }

        match self.parse_line(line) {
            Ok(record) => match self.records.entry(record.variant_id.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(record);
                    self.stats.records += 1;
                }
                Entry::Occupied(_) => self.stats.duplicates += 1,
            },
            Err(e) => {
                debug!(individual = %self.individual_id, "skipping genotype line: {e}");
                self.stats.malformed += 1;
            }
        }
    }

    fn parse_line(&self, line: &str) -> Result<GenotypeRecord> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != GENOTYPE_FIELDS {
            return Err(CustomError::MalformedLine {
                line_num: self.line_num,
                reason: format!(
                    "expected {GENOTYPE_FIELDS} fields (got {})",
                    fields.len()
                ),
            });
        }
        let position: i64 = fields[2].trim().parse().map_err(|_| CustomError::MalformedLine {
            line_num: self.line_num,
            reason: format!("position is not an integer: {:?}", fields[2]),
        })?;
        let genotype = fields[3].trim();
        if genotype.chars().count() > MAX_ALLELES {
            return Err(CustomError::MalformedLine {
                line_num: self.line_num,
                reason: format!("genotype has more than {MAX_ALLELES} alleles: {genotype:?}"),
            });
        }

        Ok(GenotypeRecord {
            owner_id: self.individual_id.clone(),
            variant_id: normalize_variant_id(fields[0].trim()).to_string(),
            chromosome: fields[1].trim().to_string(),
            position,
            genotype: genotype.to_string(),
        })
    }

    pub fn stats(&self) -> GenotypeStats {
        self.stats
    }

    pub fn finish(self) -> Individual {
        info!(
            individual = %self.individual_id,
            records = self.stats.records,
            duplicates = self.stats.duplicates,
            malformed = self.stats.malformed,
            "genotype file loaded"
        );
        Individual::new(self.individual_id, self.records)
    }
}

#[cfg(test)]
impl Individual {
    /// Parses in-memory genotype lines for one individual.
    pub fn from_lines<I, S>(id: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parser = GenotypeParser::new(id);
        for line in lines {
            parser.push_line(line.as_ref());
        }
        parser.finish()
    }
}
