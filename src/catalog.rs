use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::{debug, info};

use crate::error::{CustomError, Result};
use crate::model::{PathogenicVariant, Pathogenicity};

// Column layout of ClinVar's variant_summary.txt
const ALLELE_ID_COL: usize = 0;
const TYPE_COL: usize = 1;
const GENE_ID_COL: usize = 3;
const CLIN_SIG_SIMPLE_COL: usize = 7;
const RS_ID_COL: usize = 9;
const PHENOTYPE_COL: usize = 13;
const ASSEMBLY_COL: usize = 16;
const CHROMOSOME_COL: usize = 18;
const POSITION_COL: usize = 31;
const REFERENCE_ALLELE_COL: usize = 32;
const ALTERNATE_ALLELE_COL: usize = 33;
const MIN_FIELDS: usize = ALTERNATE_ALLELE_COL + 1;

/// Pathogenic-variant lookup keyed by rsId (without the `rs` prefix, as ClinVar stores it).
#[derive(Debug, Default)]
pub struct VariantCatalog {
    variants: HashMap<String, PathogenicVariant>,
}

impl VariantCatalog {
    /// Builds a catalog from in-memory lines; the first line is the header.
    #[cfg(test)]
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = CatalogBuilder::new(None);
        for line in lines {
            builder.push_line(line.as_ref());
        }
        builder.finish()
    }

    pub fn get(&self, rs_id: &str) -> Option<&PathogenicVariant> {
        self.variants.get(rs_id)
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn n_pathogenic(&self) -> usize {
        self.variants.values().filter(|v| v.is_pathogenic()).count()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    pub rows: usize,
    pub malformed: usize,
    pub other_assembly: usize,
}

/// Incremental catalog construction, one raw line at a time.
pub struct CatalogBuilder {
    assembly: Option<String>,
    variants: HashMap<String, PathogenicVariant>,
    stats: CatalogStats,
    line_num: usize,
}

impl CatalogBuilder {
    pub fn new(assembly: Option<String>) -> Self {
        Self {
            assembly,
            variants: HashMap::new(),
            stats: CatalogStats::default(),
            line_num: 0,
        }
    }

    pub fn push_line(&mut self, line: &str) {
        self.line_num += 1;
        if self.line_num == 1 {
            return;
        }
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return;
        }
        self.stats.rows += 1;

        let fields: Vec<&str> = line.split('\t').collect();
        if let Some(assembly) = &self.assembly
            && fields.len() > ASSEMBLY_COL
            && fields[ASSEMBLY_COL] != assembly.as_str()
        {
            self.stats.other_assembly += 1;
            return;
        }

        match parse_row(&fields, self.line_num) {
            Ok((rs_id, variant)) => self.insert(rs_id, variant),
            Err(e) => {
                debug!("skipping catalog row: {e}");
                self.stats.malformed += 1;
            }
        }
    }

    // A pathogenic row overwrites whatever is stored; other rows only fill empty slots.
    fn insert(&mut self, rs_id: String, variant: PathogenicVariant) {
        if variant.is_pathogenic() {
            self.variants.insert(rs_id, variant);
        } else if let Entry::Vacant(slot) = self.variants.entry(rs_id) {
            slot.insert(variant);
        }
    }

    pub fn stats(&self) -> CatalogStats {
        self.stats
    }

    pub fn finish(self) -> VariantCatalog {
        let catalog = VariantCatalog {
            variants: self.variants,
        };
        info!(
            rows = self.stats.rows,
            malformed = self.stats.malformed,
            other_assembly = self.stats.other_assembly,
            rs_ids = catalog.len(),
            pathogenic = catalog.n_pathogenic(),
            "variant catalog loaded"
        );
        catalog
    }
}

fn parse_row(fields: &[&str], line_num: usize) -> Result<(String, PathogenicVariant)> {
    if fields.len() < MIN_FIELDS {
        return Err(CustomError::MalformedRow {
            line_num,
            reason: format!("expected at least {MIN_FIELDS} fields (got {})", fields.len()),
        });
    }
    let int_field = |col: usize, name: &str| -> Result<i64> {
        fields[col]
            .trim()
            .parse()
            .map_err(|_| CustomError::MalformedRow {
                line_num,
                reason: format!("{name} is not an integer: {:?}", fields[col]),
            })
    };

    let variant = PathogenicVariant {
        allele_id: int_field(ALLELE_ID_COL, "allele id")?,
        variant_type: fields[TYPE_COL].to_string(),
        position: int_field(POSITION_COL, "position")?,
        pathogenicity: Pathogenicity::from_flag(int_field(CLIN_SIG_SIMPLE_COL, "pathogenicity")?),
        gene_id: int_field(GENE_ID_COL, "gene id")?,
        alternate_allele: fields[ALTERNATE_ALLELE_COL].to_string(),
        disease: fields[PHENOTYPE_COL].to_string(),
        reference_allele: fields[REFERENCE_ALLELE_COL].to_string(),
        chromosome: fields[CHROMOSOME_COL].to_string(),
    };
    Ok((fields[RS_ID_COL].to_string(), variant))
}
