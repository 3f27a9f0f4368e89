use std::path::Path;

use crate::catalog::{CatalogBuilder, VariantCatalog};
use crate::error::Result;
use crate::reader::for_each_line;
use tracing::warn;

/// Loads ClinVar's variant_summary table (plain or gzipped).
pub fn load_catalog(path: &impl AsRef<Path>, assembly: Option<String>) -> Result<VariantCatalog> {
    let mut builder = CatalogBuilder::new(assembly);
    for_each_line(path, |line| builder.push_line(line))?;
    let malformed = builder.stats().malformed;
    let catalog = builder.finish();
    if catalog.is_empty() {
        warn!(path = %path.as_ref().display(), "no usable rows in variant catalog");
    } else if malformed > 0 {
        warn!(malformed, "skipped malformed catalog rows");
    }
    Ok(catalog)
}
