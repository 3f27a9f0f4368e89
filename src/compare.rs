use crate::catalog::VariantCatalog;
use crate::error::Result;
use crate::model::{GenotypeRecord, Individual, PathogenicVariant, RiskMatch};
use crate::report::RiskReport;
use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use tracing::{debug, info, trace};

const PARALLEL_THRESHOLD: usize = 32;

/// Shared pathogenic alleles between two individuals.
///
/// Only variant ids present in both lookups and in the catalog are considered.
/// The catalog entry must be pathogenic and agree with both genotype records on
/// chromosome and position. A pair matches when either individual carries the
/// alternate allele; the reported genotype is A's if A carries it, else B's.
pub fn compare_pair(a: &Individual, b: &Individual, catalog: &VariantCatalog) -> Vec<RiskMatch> {
    let a_is_small = a.len() <= b.len();
    let (small, big) = if a_is_small { (a, b) } else { (b, a) };

    let mut matches = Vec::new();
    for small_record in small.records() {
        let variant_id = small_record.variant_id.as_str();
        let Some(big_record) = big.get(variant_id) else {
            continue;
        };
        let Some(variant) = catalog.get(variant_id) else {
            continue;
        };
        let (record_a, record_b) = if a_is_small {
            (small_record, big_record)
        } else {
            (big_record, small_record)
        };

        if !variant.is_pathogenic() {
            continue;
        }
        if !agrees_with(variant, record_a) || !agrees_with(variant, record_b) {
            trace!(
                variant_id,
                a = %record_a.owner_id,
                b = %record_b.owner_id,
                "genotype position disagrees with catalog"
            );
            continue;
        }

        let alt = variant.alternate_allele.as_str();
        let matched_genotype = if record_a.carries(alt) {
            &record_a.genotype
        } else if record_b.carries(alt) {
            &record_b.genotype
        } else {
            continue;
        };

        debug!(
            variant_id,
            allele_id = variant.allele_id,
            gene_id = variant.gene_id,
            variant_type = %variant.variant_type,
            reference = %variant.reference_allele,
            alternate = alt,
            disease = %variant.disease,
            "pathogenic allele shared by {} and {}",
            a.id(),
            b.id()
        );
        matches.push(RiskMatch {
            variant_id: variant_id.to_string(),
            matched_genotype: matched_genotype.clone(),
            chromosome: variant.chromosome.clone(),
            genotype_a: record_a.genotype.clone(),
            genotype_b: record_b.genotype.clone(),
            id_a: a.id().to_string(),
            id_b: b.id().to_string(),
        });
    }
    matches
}

fn agrees_with(variant: &PathogenicVariant, record: &GenotypeRecord) -> bool {
    record.position == variant.position && record.chromosome == variant.chromosome
}

/// Compares every unordered pair `(i, j)` with `i < j`, appending matches in pair order.
pub fn compare_all(
    individuals: &[Individual],
    catalog: &VariantCatalog,
    threads: Option<usize>,
) -> Result<RiskReport> {
    let pairs: Vec<(usize, usize)> = (0..individuals.len()).tuple_combinations().collect();
    let pb = ProgressBar::new(pairs.len() as u64);
    pb.set_style(ProgressStyle::with_template(
        "[{elapsed_precise}] {bar:30} {pos}/{len} pairs",
    )?);

    let per_pair: Vec<Vec<RiskMatch>> = if (threads.is_none()
        && individuals.len() < PARALLEL_THRESHOLD)
        || threads == Some(1)
    {
        pairs
            .iter()
            .map(|&(i, j)| compare_logged(&individuals[i], &individuals[j], catalog, &pb))
            .collect()
    } else if let Some(n) = threads {
        let pool = ThreadPoolBuilder::new().num_threads(n).build()?;
        pool.install(|| compare_parallel(individuals, &pairs, catalog, &pb))
    } else {
        compare_parallel(individuals, &pairs, catalog, &pb)
    };
    pb.abandon();

    let mut report = RiskReport::new();
    for matches in per_pair {
        report.extend(matches);
    }
    Ok(report)
}

fn compare_parallel(
    individuals: &[Individual],
    pairs: &[(usize, usize)],
    catalog: &VariantCatalog,
    pb: &ProgressBar,
) -> Vec<Vec<RiskMatch>> {
    // Indexed collect keeps pair order
    pairs
        .par_iter()
        .map(|&(i, j)| compare_logged(&individuals[i], &individuals[j], catalog, pb))
        .collect()
}

fn compare_logged(
    a: &Individual,
    b: &Individual,
    catalog: &VariantCatalog,
    pb: &ProgressBar,
) -> Vec<RiskMatch> {
    let matches = compare_pair(a, b, catalog);
    info!(a = a.id(), b = b.id(), matches = matches.len(), "compared pair");
    pb.inc(1);
    matches
}
