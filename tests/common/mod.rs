use flate2::Compression;
use flate2::write::GzEncoder;
use md5::{Digest, Md5};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

const CATALOG_FIELDS: usize = 34;
pub const REPORT_HEADER: &str = "RS ID\tpathogenic genotype\tchromosome\tgenotype parent 1\tgenotype parent 2\tparent ID 1\tparent ID 2";

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

#[derive(Clone, Copy)]
pub enum CatalogFormat {
    Plain,
    Gzip,
}

pub struct Dataset {
    pub catalog: PathBuf,
    pub genotype_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Dataset {
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join("pathogenic_snps.tsv")
    }
}

/// (rsId, ClinSigSimple, chromosome, position, alternate allele)
const CATALOG_ROWS: [(&str, &str, &str, &str, &str); 6] = [
    ("100", "1", "1", "1000", "T"),
    ("200", "1", "2", "2000", "G"),
    ("300", "0", "3", "3000", "A"),
    ("300", "1", "3", "3000", "C"),
    ("400", "1", "4", "4000", "A"),
    ("500", "1", "5", "not-a-position", "A"),
];

const GENOTYPES: [(&str, &[&str]); 3] = [
    (
        "user1.23andme.txt",
        &[
            "rs100\t1\t1000\tAT",
            "rs200\t2\t2000\tAA",
            "rs300\t3\t3000\tCC",
            "rs400\t4\t4001\tAA",
        ],
    ),
    (
        "user2.23andme.txt",
        &[
            "rs100\t1\t1000\tAA",
            "rs200\t2\t2000\tAA",
            "rs300\t3\t3000\tTT",
            "rs400\t4\t4000\tAA",
        ],
    ),
    (
        "user3.23andme.txt",
        &[
            "rs100\t1\t1000\tAA",
            "rs200\t2\t2000\tGG",
            "rs300\t3\t3000\tAA",
        ],
    ),
];

/// Report rows expected for the dataset, in pair order.
pub fn expected_rows() -> Vec<&'static str> {
    vec![
        "100\tAT\t1\tAT\tAA\tuser1\tuser2",
        "300\tCC\t3\tCC\tTT\tuser1\tuser2",
        "100\tAT\t1\tAT\tAA\tuser1\tuser3",
        "200\tGG\t2\tAA\tGG\tuser1\tuser3",
        "300\tCC\t3\tCC\tAA\tuser1\tuser3",
        "200\tGG\t2\tAA\tGG\tuser2\tuser3",
    ]
}

pub fn create_dataset(format: CatalogFormat, label: &str) -> io::Result<Dataset> {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let base_dir = std::env::temp_dir().join("carrierscan-tests").join(format!(
        "{}-{}-{}",
        std::process::id(),
        id,
        label
    ));
    if base_dir.exists() {
        fs::remove_dir_all(&base_dir)?;
    }
    fs::create_dir_all(&base_dir)?;

    let catalog = match format {
        CatalogFormat::Plain => {
            let path = base_dir.join("variant_summary.txt");
            write_catalog(File::create(&path)?)?;
            path
        }
        CatalogFormat::Gzip => {
            let path = base_dir.join("variant_summary.txt.gz");
            let encoder = write_catalog(GzEncoder::new(File::create(&path)?, Compression::default()))?;
            encoder.finish()?;
            write_md5_sidecar(&path)?;
            path
        }
    };

    let genotype_dir = base_dir.join("genotypes");
    fs::create_dir_all(&genotype_dir)?;
    for (name, lines) in GENOTYPES {
        write_genotypes(genotype_dir.join(name), lines)?;
    }

    Ok(Dataset {
        catalog,
        genotype_dir,
        output_dir: base_dir.join("output"),
    })
}

fn write_catalog<W: Write>(mut out: W) -> io::Result<W> {
    writeln!(out, "#AlleleID\tType\tName\tGeneID\tGeneSymbol")?;
    for (rs_id, flag, chromosome, position, alt) in CATALOG_ROWS {
        let mut fields = vec!["-"; CATALOG_FIELDS];
        fields[0] = "15041";
        fields[1] = "single nucleotide variant";
        fields[3] = "9907";
        fields[7] = flag;
        fields[9] = rs_id;
        fields[13] = "Cystic fibrosis";
        fields[16] = "GRCh37";
        fields[18] = chromosome;
        fields[31] = position;
        fields[32] = "A";
        fields[33] = alt;
        writeln!(out, "{}", fields.join("\t"))?;
    }
    Ok(out)
}

fn write_genotypes(path: impl AsRef<Path>, lines: &[&str]) -> io::Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "# This data file generated by 23andMe")?;
    writeln!(file, "# rsid\tchromosome\tposition\tgenotype")?;
    for line in lines {
        writeln!(file, "{line}")?;
    }
    Ok(())
}

pub fn write_md5_sidecar(path: &Path) -> io::Result<()> {
    let digest = Md5::digest(fs::read(path)?);
    let name = path.file_name().unwrap().to_string_lossy();
    let mut sidecar = path.as_os_str().to_owned();
    sidecar.push(".md5");
    fs::write(sidecar, format!("{digest:x}  {name}\n"))
}

/// Data rows of a report, header checked and stripped.
pub fn read_report_rows(path: &Path) -> Vec<String> {
    let content = fs::read_to_string(path).expect("could not read report");
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some(REPORT_HEADER));
    lines.map(str::to_string).collect()
}
