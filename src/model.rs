use indexmap::IndexMap;

/// ClinVar's simplified clinical significance flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pathogenicity {
    Pathogenic,
    NotPathogenic,
    Uncertain,
}

impl Pathogenicity {
    pub fn from_flag(flag: i64) -> Self {
        match flag {
            1 => Pathogenicity::Pathogenic,
            0 => Pathogenicity::NotPathogenic,
            _ => Pathogenicity::Uncertain,
        }
    }

    pub fn is_pathogenic(self) -> bool {
        self == Pathogenicity::Pathogenic
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathogenicVariant {
    pub allele_id: i64,
    pub variant_type: String,
    pub position: i64,
    pub pathogenicity: Pathogenicity,
    pub gene_id: i64,
    pub alternate_allele: String,
    pub disease: String,
    pub reference_allele: String,
    pub chromosome: String,
}

impl PathogenicVariant {
    pub fn is_pathogenic(&self) -> bool {
        self.pathogenicity.is_pathogenic()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenotypeRecord {
    pub owner_id: String,
    pub variant_id: String,
    pub chromosome: String,
    pub position: i64,
    pub genotype: String,
}

impl GenotypeRecord {
    /// Up to two single-character alleles; haploid calls (X, Y, MT) have one.
    pub fn alleles(&self) -> impl Iterator<Item = char> + '_ {
        self.genotype.chars().take(2)
    }

    pub fn carries(&self, allele: &str) -> bool {
        let mut wanted = allele.chars();
        match (wanted.next(), wanted.next()) {
            (Some(a), None) => self.alleles().any(|c| c == a),
            _ => false,
        }
    }
}

/// One person's genotype calls keyed by normalized variant id, in file order.
#[derive(Debug, Clone)]
pub struct Individual {
    id: String,
    records: IndexMap<String, GenotypeRecord>,
}

impl Individual {
    pub fn new(id: String, records: IndexMap<String, GenotypeRecord>) -> Self {
        Self { id, records }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get(&self, variant_id: &str) -> Option<&GenotypeRecord> {
        self.records.get(variant_id)
    }

    pub fn records(&self) -> impl Iterator<Item = &GenotypeRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskMatch {
    pub variant_id: String,
    pub matched_genotype: String,
    pub chromosome: String,
    pub genotype_a: String,
    pub genotype_b: String,
    pub id_a: String,
    pub id_b: String,
}
