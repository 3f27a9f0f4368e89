use crate::model::RiskMatch;

/// Every match found across all pairs, in the order it was produced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RiskReport {
    matches: Vec<RiskMatch>,
}

impl RiskReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, risk_match: RiskMatch) {
        self.matches.push(risk_match);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RiskMatch> {
        self.matches.iter()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

impl Extend<RiskMatch> for RiskReport {
    fn extend<T: IntoIterator<Item = RiskMatch>>(&mut self, iter: T) {
        self.matches.extend(iter);
    }
}

impl<'a> IntoIterator for &'a RiskReport {
    type Item = &'a RiskMatch;
    type IntoIter = std::slice::Iter<'a, RiskMatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}
