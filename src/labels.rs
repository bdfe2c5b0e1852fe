use serde::Serialize;

/// Number of classes the classifier head produces.
pub const CLASS_COUNT: usize = 3;

/// Tissue classes, in the order of the model's output vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CancerClass {
    Adenocarcinoma,
    Benign,
    SquamousCellCarcinoma,
}

impl CancerClass {
    pub const ALL: [CancerClass; CLASS_COUNT] = [
        CancerClass::Adenocarcinoma,
        CancerClass::Benign,
        CancerClass::SquamousCellCarcinoma,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            CancerClass::Adenocarcinoma => 0,
            CancerClass::Benign => 1,
            CancerClass::SquamousCellCarcinoma => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CancerClass::Adenocarcinoma => "Adenocarcinoma",
            CancerClass::Benign => "Benign",
            CancerClass::SquamousCellCarcinoma => "Squamous-cell carcinoma",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            CancerClass::Adenocarcinoma => "🧬",
            CancerClass::Benign => "🫁",
            CancerClass::SquamousCellCarcinoma => "🔬",
        }
    }

    /// Short description shown on the home view.
    pub fn description(self) -> &'static str {
        match self {
            CancerClass::Adenocarcinoma => "common type of lung cancer among non-smokers.",
            CancerClass::Benign => "non-cancerous lesion.",
            CancerClass::SquamousCellCarcinoma => "often associated with smoking.",
        }
    }
}

/// Serializable row of the label table, sent to the page.
#[derive(Debug, Clone, Serialize)]
pub struct LabelInfo {
    pub index: usize,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

impl From<CancerClass> for LabelInfo {
    fn from(class: CancerClass) -> Self {
        Self {
            index: class.index(),
            name: class.name(),
            icon: class.icon(),
            description: class.description(),
        }
    }
}

pub fn label_table() -> Vec<LabelInfo> {
    CancerClass::ALL.into_iter().map(LabelInfo::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_to_name_table() {
        assert_eq!(CancerClass::from_index(0).map(CancerClass::name), Some("Adenocarcinoma"));
        assert_eq!(CancerClass::from_index(1).map(CancerClass::name), Some("Benign"));
        assert_eq!(
            CancerClass::from_index(2).map(CancerClass::name),
            Some("Squamous-cell carcinoma")
        );
        assert_eq!(CancerClass::from_index(3), None);
    }

    #[test]
    fn indices_are_contiguous_from_zero() {
        for (position, class) in CancerClass::ALL.iter().enumerate() {
            assert_eq!(class.index(), position);
            assert_eq!(CancerClass::from_index(position), Some(*class));
        }
    }

    #[test]
    fn icons_match_classes() {
        assert_eq!(CancerClass::Adenocarcinoma.icon(), "🧬");
        assert_eq!(CancerClass::Benign.icon(), "🫁");
        assert_eq!(CancerClass::SquamousCellCarcinoma.icon(), "🔬");
    }

    #[test]
    fn label_table_follows_output_order() {
        let table = label_table();
        assert_eq!(table.len(), CLASS_COUNT);
        assert_eq!(table[2].index, 2);
        assert_eq!(table[2].name, "Squamous-cell carcinoma");
    }
}
