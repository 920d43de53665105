// Column type classifier: maps a declared SQL column type onto the three
// value kinds the JSON output distinguishes.
//
// The mapping is an ordered substring table, not a type grammar. The first
// matching rule wins and anything unmatched is text.

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Float,
    Text,
}

impl DataType {
    /// Classify with a process-wide classifier built on first use.
    pub fn classify(decl: &str) -> DataType {
        static CLASSIFIER: OnceLock<TypeClassifier> = OnceLock::new();
        CLASSIFIER.get_or_init(TypeClassifier::new).classify(decl)
    }
}

/// Ordered decision table. The leading space on the float-family needles
/// keeps column names such as `floating_roof` from matching; the declaration
/// is always matched with a space in front of its type word.
pub const TYPE_RULES: &[(&str, DataType)] = &[
    ("int(", DataType::Integer),
    (" float", DataType::Float),
    (" double", DataType::Float),
    (" decimal", DataType::Float),
];

pub struct TypeClassifier {
    rules: Vec<(Regex, DataType)>,
}

impl TypeClassifier {
    // Compile the rule table once; every needle is matched case-insensitively.
    pub fn new() -> Self {
        let rules = TYPE_RULES
            .iter()
            .map(|(needle, data_type)| {
                let re = Regex::new(&format!("(?i){}", regex::escape(needle)))
                    .expect("valid type rule regex");
                (re, *data_type)
            })
            .collect();
        Self { rules }
    }

    /// Classify a column declaration. `decl` is either the bare type word
    /// (`int(11)`, `DOUBLE`) or a definition line (`` `id` int(11) NOT NULL``).
    pub fn classify(&self, decl: &str) -> DataType {
        let zone = format!(" {decl}");
        self.rules
            .iter()
            .find(|(re, _)| re.is_match(&zone))
            .map(|(_, data_type)| *data_type)
            .unwrap_or(DataType::Text)
    }
}

impl Default for TypeClassifier {
    fn default() -> Self {
        Self::new()
    }
}
