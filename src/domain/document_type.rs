use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DocumentType {
    Invoice,
    BalanceSheet,
    ProfitAndLossStatement,
    Contract,
    #[default]
    GeneralDocument,
}

impl DocumentType {
    pub const ALL: [DocumentType; 5] = [
        Self::Invoice,
        Self::BalanceSheet,
        Self::ProfitAndLossStatement,
        Self::Contract,
        Self::GeneralDocument,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invoice => "Invoice",
            Self::BalanceSheet => "BalanceSheet",
            Self::ProfitAndLossStatement => "ProfitAndLossStatement",
            Self::Contract => "Contract",
            Self::GeneralDocument => "GeneralDocument",
        }
    }

    /// Lenient label match: ignores ASCII case, spaces, underscores and hyphens.
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = normalize(label);
        Self::ALL
            .into_iter()
            .find(|t| normalize(t.as_str()) == wanted)
    }
}

fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
