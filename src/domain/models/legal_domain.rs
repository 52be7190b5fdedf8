use serde::{Deserialize, Serialize};

/// Topical scope the user picks for a question.
///
/// `AllLaws` is the sentinel: it adds no qualifier to the system instruction.
/// Every other variant appends its literal label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LegalDomain {
    #[default]
    AllLaws,
    Ipc,
    Crpc,
    Civil,
    Family,
    Cyber,
    Constitutional,
    Consumer,
    Property,
    Labour,
}

impl LegalDomain {
    pub const ALL: [LegalDomain; 10] = [
        LegalDomain::AllLaws,
        LegalDomain::Ipc,
        LegalDomain::Crpc,
        LegalDomain::Civil,
        LegalDomain::Family,
        LegalDomain::Cyber,
        LegalDomain::Constitutional,
        LegalDomain::Consumer,
        LegalDomain::Property,
        LegalDomain::Labour,
    ];

    /// The label shown to users and embedded in the system instruction.
    pub fn label(&self) -> &'static str {
        match self {
            LegalDomain::AllLaws => "All Laws",
            LegalDomain::Ipc => "IPC (Indian Penal Code)",
            LegalDomain::Crpc => "CrPC (Criminal Procedure Code)",
            LegalDomain::Civil => "Civil Law",
            LegalDomain::Family => "Family Law",
            LegalDomain::Cyber => "Cyber Law",
            LegalDomain::Constitutional => "Constitutional Law",
            LegalDomain::Consumer => "Consumer Law",
            LegalDomain::Property => "Property Law",
            LegalDomain::Labour => "Labour Law",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            LegalDomain::AllLaws => "all",
            LegalDomain::Ipc => "ipc",
            LegalDomain::Crpc => "crpc",
            LegalDomain::Civil => "civil",
            LegalDomain::Family => "family",
            LegalDomain::Cyber => "cyber",
            LegalDomain::Constitutional => "constitutional",
            LegalDomain::Consumer => "consumer",
            LegalDomain::Property => "property",
            LegalDomain::Labour => "labour",
        }
    }

    pub fn display_label(&self) -> String {
        if self.is_all() {
            format!("📚 {}", self.label())
        } else {
            format!("⚖️ {}", self.label())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, LegalDomain::AllLaws)
    }

    /// Accepts either the full label or the slug, ignoring case and surrounding
    /// whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        let needle = s.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|d| d.slug() == needle || d.label().to_lowercase() == needle)
    }
}

impl std::fmt::Display for LegalDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for LegalDomain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            let known: Vec<&str> = Self::ALL.iter().map(|d| d.slug()).collect();
            format!("unknown legal domain '{}' (expected one of: {})", s, known.join(", "))
        })
    }
}
