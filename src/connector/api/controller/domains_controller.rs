use crate::LegalDomain;

pub struct DomainsController;

impl DomainsController {
    pub fn new() -> Self {
        Self
    }

    pub fn list(&self) -> String {
        let mut output = "Legal domains:\n\n".to_string();
        for domain in LegalDomain::ALL {
            output.push_str(&format!("  {:<16} {}\n", domain.slug(), domain.display_label()));
        }
        output.push_str("\nPass the slug or the full label to --domain.");
        output
    }
}

impl Default for DomainsController {
    fn default() -> Self {
        Self::new()
    }
}
