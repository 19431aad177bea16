//! Vendor directory and message templates.
//!
//! Immutable reference data loaded once at startup and used by the compose
//! flow: vendors resolve a recipient, templates prefill subject and body.

mod model;

pub use model::{MessageTemplate, Vendor};

/// Read-only collection of vendors and templates.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    vendors: Vec<Vendor>,
    templates: Vec<MessageTemplate>,
}

impl Directory {
    /// Create a directory from vendor and template lists.
    #[must_use]
    pub const fn new(vendors: Vec<Vendor>, templates: Vec<MessageTemplate>) -> Self {
        Self { vendors, templates }
    }

    /// All vendors in display order.
    #[must_use]
    pub fn vendors(&self) -> &[Vendor] {
        &self.vendors
    }

    /// All templates in display order.
    #[must_use]
    pub fn templates(&self) -> &[MessageTemplate] {
        &self.templates
    }

    /// Find a vendor by id.
    #[must_use]
    pub fn vendor(&self, id: &str) -> Option<&Vendor> {
        self.vendors.iter().find(|v| v.id == id)
    }

    /// Find a template by id.
    #[must_use]
    pub fn template(&self, id: &str) -> Option<&MessageTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Vendors whose name, email or category contains the query.
    #[must_use]
    pub fn search_vendors(&self, query: &str) -> Vec<&Vendor> {
        self.vendors.iter().filter(|v| v.matches(query)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> Directory {
        Directory::new(
            vec![
                Vendor::new("v1", "Acme Supplies", "orders@acme.example", "Supplies"),
                Vendor::new("v2", "Swift Logistics", "dispatch@swift.example", "Logistics"),
            ],
            vec![MessageTemplate {
                id: "t1".into(),
                name: "Order".into(),
                subject: "New order".into(),
                content: "Please ship.".into(),
            }],
        )
    }

    #[test]
    fn test_lookup() {
        let dir = directory();
        assert_eq!(dir.vendor("v2").map(|v| v.name.as_str()), Some("Swift Logistics"));
        assert!(dir.vendor("v3").is_none());
        assert_eq!(dir.template("t1").map(|t| t.subject.as_str()), Some("New order"));
        assert!(dir.template("t2").is_none());
    }

    #[test]
    fn test_search_vendors() {
        let dir = directory();
        let found = dir.search_vendors("logistics");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "v2");
        assert_eq!(dir.search_vendors("").len(), 2);
    }
}
