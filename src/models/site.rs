// Monitored sites: display name plus the database holding its visit log

use serde::{Deserialize, Serialize};

/// One entry of the allow-list. `db` is the identifier accepted by `/api/visitors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub name: String,
    pub db: String,
}

impl Site {
    pub fn new(name: &str, db: &str) -> Self {
        Self {
            name: name.to_string(),
            db: db.to_string(),
        }
    }
}

/// Sites served when the config file does not list any.
pub fn default_sites() -> Vec<Site> {
    vec![
        Site::new("SNHIP", "snhipVisitors"),
        Site::new("Toy Locker", "toylockerVisitors"),
        Site::new("CPMCC", "cpmccVisitors"),
        Site::new("Loam Depot", "loamdepotVisitors"),
    ]
}

/// Exact match on the site identifier; `None` means the id is not allow-listed.
pub fn find_site<'a>(sites: &'a [Site], db: &str) -> Option<&'a Site> {
    sites.iter().find(|s| s.db == db)
}
