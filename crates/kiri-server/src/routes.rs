//! Resource names in URLs and the tables they address.

use std::collections::HashMap;

/// Resource aliases of the marketplace API.
pub const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("services", "marketplace_service"),
    ("bookings", "marketplace_booking"),
    ("categories", "marketplace_category"),
    ("users", "auth_user"),
    ("profiles", "users_profile"),
    ("posts", "blog_post"),
    ("comments", "blog_comment"),
    ("pathways", "academy_learningpathway"),
    ("steps", "academy_modulestep"),
];

/// Maps a URL resource segment to a table name.
///
/// Segments without an alias address the table of the same name.
#[derive(Debug, Clone)]
pub struct Routes {
    aliases: HashMap<String, String>,
}

impl Routes {
    /// Routes without any aliases.
    pub fn empty() -> Self {
        Self {
            aliases: HashMap::new(),
        }
    }

    pub fn alias(mut self, resource: impl Into<String>, table: impl Into<String>) -> Self {
        self.aliases.insert(resource.into(), table.into());
        self
    }

    pub fn resolve<'a>(&'a self, resource: &'a str) -> &'a str {
        self.aliases
            .get(resource)
            .map(String::as_str)
            .unwrap_or(resource)
    }
}

impl Default for Routes {
    fn default() -> Self {
        DEFAULT_ALIASES
            .iter()
            .fold(Routes::empty(), |routes, (resource, table)| {
                routes.alias(*resource, *table)
            })
    }
}
