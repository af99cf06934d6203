use serde::Serialize;

mod fixed;
pub mod http;

pub use fixed::FixedDirectory;

pub type SiteId = i32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Site {
    pub id: SiteId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

/// Site and category vocabularies subscriptions can target.
///
/// Category ids are only meaningful relative to their owning site.
/// Both listings preserve the source's ordering so the admin UI
/// renders options in a stable order.
pub trait Directory: Send + Sync {
    fn sites(&self) -> Vec<Site>;

    /// Categories of one site. Unknown or absent site ids yield an
    /// empty list, never an error.
    fn categories(&self, site_id: Option<SiteId>) -> Vec<Category>;
}

/// Normalize a raw site id to its canonical integer form.
///
/// Query parameters carry site ids as strings; everything past this
/// point only deals in integers.
pub fn parse_site_id(raw: &str) -> Option<SiteId> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_site_id_accepts_numeric_strings() {
        assert_eq!(parse_site_id("7"), Some(7));
        assert_eq!(parse_site_id(" 3 "), Some(3));
    }

    #[test]
    fn parse_site_id_rejects_garbage() {
        assert_eq!(parse_site_id(""), None);
        assert_eq!(parse_site_id("abc"), None);
        assert_eq!(parse_site_id("1; DROP TABLE"), None);
    }
}
