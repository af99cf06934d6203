use serde::Deserialize;

use super::{Category, Directory, Site, SiteId};

/// In-memory snapshot of a remote site directory.
///
/// Fetched once at startup; lookups then behave exactly like
/// `FixedDirectory`. Refreshing means fetching a new snapshot.
pub struct Snapshot {
    sites: Vec<Site>,
    categories: Vec<(SiteId, Vec<Category>)>,
}

#[derive(Debug, Deserialize)]
struct RemoteEntry {
    id: i32,
    name: String,
}

impl Snapshot {
    /// Fetch `{base}/sites` and `{base}/sites/{id}/categories` for
    /// every listed site.
    pub async fn fetch(base_url: &str) -> Result<Self, reqwest::Error> {
        let base_url = base_url.trim_end_matches('/');
        let client = reqwest::Client::new();

        let remote_sites: Vec<RemoteEntry> = client
            .get(&format!("{}/sites", base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut categories = Vec::with_capacity(remote_sites.len());
        for site in &remote_sites {
            let entries: Vec<RemoteEntry> = client
                .get(&format!("{}/sites/{}/categories", base_url, site.id))
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            log::debug!("Directory: site {} has {} categories", site.id, entries.len());

            categories.push((
                site.id,
                entries
                    .into_iter()
                    .map(|e| Category {
                        id: e.id,
                        name: e.name,
                    })
                    .collect(),
            ));
        }

        Ok(Snapshot {
            sites: remote_sites
                .into_iter()
                .map(|e| Site {
                    id: e.id,
                    name: e.name,
                })
                .collect(),
            categories,
        })
    }
}

impl Directory for Snapshot {
    fn sites(&self) -> Vec<Site> {
        self.sites.clone()
    }

    fn categories(&self, site_id: Option<SiteId>) -> Vec<Category> {
        site_id
            .and_then(|id| self.categories.iter().find(|(site, _)| *site == id))
            .map(|(_, categories)| categories.clone())
            .unwrap_or_default()
    }
}
