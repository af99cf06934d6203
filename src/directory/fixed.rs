use super::{Category, Directory, Site, SiteId};

/// Fixed lookup tables standing in for the content-site API.
///
/// Production reads the same shapes from a WordPress instance, which
/// is what the `http` sibling module is for.
pub struct FixedDirectory;

impl Directory for FixedDirectory {
    fn sites(&self) -> Vec<Site> {
        [
            (1, "The Dummy News"),
            (3, "The Fake Buggle"),
            (7, "The Random Press"),
        ]
        .iter()
        .map(|&(id, name)| Site {
            id,
            name: name.to_owned(),
        })
        .collect()
    }

    fn categories(&self, site_id: Option<SiteId>) -> Vec<Category> {
        let table: &[(i32, &str)] = match site_id {
            Some(1) => &[(1, "News"), (4, "Sports"), (6, "Politics")],
            Some(3) => &[(1, "General"), (3, "Art"), (4, "Local")],
            Some(7) => &[(1, "Culture"), (2, "Outdoors"), (3, "Community")],
            _ => &[],
        };

        table
            .iter()
            .map(|&(id, name)| Category {
                id,
                name: name.to_owned(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse_site_id;
    use super::*;

    #[test]
    fn sites_are_listed_in_source_order() {
        let sites = FixedDirectory.sites();

        let expected = [
            (1, "The Dummy News"),
            (3, "The Fake Buggle"),
            (7, "The Random Press"),
        ];

        assert_eq!(sites.len(), expected.len());
        for (site, &(id, name)) in sites.iter().zip(&expected) {
            assert_eq!(site.id, id);
            assert_eq!(site.name, name);
        }
    }

    #[test]
    fn categories_keep_source_order() {
        let names: Vec<_> = FixedDirectory
            .categories(Some(1))
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        assert_eq!(
            names,
            vec![
                (1, "News".to_owned()),
                (4, "Sports".to_owned()),
                (6, "Politics".to_owned()),
            ]
        );
    }

    #[test]
    fn unknown_site_has_no_categories() {
        for unknown in &[0, 2, 4, 99, -1] {
            assert!(FixedDirectory.categories(Some(*unknown)).is_empty());
        }
        assert!(FixedDirectory.categories(None).is_empty());
    }

    #[test]
    fn string_and_numeric_site_ids_resolve_identically() {
        for &id in &[1, 3, 7] {
            let numeric = FixedDirectory.categories(Some(id));
            let stringly = FixedDirectory.categories(parse_site_id(&id.to_string()));

            assert_eq!(numeric, stringly);
            assert!(!numeric.is_empty());
        }
    }
}
