use actix_web::dev::HttpServiceFactory;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::directory::{self, Category, SiteId};
use crate::prelude::*;

pub fn service() -> impl HttpServiceFactory {
    web::resource("/categories").route(web::get().to(options))
}


#[derive(Debug, Deserialize)]
struct OptionsQuery {
    /// Raw site id as typed/selected in the form; numeric and
    /// string-encoded forms are both accepted.
    site_id: Option<String>,
    /// Set when editing an existing subscription, so its current
    /// links can pre-check options.
    subscription_id: Option<i32>,
}

#[derive(Debug, Serialize)]
struct OptionsResponse {
    categories: Vec<CategoryOption>,
}

#[derive(Debug, Serialize)]
struct CategoryOption {
    id: i32,
    name: String,
    checked: bool,
}

/// Dependent-field state endpoint: whenever the site selector changes,
/// the form re-fetches this to re-render the category options. A prior
/// selection survives only if the subscription is already stored
/// against the very site being requested.
async fn options(
    data: web::Data<AppData>,
    query: web::Query<OptionsQuery>,
) -> actix_web::Result<HttpResponse> {
    let requested = query.site_id.as_deref().and_then(directory::parse_site_id);
    let options = data.directory.categories(requested);

    let (current_site, linked) = match query.subscription_id {
        Some(subscription_id) => {
            let db = data.db.clone();

            match db.find_subscription(subscription_id).await? {
                Some(subscription) => {
                    let links = db.get_subscription_categories(subscription_id).await?;

                    (
                        subscription.site_id,
                        links.into_iter().map(|link| link.category_id).collect(),
                    )
                }
                // Stale edit form pointing at a removed subscription:
                // still render the option list, with nothing checked.
                None => (None, BTreeSet::new()),
            }
        }
        None => (None, BTreeSet::new()),
    };

    Ok(HttpResponse::Ok().json(OptionsResponse {
        categories: field_state(options, requested, current_site, &linked),
    }))
}

fn field_state(
    options: Vec<Category>,
    requested: Option<SiteId>,
    current_site: Option<SiteId>,
    linked: &BTreeSet<i32>,
) -> Vec<CategoryOption> {
    options
        .into_iter()
        .map(|category| CategoryOption {
            checked: requested.is_some()
                && requested == current_site
                && linked.contains(&category.id),
            id: category.id,
            name: category.name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options_for(ids: &[i32]) -> Vec<Category> {
        ids.iter()
            .map(|&id| Category {
                id,
                name: format!("Category {}", id),
            })
            .collect()
    }

    fn checked_ids(state: &[CategoryOption]) -> Vec<i32> {
        state
            .iter()
            .filter(|option| option.checked)
            .map(|option| option.id)
            .collect()
    }

    #[test]
    fn pre_checks_linked_categories_on_the_stored_site() {
        let linked = [1, 4].iter().cloned().collect();

        let state = field_state(options_for(&[1, 4, 6]), Some(1), Some(1), &linked);

        assert_eq!(checked_ids(&state), vec![1, 4]);
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn switching_site_clears_the_selection() {
        let linked = [1, 4].iter().cloned().collect();

        let state = field_state(options_for(&[1, 3, 4]), Some(3), Some(1), &linked);

        assert!(checked_ids(&state).is_empty());
    }

    #[test]
    fn missing_subscription_still_renders_all_options_unchecked() {
        // A removed subscription resolves to no stored site and no
        // links, never to an error hiding the options.
        let state = field_state(options_for(&[1, 4, 6]), Some(1), None, &BTreeSet::new());

        assert_eq!(state.len(), 3);
        assert!(checked_ids(&state).is_empty());
    }

    #[test]
    fn nothing_is_checked_without_a_requested_site() {
        let linked = [1].iter().cloned().collect();

        let state = field_state(options_for(&[]), None, None, &linked);

        assert!(state.is_empty());
    }

    #[test]
    fn options_keep_their_order() {
        let state = field_state(options_for(&[6, 1, 4]), Some(1), None, &BTreeSet::new());

        let ids: Vec<_> = state.iter().map(|option| option.id).collect();
        assert_eq!(ids, vec![6, 1, 4]);
    }
}
