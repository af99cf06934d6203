use diesel::prelude::*;
use std::collections::BTreeSet;

use crate::db::models::NewSubscriptionCategory;
use crate::db::schema;

/// Row counts of one reconciliation pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    pub deleted: usize,
    pub created: usize,
}

/// Reconcile the persisted category links of a subscription so that
/// its live link set matches `desired` exactly.
///
/// Runs in a single transaction:
/// 1. hard-delete every row whose category is not desired, plus any
///    soft-deleted leftovers (this bypasses the soft-delete mark);
/// 2. re-read the remaining live category ids;
/// 3. insert a link for each desired id that has no live row yet.
///
/// Category ids are not checked against the site directory; callers
/// own that validation.
pub fn sync_categories(
    conn: &SqliteConnection,
    subscription: i32,
    desired: &BTreeSet<i32>,
) -> QueryResult<SyncOutcome> {
    use schema::subscription_categories::dsl::*;

    conn.transaction(|| {
        let wanted: Vec<i32> = desired.iter().cloned().collect();

        let deleted = diesel::delete(
            subscription_categories
                .filter(subscription_id.eq(subscription))
                .filter(category_id.ne_all(wanted).or(deleted_at.is_not_null())),
        )
        .execute(conn)?;

        // Diff against freshly extracted ids, not the raw rows.
        let current: BTreeSet<i32> = subscription_categories
            .filter(subscription_id.eq(subscription))
            .filter(deleted_at.is_null())
            .select(category_id)
            .load::<i32>(conn)?
            .into_iter()
            .collect();

        let now = chrono::Utc::now().naive_utc();

        let mut created = 0;
        for &missing in desired.difference(&current) {
            diesel::insert_into(subscription_categories)
                .values(&NewSubscriptionCategory {
                    subscription_id: subscription,
                    category_id: missing,
                    created_at: now,
                })
                .execute(conn)?;

            created += 1;
        }

        Ok(SyncOutcome { deleted, created })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{NewSubscription, SubscriptionCategory};

    fn connect() -> SqliteConnection {
        let conn = SqliteConnection::establish(":memory:").unwrap();
        crate::db::ensure_schema(&conn).unwrap();
        conn
    }

    fn insert_subscription(conn: &SqliteConnection, site: i32) -> i32 {
        use schema::subscriptions::dsl::*;

        diesel::insert_into(subscriptions)
            .values(&NewSubscription::new(1, Some(site)))
            .execute(conn)
            .unwrap();

        subscriptions
            .select(id)
            .order(id.desc())
            .first(conn)
            .unwrap()
    }

    fn insert_link(conn: &SqliteConnection, subscription: i32, category: i32) {
        use schema::subscription_categories::dsl::*;

        diesel::insert_into(subscription_categories)
            .values(&NewSubscriptionCategory {
                subscription_id: subscription,
                category_id: category,
                created_at: chrono::Utc::now().naive_utc(),
            })
            .execute(conn)
            .unwrap();
    }

    fn soft_delete_link(conn: &SqliteConnection, subscription: i32, category: i32) {
        use schema::subscription_categories::dsl::*;

        diesel::update(
            subscription_categories
                .filter(subscription_id.eq(subscription))
                .filter(category_id.eq(category)),
        )
        .set(deleted_at.eq(Some(chrono::Utc::now().naive_utc())))
        .execute(conn)
        .unwrap();
    }

    fn all_rows(conn: &SqliteConnection, subscription: i32) -> Vec<SubscriptionCategory> {
        use schema::subscription_categories::dsl::*;

        subscription_categories
            .filter(subscription_id.eq(subscription))
            .order(id.asc())
            .load(conn)
            .unwrap()
    }

    fn live_ids(conn: &SqliteConnection, subscription: i32) -> BTreeSet<i32> {
        all_rows(conn, subscription)
            .into_iter()
            .filter(|row| row.deleted_at.is_none())
            .map(|row| row.category_id)
            .collect()
    }

    fn set(ids: &[i32]) -> BTreeSet<i32> {
        ids.iter().cloned().collect()
    }

    #[test]
    fn replaces_link_set_exactly() {
        let conn = connect();
        let subscription = insert_subscription(&conn, 1);

        // Site 1 has categories {1: News, 4: Sports, 6: Politics}
        insert_link(&conn, subscription, 1);
        insert_link(&conn, subscription, 4);

        let kept_row_id = all_rows(&conn, subscription)
            .into_iter()
            .find(|row| row.category_id == 4)
            .unwrap()
            .id;

        let outcome = sync_categories(&conn, subscription, &set(&[4, 6])).unwrap();

        assert_eq!(outcome, SyncOutcome { deleted: 1, created: 1 });
        assert_eq!(live_ids(&conn, subscription), set(&[4, 6]));

        // The already-linked category kept its original row.
        let rows = all_rows(&conn, subscription);
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows.iter().find(|row| row.category_id == 4).unwrap().id,
            kept_row_id
        );
    }

    #[test]
    fn is_idempotent() {
        let conn = connect();
        let subscription = insert_subscription(&conn, 1);

        insert_link(&conn, subscription, 1);
        insert_link(&conn, subscription, 4);

        let first = sync_categories(&conn, subscription, &set(&[1, 4])).unwrap();
        let second = sync_categories(&conn, subscription, &set(&[1, 4])).unwrap();

        assert_eq!(first, SyncOutcome { deleted: 0, created: 0 });
        assert_eq!(second, SyncOutcome { deleted: 0, created: 0 });
        assert_eq!(live_ids(&conn, subscription), set(&[1, 4]));
    }

    #[test]
    fn empty_set_clears_all_links() {
        let conn = connect();
        let subscription = insert_subscription(&conn, 3);

        insert_link(&conn, subscription, 1);
        insert_link(&conn, subscription, 3);
        insert_link(&conn, subscription, 4);

        let outcome = sync_categories(&conn, subscription, &set(&[])).unwrap();

        assert_eq!(outcome, SyncOutcome { deleted: 3, created: 0 });
        assert!(all_rows(&conn, subscription).is_empty());
    }

    #[test]
    fn starts_from_scratch_after_any_prior_state() {
        let conn = connect();
        let subscription = insert_subscription(&conn, 7);

        for desired in &[set(&[1, 2, 3]), set(&[2]), set(&[1, 3]), set(&[])] {
            sync_categories(&conn, subscription, desired).unwrap();
            assert_eq!(&live_ids(&conn, subscription), desired);
        }
    }

    #[test]
    fn purges_soft_deleted_rows() {
        let conn = connect();
        let subscription = insert_subscription(&conn, 1);

        insert_link(&conn, subscription, 1);
        insert_link(&conn, subscription, 6);
        soft_delete_link(&conn, subscription, 6);

        let outcome = sync_categories(&conn, subscription, &set(&[1])).unwrap();

        // The soft-deleted row is gone for good, not just marked.
        assert_eq!(outcome, SyncOutcome { deleted: 1, created: 0 });
        let rows = all_rows(&conn, subscription);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category_id, 1);
    }

    #[test]
    fn resurrects_soft_deleted_links_as_live_rows() {
        let conn = connect();
        let subscription = insert_subscription(&conn, 1);

        insert_link(&conn, subscription, 4);
        soft_delete_link(&conn, subscription, 4);

        let outcome = sync_categories(&conn, subscription, &set(&[4])).unwrap();

        assert_eq!(outcome, SyncOutcome { deleted: 1, created: 1 });

        let rows = all_rows(&conn, subscription);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category_id, 4);
        assert!(rows[0].deleted_at.is_none());
    }

    #[test]
    fn leaves_other_subscriptions_alone() {
        let conn = connect();
        let first = insert_subscription(&conn, 1);
        let second = insert_subscription(&conn, 1);

        insert_link(&conn, first, 1);
        insert_link(&conn, second, 1);
        insert_link(&conn, second, 6);

        sync_categories(&conn, first, &set(&[])).unwrap();

        assert!(live_ids(&conn, first).is_empty());
        assert_eq!(live_ids(&conn, second), set(&[1, 6]));
    }
}
