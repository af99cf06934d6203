use chrono::NaiveDateTime;
use serde::Serialize;

use super::schema::*;

#[derive(Debug, Serialize, Identifiable, AsChangeset, Queryable)]
pub struct Subscription {
    pub id: i32,
    pub user_id: i32,
    pub site_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[table_name = "subscriptions"]
pub struct NewSubscription {
    pub user_id: i32,
    pub site_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl NewSubscription {
    pub fn new(user_id: i32, site_id: Option<i32>) -> Self {
        let now = chrono::Utc::now().naive_utc();

        NewSubscription {
            user_id,
            site_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One persisted link between a subscription and a category of its
/// site. A set `deleted_at` marks the link as soft-deleted; normal
/// reads skip those rows.
#[derive(Debug, Serialize, Identifiable, Queryable)]
#[table_name = "subscription_categories"]
pub struct SubscriptionCategory {
    pub id: i32,
    pub subscription_id: i32,
    pub category_id: i32,
    pub created_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Debug, Insertable)]
#[table_name = "subscription_categories"]
pub struct NewSubscriptionCategory {
    pub subscription_id: i32,
    pub category_id: i32,
    pub created_at: NaiveDateTime,
}
