table! {
    subscription_categories (id) {
        id -> Integer,
        subscription_id -> Integer,
        category_id -> Integer,
        created_at -> Timestamp,
        deleted_at -> Nullable<Timestamp>,
    }
}

table! {
    subscriptions (id) {
        id -> Integer,
        user_id -> Integer,
        site_id -> Nullable<Integer>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

joinable!(subscription_categories -> subscriptions (subscription_id));

allow_tables_to_appear_in_same_query!(
    subscription_categories,
    subscriptions,
);
