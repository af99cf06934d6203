use actix_web::dev::HttpServiceFactory;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::db::models::{NewSubscription, Subscription};
use crate::directory::SiteId;
use crate::prelude::*;

use super::utils;

pub fn service() -> impl HttpServiceFactory {
    web::scope("/subscriptions")
        .route("", web::get().to(list))
        .route("", web::post().to(create))
        .route("/{id}", web::get().to(detail))
        .route("/{id}", web::put().to(update))
        .route("/{id}", web::delete().to(remove))
}


#[derive(Debug, Serialize)]
struct ListResponse<'a> {
    subscriptions: &'a Vec<ListResponseItem<'a>>,
}

#[derive(Debug, Serialize)]
struct ListResponseItem<'a> {
    id: i32,
    #[serde(rename = "userId")]
    user_id: i32,
    #[serde(rename = "siteId", skip_serializing_if = "Option::is_none")]
    site_id: Option<i32>,
    #[serde(rename = "siteName", skip_serializing_if = "Option::is_none")]
    site_name: Option<&'a str>,
}

async fn list(data: web::Data<AppData>) -> actix_web::Result<HttpResponse> {
    let subscriptions = data.db.get_subscriptions().await?;
    let sites = data.directory.sites();

    let subscriptions = subscriptions
        .iter()
        .map(|subscription| ListResponseItem {
            id: subscription.id,
            user_id: subscription.user_id,
            site_id: subscription.site_id,
            site_name: subscription
                .site_id
                .and_then(|site_id| sites.iter().find(|site| site.id == site_id))
                .map(|site| site.name.as_str()),
        })
        .collect();

    Ok(HttpResponse::Ok().json(ListResponse {
        subscriptions: &subscriptions,
    }))
}


#[derive(Debug, Serialize)]
struct DetailResponse<'a> {
    id: i32,
    #[serde(rename = "userId")]
    user_id: i32,
    #[serde(rename = "siteId")]
    site_id: Option<i32>,
    #[serde(rename = "siteName")]
    site_name: Option<&'a str>,
    categories: Vec<DetailCategory<'a>>,
}

#[derive(Debug, Serialize)]
struct DetailCategory<'a> {
    id: i32,
    /// Resolved display name; null when the directory no longer
    /// knows the id for the subscription's site.
    name: Option<&'a str>,
}

async fn detail(
    data: web::Data<AppData>,
    path: web::Path<i32>,
) -> actix_web::Result<HttpResponse> {
    let db = data.db.clone();
    let subscription_id = path.into_inner();

    let subscription = db.get_subscription(subscription_id).await?;
    let links = db.get_subscription_categories(subscription_id).await?;

    let sites = data.directory.sites();
    let options = data.directory.categories(subscription.site_id);

    let categories = links
        .iter()
        .map(|link| DetailCategory {
            id: link.category_id,
            name: options
                .iter()
                .find(|category| category.id == link.category_id)
                .map(|category| category.name.as_str()),
        })
        .collect();

    Ok(HttpResponse::Ok().json(DetailResponse {
        id: subscription.id,
        user_id: subscription.user_id,
        site_id: subscription.site_id,
        site_name: subscription
            .site_id
            .and_then(|site_id| sites.iter().find(|site| site.id == site_id))
            .map(|site| site.name.as_str()),
        categories,
    }))
}


#[derive(Debug, Deserialize)]
struct CreateData {
    #[serde(rename = "userId")]
    user_id: i32,
    #[serde(rename = "siteId", deserialize_with = "utils::site_id::deserialize")]
    site_id: SiteId,
    #[serde(default)]
    categories: Vec<i32>,
}

#[derive(Debug, Serialize)]
struct CreateResponse {
    id: i32,
}

async fn create(
    data: web::Data<AppData>,
    body: web::Json<CreateData>,
) -> actix_web::Result<HttpResponse> {
    let db = data.db.clone();
    let body = body.into_inner();

    let subscription = db
        .create_subscription(NewSubscription::new(body.user_id, Some(body.site_id)))
        .await?;

    after_create(&db, &subscription, body.categories).await?;

    Ok(HttpResponse::Created().json(CreateResponse {
        id: subscription.id,
    }))
}


#[derive(Debug, Deserialize)]
struct UpdateData {
    #[serde(rename = "siteId", deserialize_with = "utils::site_id::deserialize")]
    site_id: SiteId,
    #[serde(default)]
    categories: Vec<i32>,
}

async fn update(
    data: web::Data<AppData>,
    path: web::Path<i32>,
    body: web::Json<UpdateData>,
) -> actix_web::Result<HttpResponse> {
    let db = data.db.clone();
    let body = body.into_inner();
    let site_id = body.site_id;

    let subscription = db
        .transform_subscription(path.into_inner(), move |subscription| {
            subscription.site_id = Some(site_id);
        })
        .await?;

    after_update(&db, &subscription, body.categories).await?;

    Ok(HttpResponse::Ok().body("OK"))
}


async fn remove(
    data: web::Data<AppData>,
    path: web::Path<i32>,
) -> actix_web::Result<HttpResponse> {
    data.db.remove_subscription(path.into_inner()).await?;

    Ok(HttpResponse::Ok().body("OK"))
}


/// Lifecycle hook ran once a subscription row has been inserted.
async fn after_create(
    db: &db::Helper,
    subscription: &Subscription,
    selected: Vec<i32>,
) -> Result<(), db::Error> {
    sync_categories(db, subscription, selected).await
}

/// Lifecycle hook ran once a subscription row has been updated.
async fn after_update(
    db: &db::Helper,
    subscription: &Subscription,
    selected: Vec<i32>,
) -> Result<(), db::Error> {
    sync_categories(db, subscription, selected).await
}

async fn sync_categories(
    db: &db::Helper,
    subscription: &Subscription,
    selected: Vec<i32>,
) -> Result<(), db::Error> {
    let desired: BTreeSet<i32> = selected.into_iter().collect();

    let outcome = db
        .sync_subscription_categories(subscription.id, desired)
        .await?;

    log::debug!(
        "Synced categories of subscription {}: {} deleted, {} created",
        subscription.id,
        outcome.deleted,
        outcome.created,
    );

    Ok(())
}
