use actix::prelude::*;
use actix_web::http::StatusCode;
use actix_web::ResponseError;
use std::collections::BTreeSet;
use std::fmt::{self, Display};

use super::executor::*;
use super::models::*;
use super::sync::SyncOutcome;


#[derive(Debug)]
pub enum Error {
    Mailbox(MailboxError),
    Database(diesel::result::Error),
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Database(diesel::result::Error::NotFound) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Mailbox(e) => write!(f, "MailboxError: {}", e),
            Self::Database(e) => write!(f, "DatabaseError: {}", e),
        }
    }
}


/// Async facade over the `Executor` actor pool.
#[derive(Clone)]
pub struct Helper {
    executor: Addr<Executor>,
}

impl Helper {
    pub fn new(executor: Addr<Executor>) -> Self {
        Helper { executor }
    }

    async fn send<M, T>(&self, msg: M) -> Result<T, Error>
    where
        M: Message<Result = diesel::QueryResult<T>> + Send + 'static,
        T: Send + 'static,
        Executor: Handler<M>,
    {
        self.executor
            .send(msg)
            .await
            .map_err(Error::Mailbox)?
            .map_err(Error::Database)
    }

    pub async fn create_subscription(
        &self,
        subscription: NewSubscription,
    ) -> Result<Subscription, Error> {
        self.send(CreateSubscription(subscription)).await
    }

    pub async fn get_subscription(&self, id: i32) -> Result<Subscription, Error> {
        self.send(GetSubscription(id)).await
    }

    pub async fn find_subscription(&self, id: i32) -> Result<Option<Subscription>, Error> {
        self.send(FindSubscription(id)).await
    }

    pub async fn get_subscriptions(&self) -> Result<Vec<Subscription>, Error> {
        self.send(GetSubscriptions).await
    }

    pub async fn transform_subscription<F>(
        &self,
        id: i32,
        transform: F,
    ) -> Result<Subscription, Error>
    where
        F: FnOnce(&mut Subscription) + Send + 'static,
    {
        self.send(TransformSubscription(id, Box::new(transform)))
            .await
    }

    pub async fn remove_subscription(&self, id: i32) -> Result<(), Error> {
        self.send(RemoveSubscription(id)).await
    }

    pub async fn get_subscription_categories(
        &self,
        subscription_id: i32,
    ) -> Result<Vec<SubscriptionCategory>, Error> {
        self.send(GetSubscriptionCategories(subscription_id)).await
    }

    pub async fn sync_subscription_categories(
        &self,
        subscription_id: i32,
        categories: BTreeSet<i32>,
    ) -> Result<SyncOutcome, Error> {
        self.send(SyncSubscriptionCategories {
            subscription_id,
            categories,
        })
        .await
    }
}
