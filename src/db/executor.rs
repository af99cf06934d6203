use actix::prelude::*;
use diesel::prelude::*;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::db::{self, models::*, schema, sync};

pub struct Executor {
    conn: Rc<SqliteConnection>,
}

impl Executor {
    pub fn connect(connspec: &str) -> ConnectionResult<Self> {
        let conn = SqliteConnection::establish(connspec)?;

        db::ensure_schema(&conn)
            .map_err(diesel::result::ConnectionError::CouldntSetupConfiguration)?;

        Ok(Executor {
            conn: Rc::new(conn),
        })
    }
}

impl Actor for Executor {
    type Context = SyncContext<Self>;
}


pub struct CreateSubscription(pub NewSubscription);

impl Message for CreateSubscription {
    type Result = diesel::QueryResult<Subscription>;
}

impl Handler<CreateSubscription> for Executor {
    type Result = <CreateSubscription as Message>::Result;

    fn handle(&mut self, msg: CreateSubscription, _: &mut Self::Context) -> Self::Result {
        self.conn.transaction(|| {
            use schema::subscriptions::dsl::*;

            diesel::insert_into(subscriptions)
                .values(&msg.0)
                .execute(self.conn.as_ref())?;

            subscriptions.order(id.desc()).first(self.conn.as_ref())
        })
    }
}


pub struct GetSubscription(pub i32);

impl Message for GetSubscription {
    type Result = diesel::QueryResult<Subscription>;
}

impl Handler<GetSubscription> for Executor {
    type Result = <GetSubscription as Message>::Result;

    fn handle(&mut self, msg: GetSubscription, _: &mut Self::Context) -> Self::Result {
        use schema::subscriptions::dsl::*;

        subscriptions.find(msg.0).get_result(self.conn.as_ref())
    }
}


pub struct FindSubscription(pub i32);

impl Message for FindSubscription {
    type Result = diesel::QueryResult<Option<Subscription>>;
}

impl Handler<FindSubscription> for Executor {
    type Result = <FindSubscription as Message>::Result;

    fn handle(&mut self, msg: FindSubscription, ctx: &mut Self::Context) -> Self::Result {
        self.handle(GetSubscription(msg.0), ctx).optional()
    }
}


pub struct GetSubscriptions;

impl Message for GetSubscriptions {
    type Result = diesel::QueryResult<Vec<Subscription>>;
}

impl Handler<GetSubscriptions> for Executor {
    type Result = <GetSubscriptions as Message>::Result;

    fn handle(&mut self, _: GetSubscriptions, _: &mut Self::Context) -> Self::Result {
        use schema::subscriptions::dsl::*;

        subscriptions.order(id.asc()).load(self.conn.as_ref())
    }
}


pub struct UpdateSubscription(pub Subscription);

impl Message for UpdateSubscription {
    type Result = diesel::QueryResult<Subscription>;
}

impl Handler<UpdateSubscription> for Executor {
    type Result = <UpdateSubscription as Message>::Result;

    fn handle(&mut self, msg: UpdateSubscription, _: &mut Self::Context) -> Self::Result {
        let subscription = msg.0;

        diesel::update(&subscription)
            .set(&subscription)
            .execute(self.conn.as_ref())
            .map(|_| subscription)
    }
}


pub struct TransformSubscription(pub i32, pub Box<dyn FnOnce(&mut Subscription) + Send>);

impl Message for TransformSubscription {
    type Result = diesel::QueryResult<Subscription>;
}

impl Handler<TransformSubscription> for Executor {
    type Result = <TransformSubscription as Message>::Result;

    fn handle(&mut self, msg: TransformSubscription, ctx: &mut Self::Context) -> Self::Result {
        let (subscription_id, transform) = (msg.0, msg.1);

        self.conn.clone().transaction(|| {
            let mut subscription = self.handle(GetSubscription(subscription_id), ctx)?;

            transform(&mut subscription);
            subscription.updated_at = chrono::Utc::now().naive_utc();

            self.handle(UpdateSubscription(subscription), ctx)
        })
    }
}


pub struct RemoveSubscription(pub i32);

impl Message for RemoveSubscription {
    type Result = diesel::QueryResult<()>;
}

impl Handler<RemoveSubscription> for Executor {
    type Result = <RemoveSubscription as Message>::Result;

    fn handle(&mut self, msg: RemoveSubscription, ctx: &mut Self::Context) -> Self::Result {
        self.conn.clone().transaction(|| {
            if let Some(subscription) = self.handle(GetSubscription(msg.0), ctx).optional()? {
                // Remove the subscription's category links, soft-deleted ones included
                {
                    use schema::subscription_categories::dsl::*;

                    diesel::delete(
                        subscription_categories.filter(subscription_id.eq(subscription.id)),
                    )
                    .execute(self.conn.as_ref())?;
                }

                use schema::subscriptions::dsl::*;

                diesel::delete(subscriptions.find(subscription.id))
                    .execute(self.conn.as_ref())?;
            }

            Ok(())
        })
    }
}


pub struct GetSubscriptionCategories(pub i32);

impl Message for GetSubscriptionCategories {
    type Result = diesel::QueryResult<Vec<SubscriptionCategory>>;
}

impl Handler<GetSubscriptionCategories> for Executor {
    type Result = <GetSubscriptionCategories as Message>::Result;

    fn handle(&mut self, msg: GetSubscriptionCategories, _: &mut Self::Context) -> Self::Result {
        use schema::subscription_categories::dsl::*;

        subscription_categories
            .filter(subscription_id.eq(msg.0))
            .filter(deleted_at.is_null())
            .order(id.asc())
            .load(self.conn.as_ref())
    }
}


pub struct SyncSubscriptionCategories {
    pub subscription_id: i32,
    pub categories: BTreeSet<i32>,
}

impl Message for SyncSubscriptionCategories {
    type Result = diesel::QueryResult<sync::SyncOutcome>;
}

impl Handler<SyncSubscriptionCategories> for Executor {
    type Result = <SyncSubscriptionCategories as Message>::Result;

    fn handle(&mut self, msg: SyncSubscriptionCategories, _: &mut Self::Context) -> Self::Result {
        sync::sync_categories(self.conn.as_ref(), msg.subscription_id, &msg.categories)
    }
}
