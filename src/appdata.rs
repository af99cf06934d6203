use actix::prelude::*;
use std::sync::Arc;

use crate::directory::Directory;
use crate::prelude::*;

#[derive(Clone)]
pub struct AppData {
    pub cfg: Config,
    pub directory: Arc<dyn Directory>,
    pub db: db::Helper,
}

impl AppData {
    pub fn new(
        cfg: Config,
        directory: Arc<dyn Directory>,
    ) -> Result<Self, diesel::result::ConnectionError> {
        // Test DB connection now
        drop(db::Executor::connect(&cfg.sqlite_db)?);

        let sqlite_db = cfg.sqlite_db.clone();
        let db_pool = SyncArbiter::start(2, move || {
            db::Executor::connect(&sqlite_db).expect("DB connection failed")
        });

        Ok(AppData {
            cfg,
            directory,
            db: db::Helper::new(db_pool),
        })
    }
}
