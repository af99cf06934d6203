pub(crate) use crate::appdata::AppData;
pub(crate) use crate::config::Config;
pub(crate) use crate::{db, directory};
