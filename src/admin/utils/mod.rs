mod require_auth;
pub mod site_id;

pub use require_auth::RequireAuth;
