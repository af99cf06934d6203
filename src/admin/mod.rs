use actix_web::dev::HttpServiceFactory;
use actix_web::web;

mod category;
mod site;
mod subscription;
mod utils;

pub fn service() -> impl HttpServiceFactory {
    web::scope("/admin/api")
        .wrap(utils::RequireAuth)
        .service(site::service())
        .service(category::service())
        .service(subscription::service())
}
