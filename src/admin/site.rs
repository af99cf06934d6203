use actix_web::dev::HttpServiceFactory;
use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::directory::Site;
use crate::prelude::*;

pub fn service() -> impl HttpServiceFactory {
    web::resource("/sites").route(web::get().to(list))
}


#[derive(Debug, Serialize)]
struct ListResponse<'a> {
    sites: &'a [Site],
}

async fn list(data: web::Data<AppData>) -> HttpResponse {
    let sites = data.directory.sites();

    HttpResponse::Ok().json(ListResponse { sites: &sites })
}
