use actix_web::{dev, http, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::prelude::*;

#[derive(Debug, Deserialize)]
struct LoginData {
    username: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    token: String,
}

pub fn service() -> impl dev::HttpServiceFactory {
    web::scope("/accounts").route("/login", web::post().to(login))
}

async fn login(data: web::Data<AppData>, form: web::Json<LoginData>) -> HttpResponse {
    if form.username == data.cfg.auth_username && form.password == data.cfg.auth_password {
        HttpResponse::Ok().json(LoginResponse {
            token: form.into_inner().password,
        })
    } else {
        HttpResponse::Forbidden()
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(r#"{"error": "BadCredentials"}"#)
    }
}
