use actix_service::{Service, Transform};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpResponse};
use futures::future::{self, Either, Ready};
use std::task::{Context, Poll};

use crate::prelude::*;


pub struct RequireAuth;

pub struct RequireAuthMiddleware<S> {
    service: S,
}

impl<S, B> Transform<S> for RequireAuth
where
    S: Service<Request = ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Request = ServiceRequest;
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        future::ok(RequireAuthMiddleware { service })
    }
}

impl<S, B> Service for RequireAuthMiddleware<S>
where
    S: Service<Request = ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Request = ServiceRequest;
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Either<S::Future, Ready<Result<Self::Response, Self::Error>>>;

    fn poll_ready(&mut self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&mut self, req: ServiceRequest) -> Self::Future {
        let authorized = req
            .app_data::<web::Data<AppData>>()
            .and_then(|data| {
                req.headers()
                    .get("Authorization")
                    .map(|val| val == &format!("Bearer {}", data.cfg.auth_password))
            })
            .unwrap_or(false);

        if authorized {
            Either::Left(self.service.call(req))
        } else {
            Either::Right(future::ok(
                req.into_response(HttpResponse::Unauthorized().finish().into_body()),
            ))
        }
    }
}
