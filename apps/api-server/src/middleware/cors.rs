//! Origin allow-list enforcement.

use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
};
use quill_shared::ErrorBody;
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::rc::Rc;

/// Rejects cross-origin requests from origins outside the allow-list with
/// a 403 and the standard error body. Requests without an `Origin` header
/// (same-origin, curl) pass through untouched; allowed origins continue on
/// to the CORS layer, which attaches the response headers.
pub struct OriginGuard {
    allowed: Rc<Vec<String>>,
}

impl OriginGuard {
    pub fn new(allowed: Vec<String>) -> Self {
        Self {
            allowed: Rc::new(allowed),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for OriginGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = OriginGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(OriginGuardService {
            service,
            allowed: self.allowed.clone(),
        }))
    }
}

pub struct OriginGuardService<S> {
    service: S,
    allowed: Rc<Vec<String>>,
}

impl<S, B> Service<ServiceRequest> for OriginGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let origin_allowed = match req
            .headers()
            .get(header::ORIGIN)
            .and_then(|value| value.to_str().ok())
        {
            Some(origin) => self.allowed.iter().any(|allowed| allowed == origin),
            None => true,
        };

        if !origin_allowed {
            let response = HttpResponse::Forbidden().json(ErrorBody::new("Not allowed by CORS"));

            let (http_req, _payload) = req.into_parts();
            let srv_response = ServiceResponse::new(http_req, response);

            return Box::pin(async move { Ok(srv_response.map_into_right_body()) });
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res.map_into_left_body())
        })
    }
}
