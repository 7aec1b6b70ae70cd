//! `_method` override for HTML forms.

use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::Method,
    web,
};
use std::future::{Ready, ready};

use scribe_shared::dto::MethodOverrideQuery;

/// Lets a `POST ...?_method=PUT` (or `PATCH`/`DELETE`) reach the matching
/// route. Must wrap the app so it runs before routing.
pub struct MethodOverride;

impl<S, B> Transform<S, ServiceRequest> for MethodOverride
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = MethodOverrideService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MethodOverrideService { service }))
    }
}

pub struct MethodOverrideService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for MethodOverrideService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if req.method() == Method::POST {
            if let Some(method) = overridden_method(req.query_string()) {
                tracing::debug!(%method, path = %req.path(), "Method override");
                req.head_mut().method = method;
            }
        }

        self.service.call(req)
    }
}

fn overridden_method(query: &str) -> Option<Method> {
    let query = web::Query::<MethodOverrideQuery>::from_query(query).ok()?;

    match query.method.as_deref()?.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overridden_method() {
        assert_eq!(overridden_method("_method=PUT"), Some(Method::PUT));
        assert_eq!(overridden_method("x=1&_method=delete"), Some(Method::DELETE));
        assert_eq!(overridden_method("_method=GET"), None);
        assert_eq!(overridden_method(""), None);
    }
}
