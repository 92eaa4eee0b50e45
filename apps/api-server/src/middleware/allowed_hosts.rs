//! Host header validation middleware.
//!
//! Requests whose `Host` is not on the configured allow-list are answered
//! with `400 {"error": "Invalid host header."}` before reaching a handler.

use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::rc::Rc;

use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
};

use inkwell_shared::ErrorResponse;

/// Permitted host names.
///
/// `*` allows any host, `.example.com` allows the domain and every
/// subdomain, anything else must match exactly. Matching ignores case and
/// any port.
#[derive(Debug, Clone, Default)]
pub struct AllowedHosts {
    patterns: Vec<String>,
}

impl AllowedHosts {
    /// Parse a comma-separated list; an empty list allows any host.
    pub fn parse(list: &str) -> Self {
        let patterns = list
            .split(',')
            .map(|host| host.trim().to_ascii_lowercase())
            .filter(|host| !host.is_empty())
            .collect();
        Self { patterns }
    }

    pub fn allows_any(&self) -> bool {
        self.patterns.is_empty() || self.patterns.iter().any(|p| p == "*")
    }

    /// Check a `Host` header value such as `blog.example.com:8080`.
    pub fn is_allowed(&self, host: &str) -> bool {
        if self.allows_any() {
            return true;
        }

        let domain = strip_port(host).to_ascii_lowercase();
        let domain = domain.trim_end_matches('.');
        self.patterns.iter().any(|pattern| match pattern.strip_prefix('.') {
            Some(suffix) => domain == suffix || domain.ends_with(pattern.as_str()),
            None => domain == pattern,
        })
    }
}

fn strip_port(host: &str) -> &str {
    if let Some(rest) = host.strip_prefix('[') {
        // IPv6 literal: keep the brackets, drop what follows the closing one.
        return rest.find(']').map_or(host, |end| &host[..end + 2]);
    }
    host.rsplit_once(':').map_or(host, |(name, _)| name)
}

/// Middleware rejecting requests for hosts outside the allow-list.
pub struct AllowedHostsMiddleware {
    hosts: Rc<AllowedHosts>,
}

impl AllowedHostsMiddleware {
    pub fn new(hosts: AllowedHosts) -> Self {
        Self {
            hosts: Rc::new(hosts),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AllowedHostsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AllowedHostsService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AllowedHostsService {
            service,
            hosts: Rc::clone(&self.hosts),
        }))
    }
}

pub struct AllowedHostsService<S> {
    service: S,
    hosts: Rc<AllowedHosts>,
}

impl<S, B> Service<ServiceRequest> for AllowedHostsService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let host = req
            .headers()
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
            .or_else(|| req.uri().authority().map(|a| a.to_string()));

        let allowed = match &host {
            Some(host) => self.hosts.is_allowed(host),
            None => self.hosts.allows_any(),
        };

        if !allowed {
            tracing::warn!(host = host.as_deref().unwrap_or(""), "Rejected disallowed host");
            let response = HttpResponse::BadRequest().json(ErrorResponse::invalid_host());
            let res = req.into_response(response).map_into_right_body();
            return Box::pin(async move { Ok(res) });
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}
