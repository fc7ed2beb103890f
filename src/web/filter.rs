//! Tower middleware driving the scope interceptor around an inner service.

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;
use tower::{Layer, Service};

use crate::config::ScopeConfig;
use crate::context::RequestContext;
use crate::interceptor::ScopeInterceptor;
use crate::registry::ResourceRegistry;
use crate::resource::ResourceFactory;

/// Layer attaching request-scoped resource binding to a service stack.
#[derive(Clone)]
pub struct ScopeLayer {
    registry: Arc<dyn ResourceRegistry>,
    factory: Arc<dyn ResourceFactory>,
    config: Arc<ScopeConfig>,
}

impl ScopeLayer {
    /// Create a layer binding one resource from `factory` per request.
    pub fn new(
        registry: Arc<dyn ResourceRegistry>,
        factory: Arc<dyn ResourceFactory>,
        config: ScopeConfig,
    ) -> Self {
        Self {
            registry,
            factory,
            config: Arc::new(config),
        }
    }
}

impl<S> Layer<S> for ScopeLayer {
    type Service = ScopeService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ScopeService {
            inner,
            registry: self.registry.clone(),
            factory: self.factory.clone(),
            config: self.config.clone(),
        }
    }
}

/// Per-request driver of the scope interceptor around an inner service.
#[derive(Clone)]
pub struct ScopeService<S> {
    inner: S,
    registry: Arc<dyn ResourceRegistry>,
    factory: Arc<dyn ResourceFactory>,
    config: Arc<ScopeConfig>,
}

impl<S> Service<Request<Body>> for ScopeService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Response, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), S::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        // The clone takes over; the service driven to readiness does the work.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let registry = self.registry.clone();
        let factory = self.factory.clone();
        let config = self.config.clone();

        Box::pin(async move {
            let ctx = RequestContext::new();

            let resource = match factory.open() {
                Ok(resource) => resource,
                Err(err) => {
                    tracing::error!(
                        request_id = %ctx.id(),
                        error = %err,
                        "failed to open scoped resource"
                    );
                    return Ok(StatusCode::INTERNAL_SERVER_ERROR.into_response());
                }
            };

            let key = factory.registry_key().for_request(&ctx.id());
            let interceptor =
                ScopeInterceptor::with_policy(registry, key, resource, config.policy.clone());

            if let Err(err) = interceptor.bind_resource(&ctx) {
                tracing::error!(
                    request_id = %ctx.id(),
                    error = %err,
                    "failed to bind scoped resource"
                );
                return Ok(StatusCode::INTERNAL_SERVER_ERROR.into_response());
            }

            let outcome = tokio::time::timeout(config.timeouts.request(), inner.call(request)).await;

            if let Err(err) = interceptor.unbind_resource(&ctx) {
                tracing::warn!(
                    request_id = %ctx.id(),
                    error = %err,
                    "failed to unbind scoped resource"
                );
            }

            let response = match outcome {
                Ok(Ok(response)) => {
                    if response.status().is_server_error() {
                        interceptor.record_error();
                    }
                    Some(response)
                }
                Ok(Err(err)) => {
                    interceptor.record_error();
                    finish(&interceptor, &ctx);
                    return Err(err);
                }
                Err(_elapsed) => {
                    tracing::debug!(
                        request_id = %ctx.id(),
                        deadline_secs = config.timeouts.request_secs,
                        "deferred processing deadline exceeded"
                    );
                    interceptor.record_timeout();
                    None
                }
            };

            finish(&interceptor, &ctx);

            match response {
                Some(response) => Ok(response),
                None => Ok((
                    StatusCode::GATEWAY_TIMEOUT,
                    "deferred processing deadline exceeded",
                )
                    .into_response()),
            }
        })
    }
}

/// Drive the completion hook. The filter is the completion-hook caller,
/// so close failures end here: logged with the request id, never folded
/// into the response.
fn finish(interceptor: &ScopeInterceptor, ctx: &RequestContext) {
    if let Err(err) = interceptor.complete(ctx) {
        tracing::error!(
            request_id = %ctx.id(),
            error = %err,
            "failed to close scoped resource"
        );
    }
}
