//! Best-effort error reporting, decoupled from response shaping.
//!
//! [`ApiError::into_response`] stashes the [`NormalizedError`] in the
//! response extensions; the outermost [`ErrorReportingLayer`] hands it to an
//! injected [`ErrorReporter`]. The report never blocks or fails the response.

use axum::http::{Request, Response};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

use super::error::NormalizedError;

/// Sink for normalized error records. Injected so tests can substitute a
/// capturing stub for the tracing-backed default.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &NormalizedError);
}

/// Default reporter: structured log records via `tracing`.
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, error: &NormalizedError) {
        if error.status.is_server_error() {
            tracing::error!(
                kind = error.kind,
                status = error.status.as_u16(),
                cause = error.cause.as_deref(),
                "request failed"
            );
        } else {
            tracing::warn!(
                kind = error.kind,
                status = error.status.as_u16(),
                "request rejected"
            );
        }
    }
}

/// Layer that reports normalized errors after the response is produced.
#[derive(Clone)]
pub struct ErrorReportingLayer {
    reporter: Arc<dyn ErrorReporter>,
}

impl ErrorReportingLayer {
    pub fn new(reporter: Arc<dyn ErrorReporter>) -> Self {
        Self { reporter }
    }
}

impl<S> Layer<S> for ErrorReportingLayer {
    type Service = ErrorReportingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ErrorReportingService {
            inner,
            reporter: self.reporter.clone(),
        }
    }
}

#[derive(Clone)]
pub struct ErrorReportingService<S> {
    inner: S,
    reporter: Arc<dyn ErrorReporter>,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for ErrorReportingService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future =
        Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let mut inner = self.inner.clone();
        let reporter = self.reporter.clone();

        Box::pin(async move {
            let response = inner.call(req).await?;

            if let Some(error) = response.extensions().get::<NormalizedError>() {
                reporter.report(error);
            }

            Ok(response)
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::Mutex;

    /// Captures reports for assertions.
    #[derive(Default)]
    pub struct CapturingReporter {
        pub reports: Mutex<Vec<NormalizedError>>,
    }

    impl ErrorReporter for CapturingReporter {
        fn report(&self, error: &NormalizedError) {
            self.reports
                .lock()
                .unwrap_or_else(|p| p.into_inner())
                .push(error.clone());
        }
    }
}
