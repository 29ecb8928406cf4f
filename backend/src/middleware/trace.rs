//! Request correlation for the store API.
//!
//! [`Trace`] mints a [`TraceId`] per request, keeps it in a Tokio
//! task-local while the rest of the stack runs, and stamps it on the
//! response as `trace-id`. The failure responder reads the same value, so a
//! client report carrying the header can be matched to its log line.
//!
//! The task-local does not follow work onto `tokio::spawn`; wrap spawned
//! futures in [`TraceId::scope`].

use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tokio::task_local;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

/// Response header carrying the trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static ACTIVE: TraceId;
}

/// Identifier shared by every log line and the response of one request.
///
/// # Examples
/// ```
/// use store_backend::middleware::trace::TraceId;
///
/// fn log_lookup(product: u64) {
///     match TraceId::current() {
///         Some(trace_id) => tracing::debug!(%trace_id, product, "looking up product"),
///         None => tracing::debug!(product, "looking up product outside a request"),
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(pub(crate) Uuid);

impl TraceId {
    fn fresh() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier of the request being served, if any.
    pub fn current() -> Option<Self> {
        ACTIVE.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current identifier.
    ///
    /// # Examples
    /// ```
    /// use store_backend::middleware::trace::TraceId;
    ///
    /// let runtime = tokio::runtime::Builder::new_current_thread()
    ///     .build()
    ///     .expect("runtime");
    /// let trace_id: TraceId = "6f9619ff-8b86-d011-b42d-00c04fc964ff".parse().expect("uuid");
    /// let seen = runtime.block_on(TraceId::scope(trace_id, async { TraceId::current() }));
    /// assert_eq!(seen, Some(trace_id));
    /// ```
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        ACTIVE.scope(trace_id, fut).await
    }

    fn header_value(self) -> Option<HeaderValue> {
        match HeaderValue::from_str(&self.to_string()) {
            Ok(value) => Some(value),
            Err(err) => {
                error!(error = %err, trace_id = %self, "trace id is not a valid header value");
                None
            }
        }
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Middleware opening a `request` span per call and returning its
/// [`TraceId`] in the `trace-id` header, for successes and failures alike.
///
/// Wrap it outermost so the origin guard and the failure responder both run
/// inside the span.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use store_backend::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = TraceId::fresh();
        let span = info_span!(
            "request",
            %trace_id,
            method = %req.method(),
            path = req.path(),
        );
        let inner = TraceId::scope(trace_id, self.service.call(req));
        Box::pin(
            async move {
                let mut res = inner.await?;
                info!(status = res.status().as_u16(), "request completed");
                if let Some(value) = trace_id.header_value() {
                    res.headers_mut()
                        .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                }
                Ok(res)
            }
            .instrument(span),
        )
    }
}
