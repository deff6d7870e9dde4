use std::{convert::Infallible, sync::Arc};

use color_eyre::Result;
use http_body_util::{BodyExt, Full};
use hyper::{
    body::{Bytes, Incoming},
    header::HeaderValue,
    service::service_fn,
    Request, Response, StatusCode,
};
use hyper_util::{
    rt::{TokioExecutor, TokioIo},
    server::conn::auto::Builder,
};
use log::{debug, warn};
use phone_tz::{
    ApiRequest, ApiResponse, CountryTimeZoneProvider, PhoneNumberParser, TimeZoneService,
};
use tokio::net::TcpListener;

/// Accepts connections forever, serving each one on its own
/// task.
pub(crate) async fn run<P, C>(
    listener: TcpListener,
    service: Arc<TimeZoneService<P, C>>,
) -> Result<()>
where
    P: CountryTimeZoneProvider + Send + Sync + 'static,
    C: PhoneNumberParser + Send + Sync + 'static,
{
    loop {
        let (tcp_stream, remote_addr) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(err) => {
                warn!("failed to accept connection: {err}");
                continue;
            }
        };
        debug!("connection from {remote_addr}");

        let service = Arc::clone(&service);
        tokio::spawn(async move {
            let handler = service_fn(move |request| {
                let service = Arc::clone(&service);
                async move { respond(&*service, request).await }
            });

            let http_server = Builder::new(TokioExecutor::new());
            if let Err(err) = http_server
                .serve_connection(TokioIo::new(tcp_stream), handler)
                .await
            {
                warn!("connection from {remote_addr} failed: {err}");
            }
        });
    }
}

async fn respond<P, C>(
    service: &TimeZoneService<P, C>,
    request: Request<Incoming>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    P: CountryTimeZoneProvider,
    C: PhoneNumberParser,
{
    let (parts, body) = request.into_parts();
    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => {
            warn!("failed to read request body: {err}");
            return Ok(into_hyper(ApiResponse {
                status: StatusCode::BAD_REQUEST,
                body: b"{\n  \"error\": \"Bad request\"\n}".to_vec(),
            }));
        }
    };

    let api_request = ApiRequest {
        method: parts.method,
        path: parts.uri.path(),
        query: parts.uri.query(),
        body: &body,
    };
    Ok(into_hyper(service.handle(&api_request)))
}

fn into_hyper(api_response: ApiResponse) -> Response<Full<Bytes>> {
    let headers: Vec<_> = api_response.headers().collect();

    let mut response = Response::new(Full::new(Bytes::from(api_response.body)));
    *response.status_mut() = api_response.status;
    for (name, value) in headers {
        response
            .headers_mut()
            .insert(name, HeaderValue::from_static(value));
    }
    response
}
