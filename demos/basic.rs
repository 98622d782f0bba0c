//! Minimal dispatcher on top of waymark: resolve, then answer 200, 404 or 405.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example basic
//!
//! Try:
//!   curl -i http://localhost:3000/users/42
//!   curl -i -X POST http://localhost:3000/users
//!   curl -i -X DELETE http://localhost:3000/users      # 405, Allow: POST
//!   curl -i http://localhost:3000/nowhere              # 404

use std::convert::Infallible;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info};
use waymark::{PathVariables, Resolution, Router, Routes};

type Handler = fn(&PathVariables) -> String;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let router: Router<Handler> = Router::new();
    router.build(
        Routes::new()
            .get("/users/{id}",                 get_user as Handler)
            .post("/users",                     create_user)
            .get("/users/{id}/posts/{post}",    get_post)
            .any("/echo",                       echo),
    )?;
    let router = Arc::new(router);

    let listener = TcpListener::bind("0.0.0.0:3000").await?;
    info!(addr = "0.0.0.0:3000", routes = router.entry_count(), "listening");

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(v) => v,
            Err(e) => {
                error!("accept error: {e}");
                continue;
            }
        };

        let router = Arc::clone(&router);
        tokio::spawn(async move {
            let svc = service_fn(move |req| {
                let router = Arc::clone(&router);
                async move { dispatch(&router, req) }
            });

            if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                .serve_connection(TokioIo::new(stream), svc)
                .await
            {
                error!(%peer, "connection error: {e}");
            }
        });
    }
}

fn dispatch(
    router: &Router<Handler>,
    req: hyper::Request<hyper::body::Incoming>,
) -> Result<http::Response<Full<Bytes>>, Infallible> {
    let resolution = router.resolve(req.uri().path(), req.method().as_str());

    let mut res = http::Response::builder().status(resolution.status());
    let body = match &resolution {
        Resolution::Found { handle, path_variables } => handle(path_variables),
        Resolution::NotFound => "not found".to_owned(),
        Resolution::MethodNotAllowed { .. } => {
            if let Some(allow) = resolution.allow_header() {
                res = res.header(http::header::ALLOW, allow);
            }
            "method not allowed".to_owned()
        }
    };

    Ok(res
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|_| http::Response::new(Full::new(Bytes::new()))))
}

// GET /users/{id}
fn get_user(vars: &PathVariables) -> String {
    format!(r#"{{"id":"{}"}}"#, vars.get("id").map_or("", String::as_str))
}

// POST /users
fn create_user(_vars: &PathVariables) -> String {
    r#"{"id":"99"}"#.to_owned()
}

// GET /users/{id}/posts/{post}
fn get_post(vars: &PathVariables) -> String {
    format!(
        r#"{{"user":"{}","post":"{}"}}"#,
        vars.get("id").map_or("", String::as_str),
        vars.get("post").map_or("", String::as_str),
    )
}

// any method on /echo
fn echo(_vars: &PathVariables) -> String {
    "echo".to_owned()
}
