//! HTTP gateway accept loop

use std::{net::SocketAddr, sync::Arc};

use hyper::service::service_fn;
use hyper_util::{
    rt::{TokioExecutor, TokioIo},
    server::conn::auto,
};
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use super::{routing::router, Gateway};

/// Accept connections on `addr` until ctrl-c, serving each on its own task.
pub(crate) async fn serve(addr: SocketAddr, gateway: Arc<Gateway>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Starting HTTP Gateway");

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        let (stream, remote) = tokio::select! {
            accepted = listener.accept() => {
                match accepted {
                    Ok(conn) => conn,
                    Err(err) => {
                        error!(%err, "Failed to accept connection");
                        continue;
                    },
                }
            },
            _ = &mut shutdown => {
                info!("Stopping HTTP Gateway");
                return Ok(());
            },
        };

        let gateway = gateway.clone();
        tokio::spawn(async move {
            let service = service_fn(move |req| router(req, gateway.clone()));
            if let Err(err) = auto::Builder::new(TokioExecutor::new())
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                debug!(%remote, %err, "connection closed with error");
            }
        });
    }
}
