use crate::config::CONFIG;
use crate::error::ObserverError;
use crate::farm::observer::{AccountObserver, MarketObserver, SensorObserver};
use crate::farm::ConcurrentObserver;
use std::sync::Arc;
use tracing::{error, info, warn};
use warp::http::StatusCode;
use warp::Filter;

mod account_routes;
mod market_routes;
mod metric_routes;
mod sensor_routes;

pub fn routes(
    observer: &Arc<ConcurrentObserver>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let sensor = SensorObserver::new(observer.clone());
    let market = MarketObserver::new(observer.clone());
    let account = AccountObserver::new(observer.clone());

    sensor_routes::routes(&sensor)
        .or(market_routes::routes(&market))
        .or(account_routes::routes(&account))
        .or(metric_routes::routes(observer))
}

/// Serves the context until the observer shuts down
pub async fn dispatch_server_daemon(observer: Arc<ConcurrentObserver>) {
    let port = CONFIG.server_port();
    let shutdown_observer = observer.clone();
    let api = routes(&observer).with(warp::trace::request());

    match warp::serve(api).try_bind_with_graceful_shutdown(([0, 0, 0, 0], port), async move {
        shutdown_observer.wait_for_shutdown().await
    }) {
        Ok((addr, server)) => {
            info!("Starting webserver at: {}", addr);
            server.await;
            info!("Webserver stopped");
        }
        Err(e) => {
            error!("Failed binding port {}: {}", port, e);
            observer.shutdown();
        }
    }
}

fn build_response<T: serde::Serialize>(
    resp: Result<T, ObserverError>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match resp {
        Ok(data) => Ok(warp::reply::with_status(
            warp::reply::json(&data),
            StatusCode::OK,
        )),
        Err(ObserverError::User(err)) => {
            warn!("{}", err);
            Ok(warp::reply::with_status(
                warp::reply::json(&dto::ErrorResponseDto {
                    error: err.to_string(),
                }),
                StatusCode::BAD_REQUEST,
            ))
        }
        Err(ObserverError::Internal(err)) => {
            error!("{}", err);
            Ok(warp::reply::with_status(
                warp::reply::json(&dto::ErrorResponseDto {
                    error: err.to_string(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

pub mod dto {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ErrorResponseDto {
        pub error: String,
    }
}
