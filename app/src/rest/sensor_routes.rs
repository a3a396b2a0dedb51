use super::build_response;
use crate::farm::observer::SensorObserver;
use warp::Filter;

pub fn routes(
    observer: &SensorObserver,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    sensor_status(observer.clone())
        .or(update_sensor(observer.clone()))
        .or(irrigation_status(observer.clone()))
        .or(activate_irrigation(observer.clone()))
}

/// GET api/sensor
///
/// Fetch the current readings
///
/// Returns a `SensorSnapshot`, which holds the
/// - raw sensor data
/// - classified status per sensor
/// - current recommendations
fn sensor_status(
    observer: SensorObserver,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || observer.clone())
        .and(warp::path!("api" / "sensor"))
        .and(warp::get())
        .and_then(|observer: SensorObserver| async move {
            let snapshot = observer.snapshot().await;
            build_response(Ok(snapshot))
        })
        .boxed()
}

/// POST api/sensor/:id
///
/// Manually override a sensor value
///
/// Returns the updated `SensorSnapshot`, 400 for unknown sensors
fn update_sensor(
    observer: SensorObserver,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || observer.clone())
        .and(warp::path!("api" / "sensor" / String))
        .and(warp::post())
        .and(warp::body::json())
        .and_then(
            |observer: SensorObserver, sensor_id: String, body: dto::SensorValueDto| async move {
                let resp = observer.update_value(&sensor_id, body.value).await;
                build_response(resp)
            },
        )
        .boxed()
}

/// GET api/irrigation
///
/// Returns the irrigation flag, the tank level and the zones
fn irrigation_status(
    observer: SensorObserver,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || observer.clone())
        .and(warp::path!("api" / "irrigation"))
        .and(warp::get())
        .and_then(|observer: SensorObserver| async move {
            let snapshot = observer.irrigation().await;
            build_response(Ok(snapshot))
        })
        .boxed()
}

/// POST api/irrigation
///
/// Start irrigating, it stops automatically
///
/// Returns 400 if irrigation is already running
fn activate_irrigation(
    observer: SensorObserver,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || observer.clone())
        .and(warp::path!("api" / "irrigation"))
        .and(warp::post())
        .and_then(|observer: SensorObserver| async move {
            let resp = observer.activate_irrigation().await;
            build_response(resp)
        })
        .boxed()
}

///
/// DTO
///
pub mod dto {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SensorValueDto {
        pub value: f64,
    }
}
