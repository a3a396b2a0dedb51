use super::build_response;
use crate::farm::ConcurrentObserver;
use std::sync::Arc;
use warp::Filter;

pub fn routes(
    observer: &Arc<ConcurrentObserver>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    health(observer.clone())
}

fn health(
    observer: Arc<ConcurrentObserver>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || observer.clone())
        .and(warp::path!("api" / "health"))
        .and(warp::get())
        .and_then(|observer: Arc<ConcurrentObserver>| async move {
            let state = observer.state.read().await;
            let ret = dto::HealthyDto {
                healthy: !observer.is_shut_down(),
                core_version: fieldsim_core::CORE_VERSION,
                tick_count: state.tick_count(),
                irrigation_active: state.irrigation_active(),
                settlement_policy: observer.settings.settlement_policy,
            };
            build_response(Ok(ret))
        })
        .boxed()
}

mod dto {
    use fieldsim_core::SettlementPolicy;
    use serde::Serialize;
    #[derive(Debug, Serialize)]
    pub struct HealthyDto {
        pub healthy: bool,
        pub core_version: &'static str,
        pub tick_count: u64,
        pub irrigation_active: bool,
        pub settlement_policy: SettlementPolicy,
    }
}
