use super::build_response;
use crate::farm::observer::MarketObserver;
use warp::Filter;

pub fn routes(
    observer: &MarketObserver,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    market_status(observer.clone()).or(sell_credits(observer.clone()))
}

/// GET api/market
///
/// Returns the credit ledger, the buyer offers and the earnings so far
fn market_status(
    observer: MarketObserver,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || observer.clone())
        .and(warp::path!("api" / "market"))
        .and(warp::get())
        .and_then(|observer: MarketObserver| async move {
            let snapshot = observer.snapshot().await;
            build_response(Ok(snapshot))
        })
        .boxed()
}

/// POST api/market/:offer_id/sell
///
/// Sells `quantity` credits to the given offer
///
/// Returns the `Sale`, 400 if the offer is unknown or the quantity invalid
fn sell_credits(
    observer: MarketObserver,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || observer.clone())
        .and(warp::path!("api" / "market" / String / "sell"))
        .and(warp::post())
        .and(warp::body::json())
        .and_then(
            |observer: MarketObserver, offer_id: String, body: dto::SellDto| async move {
                let resp = observer.sell(&offer_id, body.quantity).await;
                build_response(resp)
            },
        )
        .boxed()
}

///
/// DTO
///
pub mod dto {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SellDto {
        pub quantity: u32,
    }
}
