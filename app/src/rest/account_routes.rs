use super::build_response;
use crate::farm::observer::AccountObserver;
use fieldsim_core::FarmProfileUpdate;
use warp::Filter;

pub fn routes(
    observer: &AccountObserver,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    notifications(observer.clone())
        .or(mark_read(observer.clone()))
        .or(profile(observer.clone()))
        .or(update_profile(observer.clone()))
}

/// GET api/notification
///
/// Returns the notifications, newest first, and the unread count
fn notifications(
    observer: AccountObserver,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || observer.clone())
        .and(warp::path!("api" / "notification"))
        .and(warp::get())
        .and_then(|observer: AccountObserver| async move {
            let feed = observer.notifications().await;
            build_response(Ok(feed))
        })
        .boxed()
}

/// POST api/notification/:id/read
fn mark_read(
    observer: AccountObserver,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || observer.clone())
        .and(warp::path!("api" / "notification" / String / "read"))
        .and(warp::post())
        .and_then(|observer: AccountObserver, id: String| async move {
            let resp = observer.mark_read(&id).await;
            build_response(resp)
        })
        .boxed()
}

/// GET api/profile
fn profile(
    observer: AccountObserver,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || observer.clone())
        .and(warp::path!("api" / "profile"))
        .and(warp::get())
        .and_then(|observer: AccountObserver| async move {
            let profile = observer.profile().await;
            build_response(Ok(profile))
        })
        .boxed()
}

/// POST api/profile
///
/// Merges the present fields into the profile, absent fields stay untouched
fn update_profile(
    observer: AccountObserver,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || observer.clone())
        .and(warp::path!("api" / "profile"))
        .and(warp::post())
        .and(warp::body::json())
        .and_then(
            |observer: AccountObserver, update: FarmProfileUpdate| async move {
                let profile = observer.update_profile(update).await;
                build_response(Ok(profile))
            },
        )
        .boxed()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::farm::observer::account::{NotificationFeed, NotificationView};
    use crate::rest::test::build_mocked_observer;
    use fieldsim_core::FarmProfile;

    #[tokio::test]
    async fn test_rest_notifications() {
        let observer = AccountObserver::new(build_mocked_observer());
        let routes = routes(&observer);

        let res = warp::test::request()
            .path("/api/notification")
            .reply(&routes)
            .await;

        assert_eq!(res.status(), 200);
        let feed: NotificationFeed = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(feed.unread, 2);
        assert_eq!(feed.notifications.len(), 3);
    }

    #[tokio::test]
    async fn test_rest_mark_read() {
        // Prepare
        let observer = AccountObserver::new(build_mocked_observer());
        let routes = routes(&observer);

        // Execute
        let res = warp::test::request()
            .path("/api/notification/2/read")
            .method("POST")
            .reply(&routes)
            .await;
        let unknown = warp::test::request()
            .path("/api/notification/missing/read")
            .method("POST")
            .reply(&routes)
            .await;

        // Validate
        assert_eq!(res.status(), 200);
        let view: NotificationView = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(view.notification.id, "2");
        assert!(view.notification.read);
        assert_eq!(unknown.status(), 400);
        assert_eq!(observer.notifications().await.unread, 1);
    }

    #[tokio::test]
    async fn test_rest_update_profile() {
        // Prepare
        let observer = AccountObserver::new(build_mocked_observer());
        let routes = routes(&observer);

        // Execute
        let res = warp::test::request()
            .path("/api/profile")
            .method("POST")
            .json(&serde_json::json!({ "farm_name": "Blue Ridge Farm" }))
            .reply(&routes)
            .await;

        // Validate
        assert_eq!(res.status(), 200);
        let profile: FarmProfile = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(profile.farm_name, "Blue Ridge Farm");
        assert_eq!(profile.sustainability_goal, FarmProfile::default().sustainability_goal);
    }
}
