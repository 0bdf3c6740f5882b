use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/events", get(stream_events))
}

/// Server-sent stream of directory events, one SSE event per
/// `DirectoryEvent` named after its `type`. A client that falls behind the
/// channel skips the events it missed.
async fn stream_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = state.event_bus().subscribe();
    tracing::debug!(
        subscribers = state.event_bus().subscriber_count(),
        "Event stream opened"
    );

    let events = BroadcastStream::new(receiver).filter_map(|message| match message {
        Ok(event) => match Event::default().event(event.kind()).json_data(&event) {
            Ok(sse) => Some(Ok(sse)),
            Err(err) => {
                tracing::warn!(error = %err, "Could not encode directory event");
                None
            }
        },
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!(skipped, "Event stream lagged; events dropped");
            None
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use foster_directory_core::canonical::SlugUpdate;
    use foster_directory_core::events::{DirectoryEvent, EventBus};
    use foster_directory_core::store::memory::MemoryStore;
    use foster_directory_core::LocationType;
    use tokio_stream::StreamExt;
    use tower::ServiceExt;

    use crate::routes::test_support::app_with_bus;

    #[tokio::test]
    async fn streams_published_events() {
        let bus = EventBus::new(16);
        let app = app_with_bus(Arc::new(MemoryStore::new()), bus.clone());

        let response = app
            .oneshot(Request::get("/v1/events").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/event-stream");
        assert_eq!(bus.subscriber_count(), 1);

        let delivered = bus.publish(DirectoryEvent::slug_updated(SlugUpdate {
            location_type: LocationType::Country,
            location_id: "w1".into(),
            canonical_slug: "/foster-agency/wales".into(),
        }));
        assert_eq!(delivered, 1);

        let mut body = response.into_body().into_data_stream();
        let chunk = tokio::time::timeout(Duration::from_secs(2), body.next())
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        let text = String::from_utf8(chunk.to_vec()).unwrap();
        assert!(text.contains("event: canonicalSlugUpdated"), "{text}");
        assert!(text.contains("\"canonicalSlug\":\"/foster-agency/wales\""), "{text}");
    }

    #[tokio::test]
    async fn closing_the_stream_unsubscribes() {
        let bus = EventBus::new(16);
        let app = app_with_bus(Arc::new(MemoryStore::new()), bus.clone());

        let response = app
            .oneshot(Request::get("/v1/events").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(bus.subscriber_count(), 1);
        drop(response);
        assert_eq!(bus.subscriber_count(), 0);
    }
}
