#![allow(dead_code)]

use axum::body::Body;
use axum::http::Request;
use stub_broker::{AppState, ServiceDescriptor, StaticBroker};

pub const BASE_URL: &str = "http://broker.apps.example.com";

pub fn descriptor(credentials: serde_json::Value) -> ServiceDescriptor {
    let credentials = match credentials {
        serde_json::Value::Object(map) => map,
        other => panic!("credentials must be an object, got {other}"),
    };
    ServiceDescriptor {
        service_name: "some-service-name".to_string(),
        service_plan_name: "shared".to_string(),
        credentials,
    }
}

pub fn state_with(descriptor: ServiceDescriptor) -> AppState {
    AppState::new(StaticBroker::new(descriptor, BASE_URL))
}

pub fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub async fn read_body(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body")
        .to_vec()
}

pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    serde_json::from_slice(&read_body(response).await).expect("json")
}
