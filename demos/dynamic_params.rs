//! Demonstrates default, computed and per-request query parameters.
//!
//! This example shows how to:
//! - Create a client with a computed default parameter
//! - Feed the computed parameter through request values
//! - Override or disable parameters for a single request
//! - Inspect a resolved URL without sending anything
//!
//! Run with: `cargo run --example dynamic_params`

use paramfetch::{Client, Error, ParamValue, RequestDescriptor, TransportOptions};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Post {
    #[serde(rename = "userId")]
    user_id: u32,
    id: u32,
    title: String,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("paramfetch=debug,dynamic_params=info")
        .init();

    let client = Client::builder()
        .base_url("https://jsonplaceholder.typicode.com/posts")
        .param(
            "userId",
            ParamValue::computed(|ctx| match ctx.value("user") {
                Some(user) => user.to_string(),
                None => "1".to_string(),
            }),
        )
        .build()?;

    println!("=== Resolution only ===");
    let resolved = client.resolve(RequestDescriptor::new().value("user", 3))?;
    println!("{} {}", resolved.method, resolved.url);
    println!();

    println!("=== Computed parameter ===");
    let response = client.get(RequestDescriptor::new().value("user", 2)).await?;
    let posts: Vec<Post> = response.json().await?;
    println!("User 2 has {} posts", posts.len());
    println!();

    println!("=== Request override ===");
    let response = client.get(RequestDescriptor::new().param("userId", 5)).await?;
    let posts: Vec<Post> = response.json().await?;
    println!("User 5 has {} posts", posts.len());
    println!();

    println!("=== Parameters disabled ===");
    let response = client
        .post(
            RequestDescriptor::new()
                .without_params()
                .transport(TransportOptions::new().with_json(&json!({
                    "title": "My New Post",
                    "body": "This is the content of my new post!",
                    "userId": 1
                }))?),
        )
        .await?;
    println!("Status: {}", response.status());
    println!("Body: {}", response.text().await?);

    Ok(())
}
