//! GraphQL façade tests
//!
//! The façade reads plants over HTTP, so these tests run a real listener.

#![cfg(feature = "graphql")]

use anyhow::Result;
use axum_test::TestServer;
use conservatory::config::ServerConfig;
use conservatory::database::{establish_connection, get_database_url, setup_database};
use conservatory::server::app::create_app;
use serde_json::{json, Value};
use tempfile::TempDir;

const PLANTS_QUERY: &str = "{ plants { id name photos { id plantId date path } } }";

async fn test_config(dir: &TempDir, api_base_url: String) -> Result<(sea_orm::DatabaseConnection, ServerConfig)> {
    let db_path = dir.path().join("plants.db");
    let db = establish_connection(&get_database_url(db_path.to_str())).await?;
    setup_database(&db).await?;

    let config = ServerConfig {
        database: db_path.display().to_string(),
        photos_dir: dir.path().join("photos"),
        deleted_photos_dir: dir.path().join("deleted_photos"),
        api_base_url: Some(api_base_url),
        ..ServerConfig::default()
    };
    Ok((db, config))
}

#[tokio::test]
async fn test_plants_query_reshapes_rest_listing() -> Result<()> {
    let dir = TempDir::new()?;
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);

    let (db, config) = test_config(&dir, base_url.clone()).await?;
    let app = create_app(db, &config).await?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    let client = reqwest::Client::new();
    let plant: Value = client
        .post(format!("{}/plants", base_url))
        .json(&json!({ "name": "Fern" }))
        .send()
        .await?
        .json()
        .await?;
    let plant_id = plant["id"].as_i64().unwrap();

    let boundary = "graphql-test-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"plant_id\"\r\n\r\n{id}\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"date\"\r\n\r\n2024-02-01\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"photo\"; filename=\"fern.jpg\"\r\n\r\njpeg\r\n\
         --{b}--\r\n",
        b = boundary,
        id = plant_id
    );
    let response = client
        .post(format!("{}/photos", base_url))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(body)
        .send()
        .await?;
    assert!(response.status().is_success());

    let response: Value = client
        .post(format!("{}/graphql", base_url))
        .json(&json!({ "query": PLANTS_QUERY }))
        .send()
        .await?
        .json()
        .await?;

    assert!(response.get("errors").is_none(), "{}", response);
    let plants = response["data"]["plants"].as_array().unwrap();
    assert_eq!(plants.len(), 1);
    assert_eq!(plants[0]["id"], plant_id);
    assert_eq!(plants[0]["name"], "Fern");
    assert_eq!(plants[0]["photos"][0]["plantId"], plant_id);
    assert_eq!(plants[0]["photos"][0]["date"], "2024-02-01");
    assert_eq!(plants[0]["photos"][0]["path"], "static/2024-02-01-Fern");

    Ok(())
}

#[tokio::test]
async fn test_plants_query_is_empty_when_api_unreachable() -> Result<()> {
    let dir = TempDir::new()?;
    let closed = std::net::TcpListener::bind("127.0.0.1:0")?;
    let base_url = format!("http://{}", closed.local_addr()?);
    drop(closed);

    let (db, config) = test_config(&dir, base_url).await?;
    let server = TestServer::new(create_app(db, &config).await?)?;

    let response = server
        .post("/graphql")
        .json(&json!({ "query": PLANTS_QUERY }))
        .await;

    let body: Value = response.json();
    assert!(body.get("errors").is_none(), "{}", body);
    assert_eq!(body["data"]["plants"], json!([]));

    Ok(())
}

#[tokio::test]
async fn test_playground_is_served() -> Result<()> {
    let dir = TempDir::new()?;
    let (db, config) = test_config(&dir, "http://127.0.0.1:1".to_string()).await?;
    let server = TestServer::new(create_app(db, &config).await?)?;

    let response = server.get("/graphql").await;

    assert!(response.text().contains("GraphQL Playground"));
    Ok(())
}
