use anyhow::{anyhow, Result};
use axum::{
    extract::DefaultBodyLimit,
    response::Json,
    routing::get,
    Router,
};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use utoipa::OpenApi;

#[cfg(feature = "graphql")]
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
#[cfg(feature = "graphql")]
use axum::extract::State;
#[cfg(feature = "graphql")]
use crate::graphql::{build_schema, GraphQLContext, GraphQLSchema, PlantsClient};

use super::handlers::{health, notes, photos, plants, waterings};
use super::openapi::ApiDoc;
use crate::config::ServerConfig;
use crate::services::{NoteService, PhotoService, PhotoStorage, PlantService, WateringService};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub storage: PhotoStorage,
    #[cfg(feature = "graphql")]
    pub graphql_schema: GraphQLSchema,
}

impl AppState {
    pub fn plant_service(&self) -> PlantService {
        PlantService::new(self.db.clone(), self.storage.clone())
    }

    pub fn watering_service(&self) -> WateringService {
        WateringService::new(self.db.clone())
    }

    pub fn photo_service(&self) -> PhotoService {
        PhotoService::new(self.db.clone(), self.storage.clone())
    }

    pub fn note_service(&self) -> NoteService {
        NoteService::new(self.db.clone())
    }
}

pub async fn create_app(db: DatabaseConnection, config: &ServerConfig) -> Result<Router> {
    let storage = config.photo_storage();
    storage.ensure_dirs().await.map_err(|e| {
        anyhow!(
            "Failed to create photo directory {}: {}",
            storage.photos_dir().display(),
            e
        )
    })?;

    #[cfg(feature = "graphql")]
    let graphql_schema = {
        let plants_client = PlantsClient::new(config.api_base_url())
            .map_err(|e| anyhow!("Failed to build GraphQL HTTP client: {}", e))?;
        build_schema(GraphQLContext::new(plants_client))
    };

    let state = AppState {
        db,
        storage: storage.clone(),
        #[cfg(feature = "graphql")]
        graphql_schema,
    };

    let cors = match config.cors_origin.as_deref() {
        Some(origin) if origin != "*" => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<axum::http::HeaderValue>()
                    .map_err(|e| anyhow!("Invalid CORS origin: {}", e))?,
            )
            .allow_methods(Any)
            .allow_headers(Any),
        _ => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let mut app = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(api_routes());

    #[cfg(feature = "graphql")]
    {
        app = app.route("/graphql", get(graphql_playground).post(graphql_handler));
    }

    let app = app
        .nest_service("/static", ServeDir::new(storage.photos_dir()))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state);

    Ok(app)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // Plant routes
        .route("/plants", get(plants::list_plants).post(plants::create_plant))
        .route(
            "/plants/:id",
            get(plants::get_plant)
                .patch(plants::update_plant)
                .delete(plants::delete_plant),
        )
        .route("/plants/:id/photos", get(plants::list_plant_photos))
        .route("/plants/:id/waterings", get(plants::list_plant_waterings))
        .route("/plants/:id/notes", get(plants::list_plant_notes))
        .route("/plants/:id/children", get(plants::list_plant_children))
        // Watering routes
        .route(
            "/waterings",
            get(waterings::list_waterings).post(waterings::create_watering),
        )
        .route(
            "/waterings/:id",
            axum::routing::delete(waterings::delete_watering),
        )
        // Photo routes
        .route("/photos", get(photos::list_photos).post(photos::upload_photo))
        .route("/photos/:id", axum::routing::delete(photos::delete_photo))
        // Note routes
        .route("/notes", axum::routing::post(notes::create_note))
        .route(
            "/notes/:id",
            get(notes::get_note)
                .patch(notes::update_note)
                .delete(notes::delete_note),
        )
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(feature = "graphql")]
async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    tracing::debug!("GraphQL request received");
    let response = state.graphql_schema.execute(req.into_inner()).await;
    tracing::debug!("GraphQL request completed");
    response.into()
}

#[cfg(feature = "graphql")]
async fn graphql_playground() -> impl axum::response::IntoResponse {
    axum::response::Html(async_graphql::http::playground_source(
        async_graphql::http::GraphQLPlaygroundConfig::new("/graphql"),
    ))
}
