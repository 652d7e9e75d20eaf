//! SkillPath server entry point: configuration, logging and dependency
//! wiring.

use std::error::Error;
use std::sync::Arc;

use http::{HeaderName, HeaderValue};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use skillpath::adapters::auth::JwtSessionValidator;
use skillpath::adapters::cache::{InMemoryStepCache, RedisStepCache};
use skillpath::adapters::http::{
    api_router, ApiState, AuthoringAppState, ContentAppState, UsersAppState,
};
use skillpath::adapters::memory::{
    InMemoryContentStore, InMemoryProgressRepository, InMemoryUserDirectory,
};
use skillpath::adapters::postgres::{
    PostgresCatalogReader, PostgresContentAuthoring, PostgresProgressRepository,
    PostgresUserDirectory, PostgresVariantStore,
};
use skillpath::adapters::seed::ContentSeed;
use skillpath::application::handlers::authoring::{
    UpsertDefaultContentHandler, UpsertVariantHandler,
};
use skillpath::application::handlers::catalog::{GetModuleHandler, ListModulesHandler};
use skillpath::application::handlers::content::GetStepContentHandler;
use skillpath::application::handlers::progress::{ListProgressHandler, UpdateProgressHandler};
use skillpath::application::handlers::users::{ListUsersHandler, UpdateProfileHandler};
use skillpath::application::ContentAssembler;
use skillpath::config::{AppConfig, CacheBackend, StoreBackend};
use skillpath::ports::{
    CatalogReader, ContentAuthoring, ProgressRepository, SessionValidator, StepCache,
    UserDirectory, VariantStore,
};

type BoxError = Box<dyn Error + Send + Sync>;

struct Stores {
    variants: Arc<dyn VariantStore>,
    catalog: Arc<dyn CatalogReader>,
    authoring: Arc<dyn ContentAuthoring>,
    progress: Arc<dyn ProgressRepository>,
    users: Arc<dyn UserDirectory>,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let stores = build_stores(&config).await?;
    let cache = build_cache(&config).await?;
    let validator: Arc<dyn SessionValidator> = Arc::new(JwtSessionValidator::new(
        &config.auth.jwt_secret,
        config.auth.leeway_secs,
    ));

    let state = build_state(stores, cache, validator);
    let request_id = HeaderName::from_static("x-request-id");
    let app = api_router(state).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::new(request_id))
            .layer(CompressionLayer::new())
            .layer(TimeoutLayer::new(config.server.request_timeout()))
            .layer(cors_layer(&config)),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "SkillPath listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn build_stores(config: &AppConfig) -> Result<Stores, BoxError> {
    match config.content.store {
        StoreBackend::Memory => {
            let seed = match &config.content.seed_path {
                Some(path) => ContentSeed::load(path).await?,
                None => ContentSeed::demo()?,
            };
            let store = Arc::new(InMemoryContentStore::from_seed(&seed));
            tracing::info!(units = store.unit_count().await, "Using in-memory content store");

            Ok(Stores {
                variants: store.clone(),
                catalog: store.clone(),
                authoring: store,
                progress: Arc::new(InMemoryProgressRepository::new()),
                users: Arc::new(InMemoryUserDirectory::from_seed(&seed)?),
            })
        }
        StoreBackend::Postgres => {
            let url = config
                .database
                .url
                .as_deref()
                .ok_or("database.url is required for the postgres store")?;

            let pool = PgPoolOptions::new()
                .min_connections(config.database.min_connections)
                .max_connections(config.database.max_connections)
                .acquire_timeout(config.database.acquire_timeout())
                .idle_timeout(Some(config.database.idle_timeout()))
                .connect(url)
                .await?;
            tracing::info!("Connected to PostgreSQL");

            Ok(Stores {
                variants: Arc::new(PostgresVariantStore::new(pool.clone())),
                catalog: Arc::new(PostgresCatalogReader::new(pool.clone())),
                authoring: Arc::new(PostgresContentAuthoring::new(pool.clone())),
                progress: Arc::new(PostgresProgressRepository::new(pool.clone())),
                users: Arc::new(PostgresUserDirectory::new(pool)),
            })
        }
    }
}

async fn build_cache(config: &AppConfig) -> Result<Option<Arc<dyn StepCache>>, BoxError> {
    if !config.features.enable_step_cache {
        return Ok(None);
    }

    let ttl = config.features.step_cache_ttl();
    let cache: Arc<dyn StepCache> = match config.features.step_cache_backend {
        CacheBackend::Memory => Arc::new(InMemoryStepCache::new(ttl)),
        CacheBackend::Redis => {
            let url = config
                .redis
                .url
                .as_deref()
                .ok_or("redis.url is required for the redis step cache")?;
            let client = redis::Client::open(url)?;
            let conn = tokio::time::timeout(
                config.redis.timeout(),
                client.get_multiplexed_tokio_connection(),
            )
            .await??;
            Arc::new(RedisStepCache::new(conn, config.redis.key_prefix.clone(), ttl))
        }
    };

    tracing::info!(
        backend = ?config.features.step_cache_backend,
        ttl_secs = ttl.as_secs(),
        "Step cache enabled"
    );
    Ok(Some(cache))
}

fn build_state(
    stores: Stores,
    cache: Option<Arc<dyn StepCache>>,
    validator: Arc<dyn SessionValidator>,
) -> ApiState {
    let mut get_step_content =
        GetStepContentHandler::new(ContentAssembler::new(stores.variants.clone()));
    let mut upsert_default =
        UpsertDefaultContentHandler::new(stores.variants.clone(), stores.authoring.clone());
    let mut upsert_variant = UpsertVariantHandler::new(stores.authoring.clone());

    if let Some(cache) = cache {
        get_step_content = get_step_content.with_cache(cache.clone());
        upsert_default = upsert_default.with_cache(cache.clone());
        upsert_variant = upsert_variant.with_cache(cache);
    }

    ApiState {
        content: ContentAppState {
            get_step_content: Arc::new(get_step_content),
            list_modules: Arc::new(ListModulesHandler::new(stores.catalog.clone())),
            get_module: Arc::new(GetModuleHandler::new(stores.catalog.clone())),
            update_progress: Arc::new(UpdateProgressHandler::new(
                stores.catalog,
                stores.progress.clone(),
            )),
            list_progress: Arc::new(ListProgressHandler::new(stores.progress)),
        },
        authoring: AuthoringAppState {
            upsert_default: Arc::new(upsert_default),
            upsert_variant: Arc::new(upsert_variant),
        },
        users: UsersAppState {
            list_users: Arc::new(ListUsersHandler::new(stores.users.clone())),
            update_profile: Arc::new(UpdateProfileHandler::new(stores.users)),
        },
        auth: validator,
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
