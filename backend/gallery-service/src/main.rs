use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gallery_service::config::Config;
use gallery_service::handlers;
use gallery_service::services::{
    CommentService, FeedService, FollowService, LikeService, PostService, SearchService,
    UserService,
};
use gallery_service::store::{EntityStore, MemoryStore};

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate =
            signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = terminate.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    }
}

async fn health_summary() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "gallery-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .ok();

    info!("Starting gallery-service");

    let config = Config::from_env()?;
    let bind_address = format!("{}:{}", config.app.host, config.app.http_port);

    let store: Arc<dyn EntityStore> = Arc::new(MemoryStore::new());

    let users = web::Data::new(UserService::new(store.clone()));
    let follows = web::Data::new(FollowService::new(store.clone()));
    let likes = web::Data::new(LikeService::new(store.clone()));
    let comments = web::Data::new(CommentService::new(store.clone()));
    let posts = web::Data::new(PostService::new(store.clone()));
    let tags = web::Data::new(gallery_service::services::TagService::new(store.clone()));
    let feed = web::Data::new(FeedService::new(store.clone(), config.feed));
    let searcher = web::Data::new(SearchService::new(store.clone(), config.search));

    let cors_origins = config.cors.allowed_origins.clone();

    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in cors_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(users.clone())
            .app_data(follows.clone())
            .app_data(likes.clone())
            .app_data(comments.clone())
            .app_data(posts.clone())
            .app_data(tags.clone())
            .app_data(feed.clone())
            .app_data(searcher.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/api/v1/health", web::get().to(health_summary))
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/users")
                            .service(web::resource("").route(web::post().to(handlers::register)))
                            .service(
                                web::resource("/me")
                                    .route(web::get().to(handlers::get_me))
                                    .route(web::put().to(handlers::update_me)),
                            )
                            .service(
                                web::resource("/{user_id}")
                                    .route(web::get().to(handlers::get_user)),
                            )
                            .route(
                                "/{user_id}/follow",
                                web::post().to(handlers::toggle_follow),
                            )
                            .route(
                                "/{user_id}/followers",
                                web::get().to(handlers::get_followers),
                            )
                            .route(
                                "/{user_id}/following",
                                web::get().to(handlers::get_following),
                            ),
                    )
                    .service(
                        web::scope("/posts")
                            .service(web::resource("").route(web::post().to(handlers::create_post)))
                            .service(
                                web::resource("/user/{user_id}")
                                    .route(web::get().to(handlers::get_user_posts)),
                            )
                            .service(
                                web::resource("/{post_id}")
                                    .route(web::get().to(handlers::get_post))
                                    .route(web::delete().to(handlers::delete_post)),
                            )
                            .route("/{post_id}/like", web::post().to(handlers::toggle_like))
                            .route(
                                "/{post_id}/comments",
                                web::post().to(handlers::add_comment),
                            )
                            .route("/{post_id}/tags", web::post().to(handlers::attach_tags)),
                    )
                    .service(web::scope("/feed").route("", web::get().to(handlers::get_feed)))
                    .route("/tags/{tag_name}", web::get().to(handlers::tag_feed))
                    .route("/search", web::get().to(handlers::search)),
            )
    })
    .bind(&bind_address)?
    .run();

    info!(address = %bind_address, env = %config.app.env, "HTTP server started");

    let server_handle = server.handle();

    tokio::select! {
        result = server => {
            result?;
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received, stopping server");
            server_handle.stop(true).await;
        }
    }

    Ok(())
}
