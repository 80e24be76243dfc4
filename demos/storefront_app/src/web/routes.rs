// demos/storefront_app/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{
  auth_handlers, checkout_handlers, collection_handlers, newsletter_handlers, product_handlers, session_handlers,
};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Called in `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      // Session Routes. Every other endpoint expects the token these hand out.
      .service(
        web::scope("/session")
          .route("", web::post().to(session_handlers::create_session_handler))
          .route("", web::get().to(session_handlers::get_session_handler)),
      )
      // Authentication Routes
      .service(
        web::scope("/auth")
          .route("/signup", web::post().to(auth_handlers::signup_handler))
          .route("/signin", web::post().to(auth_handlers::signin_handler))
          .route("/signout", web::post().to(auth_handlers::signout_handler)),
      )
      // Catalog Routes
      .service(
        web::scope("/products")
          .route("", web::get().to(product_handlers::list_products_handler))
          .route("/{product_id}", web::get().to(product_handlers::get_product_handler)),
      )
      // Cart Routes
      .service(
        web::scope("/cart")
          .route("", web::get().to(collection_handlers::get_cart_handler))
          .route("", web::delete().to(collection_handlers::clear_cart_handler))
          .route("/items", web::post().to(collection_handlers::add_to_cart_handler))
          .route(
            "/items/{local_id}",
            web::patch().to(collection_handlers::update_cart_quantity_handler),
          )
          .route(
            "/items/{local_id}",
            web::delete().to(collection_handlers::remove_from_cart_handler),
          ),
      )
      // Likes Routes
      .service(
        web::scope("/likes")
          .route("", web::get().to(collection_handlers::get_likes_handler))
          .route("", web::delete().to(collection_handlers::clear_likes_handler))
          .route("/items", web::post().to(collection_handlers::add_to_likes_handler))
          .route(
            "/items/{local_id}",
            web::delete().to(collection_handlers::remove_from_likes_handler),
          ),
      )
      // Checkout Routes
      .service(web::scope("/checkout").route("", web::post().to(checkout_handlers::checkout_handler)))
      // Newsletter Routes
      .service(
        web::scope("/newsletter").route("/subscribe", web::post().to(newsletter_handlers::subscribe_handler)),
      ),
  );
}
