// demos/storefront_app/src/models/mod.rs

//! Contains data structures representing database entities.

// Declare child modules for each model
pub mod product;
pub mod subscriber;
pub mod user;

// Re-export the model structs for convenient access
pub use product::Product;
pub use subscriber::NewsletterSubscriber;
pub use user::User;
