// demos/storefront_app/src/db.rs

//! Startup seeding for the product catalog. Thrift listings are one-off
//! by nature, so the seed only runs against an empty table.

use sqlx::PgPool;
use tracing::{info, instrument};

use crate::errors::AppError;

struct SeedListing {
  title: &'static str,
  brand: &'static str,
  description: Option<&'static str>,
  price_cents: i32,
  size: &'static str,
  condition: &'static str,
  sex: Option<&'static str>,
  category: Option<&'static str>,
  image_url: &'static str,
}

fn seed_listings() -> Vec<SeedListing> {
  vec![
    SeedListing {
      title: "Wool Overcoat",
      brand: "Harris & Frank",
      description: Some("Heavy charcoal wool, fully lined. Small repair at the left cuff."),
      price_cents: 8_500,
      size: "L",
      condition: "Good",
      sex: Some("men"),
      category: Some("outerwear"),
      image_url: "/images/wool-overcoat.jpg",
    },
    SeedListing {
      title: "Pleated Midi Skirt",
      brand: "Arket",
      description: Some("Forest green, barely worn."),
      price_cents: 3_200,
      size: "M",
      condition: "Like new",
      sex: Some("women"),
      category: Some("skirts"),
      image_url: "/images/pleated-midi-skirt.jpg",
    },
    SeedListing {
      title: "Selvedge Denim Jacket",
      brand: "Nudie Jeans",
      description: Some("Faded indigo with honest wear at the elbows."),
      price_cents: 6_400,
      size: "M",
      condition: "Worn",
      sex: None,
      category: Some("outerwear"),
      image_url: "/images/selvedge-denim-jacket.jpg",
    },
    SeedListing {
      title: "Silk Scarf",
      brand: "Unlabelled",
      description: None,
      price_cents: 1_100,
      size: "One size",
      condition: "Good",
      sex: None,
      category: Some("accessories"),
      image_url: "/images/silk-scarf.jpg",
    },
    SeedListing {
      title: "Corduroy Trousers",
      brand: "Carhartt WIP",
      description: Some("Rust brown, straight cut, hemmed to a 30 inseam."),
      price_cents: 4_500,
      size: "32",
      condition: "Good",
      sex: Some("men"),
      category: Some("trousers"),
      image_url: "/images/corduroy-trousers.jpg",
    },
    SeedListing {
      title: "Cashmere Crewneck",
      brand: "Johnstons of Elgin",
      description: Some("Oatmeal, light pilling under the arms."),
      price_cents: 7_200,
      size: "S",
      condition: "Good",
      sex: Some("women"),
      category: Some("knitwear"),
      image_url: "/images/cashmere-crewneck.jpg",
    },
  ]
}

#[instrument(name = "db::seed_products", skip(pool))]
pub async fn seed_products(pool: &PgPool) -> Result<(), AppError> {
  let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
    .fetch_one(pool)
    .await?;
  if existing > 0 {
    info!("Products table already has {} rows; skipping seed.", existing);
    return Ok(());
  }

  let listings = seed_listings();
  for listing in &listings {
    sqlx::query(
      "INSERT INTO products (title, brand, description, price_cents, size, condition, sex, category, image_url, sold, created_at) \
       VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, FALSE, NOW())",
    )
    .bind(listing.title)
    .bind(listing.brand)
    .bind(listing.description)
    .bind(listing.price_cents)
    .bind(listing.size)
    .bind(listing.condition)
    .bind(listing.sex)
    .bind(listing.category)
    .bind(listing.image_url)
    .execute(pool)
    .await?;
  }

  info!("Seeded {} products.", listings.len());
  Ok(())
}
