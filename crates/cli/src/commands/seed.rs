//! Seed the catalog with demo products.
//!
//! Inserts a small fixed set of products so a fresh install has something
//! to show. Seeding is idempotent; products already present (by name) are
//! skipped.

use tracing::info;

use marketstall_core::Price;
use marketstall_web::db::ProductRepository;

/// Demo catalog entries: (name, description, price).
const DEMO_PRODUCTS: &[(&str, &str, &str)] = &[
    (
        "Enamel Mug",
        "A sturdy 350ml enamel mug for camp coffee.",
        "12.50",
    ),
    (
        "Canvas Tote",
        "Heavyweight cotton tote bag with internal pocket.",
        "18.00",
    ),
    (
        "Beeswax Candle",
        "Hand-poured beeswax candle, burns for roughly 20 hours.",
        "9.95",
    ),
    (
        "Field Notebook",
        "Pocket-sized dot grid notebook, 64 pages.",
        "6.00",
    ),
];

/// Seed demo products into the catalog.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    info!("Connected to database");

    let repo = ProductRepository::new(&pool);
    let existing = repo.list().await?;

    let mut inserted = 0;
    let mut skipped = 0;

    for (name, description, price) in DEMO_PRODUCTS {
        if existing.iter().any(|p| p.name == *name) {
            skipped += 1;
            continue;
        }

        let price = Price::parse(price)?;
        let product = repo.create(name, description, price).await?;
        info!(product_id = product.id.as_i32(), name, "Seeded product");
        inserted += 1;
    }

    info!("Seeding complete! Inserted: {inserted}, skipped: {skipped}");
    Ok(())
}
