//! Product Storage
//! Mission: Persist the product collection with SQLite

use crate::products::models::Product;
use anyhow::Result;
use rusqlite::{params, Connection};
use tracing::info;
use uuid::Uuid;

/// Product storage with SQLite backend
pub struct ProductStore {
    db_path: String,
}

impl ProductStore {
    /// Create a new product store and initialize database
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    /// Initialize database schema
    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS products (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                price REAL NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Insert a new product with a store-assigned id
    pub fn create(&self, name: &str, price: f64) -> Result<Product> {
        let product = Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            price,
        };

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO products (id, name, price) VALUES (?1, ?2, ?3)",
            params![product.id.to_string(), product.name, product.price],
        )?;

        info!("✅ Created product: {} ({})", product.name, product.id);

        Ok(product)
    }

    /// Fetch the entire collection, no pagination
    pub fn list_all(&self) -> Result<Vec<Product>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare("SELECT id, name, price FROM products")?;

        let products = stmt
            .query_map([], Self::row_to_product)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(products)
    }

    /// Overwrite name and price of an existing product
    ///
    /// Returns `None` when no record has the given id. An id that does not
    /// parse as a UUID identifies no record.
    pub fn update_by_id(&self, id: &str, name: &str, price: f64) -> Result<Option<Product>> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let conn = Connection::open(&self.db_path)?;
        let rows_affected = conn.execute(
            "UPDATE products SET name = ?2, price = ?3 WHERE id = ?1",
            params![id.to_string(), name, price],
        )?;

        if rows_affected == 0 {
            return Ok(None);
        }

        info!("✅ Updated product: {}", id);

        Ok(Some(Product {
            id,
            name: name.to_string(),
            price,
        }))
    }

    /// Remove a product, returning the deleted record
    ///
    /// Returns `None` when no record has the given id, including an id
    /// already deleted.
    pub fn delete_by_id(&self, id: &str) -> Result<Option<Product>> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare("SELECT id, name, price FROM products WHERE id = ?1")?;
        let product = match stmt.query_row(params![id.to_string()], Self::row_to_product) {
            Ok(product) => product,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        conn.execute(
            "DELETE FROM products WHERE id = ?1",
            params![id.to_string()],
        )?;

        info!("🗑️  Deleted product: {}", id);

        Ok(Some(product))
    }

    fn row_to_product(row: &rusqlite::Row<'_>) -> rusqlite::Result<Product> {
        let id_str: String = row.get(0)?;
        let id = Uuid::parse_str(&id_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?;
        Ok(Product {
            id,
            name: row.get(1)?,
            price: row.get(2)?,
        })
    }
}
