//! CSV catalog import feeding the in-memory catalog reader.

mod parser;

use crate::workflows::skin_quiz::domain::{
    CatalogItem, ProductCategory, ProductId, UnknownVariant,
};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidPrice { id: String, price: f64 },
    UnknownCategory { id: String, source: UnknownVariant },
    DuplicateProduct(String),
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read catalog export: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid catalog CSV data: {}", err),
            CatalogImportError::InvalidPrice { id, price } => {
                write!(f, "product {} has invalid price {}", id, price)
            }
            CatalogImportError::UnknownCategory { id, source } => {
                write!(f, "product {}: {}", id, source)
            }
            CatalogImportError::DuplicateProduct(id) => {
                write!(f, "product {} appears more than once", id)
            }
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::UnknownCategory { source, .. } => Some(source),
            CatalogImportError::InvalidPrice { .. } | CatalogImportError::DuplicateProduct(_) => {
                None
            }
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads catalog items from a CSV export with `id,name,description,price,category,image` columns.
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CatalogItem>, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<CatalogItem>, CatalogImportError> {
        let mut seen = HashSet::new();
        let mut items = Vec::new();

        for row in parser::parse_rows(reader)? {
            if !row.price.is_finite() || row.price < 0.0 {
                return Err(CatalogImportError::InvalidPrice {
                    id: row.id,
                    price: row.price,
                });
            }

            let category = match row.category.parse::<ProductCategory>() {
                Ok(category) => category,
                Err(source) => {
                    return Err(CatalogImportError::UnknownCategory { id: row.id, source })
                }
            };

            if !seen.insert(row.id.clone()) {
                return Err(CatalogImportError::DuplicateProduct(row.id));
            }

            items.push(CatalogItem {
                id: ProductId(row.id),
                name: row.name,
                description: row.description,
                price: row.price,
                category,
                image: row.image.unwrap_or_default(),
            });
        }

        Ok(items)
    }
}
