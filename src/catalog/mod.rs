use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    pub fn key(&self) -> IdentityKey {
        IdentityKey {
            name: self.name.clone(),
            brand: self.brand.clone(),
        }
    }

    pub fn matches(&self, key: &IdentityKey) -> bool {
        self.name == key.name && self.brand == key.brand
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey {
    pub name: String,
    pub brand: String,
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    products: Vec<Product>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, key: &IdentityKey) -> Option<&Product> {
        self.products.iter().find(|product| product.matches(key))
    }

    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        categories
    }

    pub fn filter(&self, category: Option<&str>, search_term: &str) -> Vec<Product> {
        filter(&self.products, category, search_term)
    }
}

pub fn filter(products: &[Product], category: Option<&str>, search_term: &str) -> Vec<Product> {
    let term = search_term.trim().to_lowercase();
    products
        .iter()
        .filter(|product| category.is_none_or(|category| product.category == category))
        .filter(|product| term.is_empty() || matches_term(product, &term))
        .cloned()
        .collect()
}

fn matches_term(product: &Product, lowered_term: &str) -> bool {
    product.name.to_lowercase().contains(lowered_term)
        || product
            .description
            .as_deref()
            .is_some_and(|description| description.to_lowercase().contains(lowered_term))
}

pub fn parse_catalog(data: &[u8], path: &Path) -> Result<Catalog, CatalogError> {
    let document: CatalogDocument =
        serde_json::from_slice(data).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Catalog::new(document.products))
}

#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Catalog, CatalogError> {
        let data = tokio::fs::read(&self.path)
            .await
            .map_err(|source| CatalogError::Io {
                path: self.path.clone(),
                source,
            })?;
        parse_catalog(&data, &self.path)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::Product;

    pub fn product(name: &str, brand: &str, category: &str, description: Option<&str>) -> Product {
        Product {
            name: name.to_string(),
            brand: brand.to_string(),
            category: category.to_string(),
            image: format!("https://img.example/{}.png", name.replace(' ', "_")),
            description: description.map(str::to_string),
        }
    }

    pub fn sample() -> Vec<Product> {
        vec![
            product(
                "Hydrating Cleanser",
                "CeraVe",
                "cleanser",
                Some("A gentle foaming wash with ceramides."),
            ),
            product(
                "Revitalift Serum",
                "L'Oreal Paris",
                "skincare",
                Some("Pure hyaluronic acid for plump skin."),
            ),
            product("Effaclar Duo", "La Roche-Posay", "skincare", None),
            product(
                "Color Riche Lipstick",
                "L'Oreal Paris",
                "makeup",
                Some("Satin finish with argan oil."),
            ),
            product(
                "Foaming Cleanser",
                "CeraVe",
                "cleanser",
                Some("Removes excess oil without disrupting the barrier."),
            ),
        ]
    }
}
