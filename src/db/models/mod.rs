//! Database Models

// Serde helpers
pub mod serde_helpers;

// Catalog domain
pub mod collection;
pub mod product;

// Re-exports
pub use collection::{Collection, CollectionCreate, CollectionId, CollectionUpdate};
pub use product::{
    BusinessType, Product, ProductCreate, ProductId, ProductImage, ProductUpdate,
};
