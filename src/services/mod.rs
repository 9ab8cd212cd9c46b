// Service modules
pub mod catalog;
pub mod eligibility;
pub mod paywall_service;
pub mod pricing;
pub mod profile_store;
pub mod purchase_service;
pub mod store_client;

pub use catalog::{ConfigCatalog, ProductCatalog};
pub use paywall_service::PaywallService;
pub use profile_store::{DbProfileStore, InMemoryProfileStore, ProfileStore};
pub use purchase_service::PurchaseService;
pub use store_client::{AppleStoreClient, StoreClient};
