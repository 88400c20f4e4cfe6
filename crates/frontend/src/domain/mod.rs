pub mod a001_product;
pub mod a003_catalog;
pub mod a004_site_config;
