pub mod category;
pub mod counter;
pub mod location;
pub mod product;
pub mod receipt;
pub mod stock;
pub mod warehouse;
