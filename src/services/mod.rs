pub mod categories;
pub mod locations;
pub mod products;
pub mod receipts;
pub mod sequence;
pub mod stocks;
pub mod warehouses;
