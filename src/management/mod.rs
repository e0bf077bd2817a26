mod aggregate;
mod record;

pub use aggregate::CatalogAggregate;
