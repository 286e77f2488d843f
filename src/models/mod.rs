pub mod product;
pub mod sale_report;

// Re-exports for convenience
pub use product::*;
pub use sale_report::*;
