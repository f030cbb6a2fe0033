// CSV import/export of the expense table.

pub mod export;
pub mod import;

pub use export::Exporter;
pub use import::{ImportOptions, ImportResult, Importer, read_table};
