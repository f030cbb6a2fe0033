mod category;
mod error;
mod expense;
mod ledger;
mod money;

pub use category::*;
pub use error::*;
pub use expense::*;
pub use ledger::*;
pub use money::*;
