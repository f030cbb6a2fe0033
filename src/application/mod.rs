// Application layer - the session that owns a ledger, plus the reports
// derived from it for display.

pub mod error;
pub mod reporting;
pub mod session;

pub use error::*;
pub use reporting::*;
pub use session::*;
