pub mod context;
pub mod error;
pub mod logging;

pub use context::AppContext;
pub use error::{MovieTrackError, Result};
