pub use engine::*;
pub use error::*;
pub use session::*;
pub use slot::*;
pub use store::*;
pub use types::*;

mod engine;
mod error;
mod session;
mod slot;
mod store;
mod types;
