pub mod search;
pub mod shutdown;
pub mod types;
pub mod validations;

pub use search::*;
pub use shutdown::*;
pub use types::*;
