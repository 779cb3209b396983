pub mod campaign;
pub mod errors;
pub mod messages;
pub mod models;
pub mod validation;

pub use campaign::*;
pub use errors::*;
pub use messages::*;
pub use models::*;
pub use validation::*;
