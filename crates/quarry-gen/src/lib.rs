pub mod error;
pub mod generator;
pub mod ident;
pub mod templates;

pub use error::{GenError, Result};
pub use generator::Generator;
pub use ident::ModelName;
