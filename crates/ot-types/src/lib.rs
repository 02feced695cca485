pub mod config;
pub mod errors;
pub mod params;
pub mod records;
pub mod scenario;
pub mod score;

pub use config::*;
pub use errors::*;
pub use params::*;
pub use records::*;
pub use scenario::*;
pub use score::*;
