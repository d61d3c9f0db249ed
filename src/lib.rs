pub mod address_source;
pub mod config;
pub mod driver;
pub mod error;

pub use config::Config;
pub use driver::run;
pub use error::VmmgrError;
