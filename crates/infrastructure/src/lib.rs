pub mod animal_store;
pub mod audit_store;
pub mod secrets;

pub use animal_store::*;
pub use audit_store::*;
pub use secrets::*;
