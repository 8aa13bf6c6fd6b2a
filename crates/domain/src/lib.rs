pub mod animal;
pub mod audit;
pub mod command;
pub mod errors;
pub mod identifiers;
pub mod notification;

pub use animal::*;
pub use audit::*;
pub use command::*;
pub use errors::*;
pub use identifiers::*;
pub use notification::*;
