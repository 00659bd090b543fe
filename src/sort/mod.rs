pub mod compare;
pub mod core;
pub mod json;
pub mod key;
pub mod value;


pub use self::compare::*;
pub use self::core::*;
pub use self::json::*;
pub use self::key::*;
pub use self::value::*;
