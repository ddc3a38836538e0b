pub mod parameter;
pub mod plan;
pub mod recommendation;
pub mod test_record;

pub use parameter::*;
pub use plan::*;
pub use recommendation::*;
pub use test_record::*;
