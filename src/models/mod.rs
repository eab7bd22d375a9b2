pub mod installment;
pub mod vehicle;

pub use installment::*;
pub use vehicle::*;
