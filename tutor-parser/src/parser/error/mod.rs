pub mod kind;

pub use tutor_error::Error;
