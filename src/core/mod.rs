//! Error type, KSeF number extraction and schema variants.

mod error;
mod ksef;
mod variant;

pub use error::*;
pub use ksef::*;
pub use variant::*;
