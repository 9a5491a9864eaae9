pub mod jacoco;

use crate::error::Result;
use crate::model::Report;

/// Every input format parser implements this trait.
pub trait Parser {
    /// Parse the input bytes into the typed report model.
    fn parse(&self, input: &[u8]) -> Result<Report>;
}
