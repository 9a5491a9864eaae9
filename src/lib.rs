pub mod cli;
pub mod cobertura;
pub mod convert;
pub mod counters;
pub mod error;
pub mod model;
pub mod parsers;
pub mod writer;
pub mod xml;
