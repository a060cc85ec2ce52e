pub mod ease;
pub mod envelope;
