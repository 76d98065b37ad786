//! Column decoders applied after annotation prioritization.
//!
//! Each decoder only acts when its source column is present and never
//! depends on another decoder having run.

pub mod aminochange;
pub mod clinvar;
pub mod esp6500;
pub mod rounding;
pub mod zygosity;

pub use aminochange::compute_aminochange;
pub use clinvar::decode_clinvar;
pub use esp6500::decode_esp6500;
pub use rounding::round_numeric_columns;
pub use zygosity::map_zygosity;
