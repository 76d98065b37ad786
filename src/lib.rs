pub mod cli;
pub mod error;

pub mod commands {
    pub mod convert;
    pub use convert::convert;
}

pub mod core {
    pub mod annotation;
    pub mod assembler;
    pub mod decoders;
    pub mod normalize;
    pub mod panel;
    pub mod pipeline;
    pub mod record;
    pub mod splitter;
    pub mod table;
    pub mod value;
    #[cfg(test)]
    pub(crate) mod test_utils;
}

pub mod io {
    pub mod panel_reader;
    pub mod readers;
    pub mod severity_reader;
    pub mod table_writer;
    pub mod vcf_reader;
}

pub mod utils {
    pub mod util;
}

pub mod constants;

pub use constants::*;
pub use crate::core::{
    pipeline::{read_vcf, Prioritization, ReadOptions},
    table::Table,
};
