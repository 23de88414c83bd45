pub mod scan_normalizer;
pub mod term_deriver;

pub use scan_normalizer::ScanNormalizer;
pub use term_deriver::TermDeriver;
