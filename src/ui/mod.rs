pub mod formatter;

pub use formatter::FundFormatter;
