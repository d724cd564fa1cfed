//! SQLite source for stock reports.

mod repository;

pub use repository::StockSummaryRepository;
