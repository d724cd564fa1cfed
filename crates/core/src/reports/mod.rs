//! Reports - aggregations over the transaction ledger.

pub mod stock_summary;
