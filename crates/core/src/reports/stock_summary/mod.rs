pub mod stock_summary_calculator;
pub mod stock_summary_model;
pub mod stock_summary_service;
pub mod stock_summary_traits;


#[cfg(test)]
mod stock_summary_service_tests;

pub use stock_summary_calculator::*;
pub use stock_summary_model::*;
pub use stock_summary_service::StockSummaryService;
pub use stock_summary_traits::{StockSummaryRepositoryTrait, StockSummaryServiceTrait};
