pub mod page_capture_store;
pub mod results_store;
