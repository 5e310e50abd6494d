pub mod registry_tests;
pub mod box_tests;
pub mod transaction_tests;
