pub mod data_gov;

pub use data_gov::DataGovClient;
