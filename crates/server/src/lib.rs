pub mod errors;
pub mod identity;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::run;
