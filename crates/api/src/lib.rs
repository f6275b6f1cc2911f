pub mod dataset;
pub mod db;
mod routes;
mod startup;
mod templates;
mod utils;

pub use db::*;
pub use routes::*;
pub use startup::*;
pub use utils::*;
