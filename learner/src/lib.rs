pub mod errors;
pub mod indexer;
pub mod options;
pub mod persistance;
pub mod policy;
pub mod reward;
pub mod table;
pub mod trainer;

pub use errors::*;
pub use indexer::*;
pub use options::*;
pub use persistance::*;
pub use policy::*;
pub use reward::*;
pub use table::*;
pub use trainer::*;
