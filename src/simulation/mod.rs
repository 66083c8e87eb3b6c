// Path simulation: price processes and the resulting price paths

pub mod gbm;
pub mod heston;
pub mod model;
pub mod path;
pub mod sabr;
pub mod simulator;

pub use gbm::simulate_path;
pub use heston::{simulate_heston_path, HestonModel};
pub use model::PathModel;
pub use path::{PathPoint, PricePath, StochasticVolPath};
pub use sabr::{simulate_sabr_path, SabrModel};
pub use simulator::{simulate_batch, simulate_batch_with, PathSimulator};
