pub mod autotype;
pub mod chooser;
pub mod provision;
pub mod resolver;
pub mod runner;
pub mod sequence;
pub mod store;
pub mod window;

pub use autotype::{Autotype, Outcome};
pub use provision::Provisioner;
pub use runner::create_runner;
