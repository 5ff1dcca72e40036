pub mod args;
pub mod run;
pub mod simulate;

pub use args::TableArgs;
pub use run::run_once;
pub use simulate::run_simulation;
