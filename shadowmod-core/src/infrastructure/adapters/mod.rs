pub mod process;

pub use process::ProcessToolchain;
