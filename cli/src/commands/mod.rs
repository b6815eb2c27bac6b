pub mod azure;
pub mod cli;
pub mod run;
pub mod simulate;
