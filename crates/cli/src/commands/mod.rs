pub mod coalescent;
pub mod config;
pub mod drift;
pub mod mutation;
pub mod run;
pub mod structure;
