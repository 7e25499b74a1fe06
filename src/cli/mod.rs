pub mod cli;
pub mod run;

mod run_compose;
mod run_enrich;
mod run_export;
mod run_full_pipeline;
mod run_generate;
mod run_send;
mod run_server;
mod show_stats;
