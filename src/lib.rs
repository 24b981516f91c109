pub mod batch;
pub mod config;

pub use batch::{
    run_avatar_groups, run_batch, run_checkboxes, write_schema_set, BatchCommand, BatchReport,
};
pub use config::BatchConfig;
