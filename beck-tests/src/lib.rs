mod batches;
mod binding;
mod lifecycle;
mod memory;
mod metadata;
mod placeholders;

pub use memory::MemoryEngine;

use batches::{batch_results_in_order, multiple_batches, select_batches_in_order};
use beck::{Connection, Statement};
use binding::{bind_null_typed, incomplete_bind_fails, rebind_overwrites, unknown_parameter_fails};
use lifecycle::{cancel_midway, double_execute_fails, engine_errors_pass_through, late_bind_fails};
use log::LevelFilter;
use metadata::{column_names_casing, duplicate_labels_last_match};
use placeholders::{indexed_in_ascending_order, named_reuse, positional_markers};
use std::env;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

pub async fn execute_tests<C: Connection>(mut connection: C) {
    positional_markers(&mut connection).await;
    named_reuse(&mut connection).await;
    indexed_in_ascending_order(&mut connection).await;
    incomplete_bind_fails(&mut connection).await;
    unknown_parameter_fails(&mut connection).await;
    rebind_overwrites(&mut connection).await;
    bind_null_typed(&mut connection).await;
    multiple_batches(&mut connection).await;
    batch_results_in_order(&mut connection).await;
    select_batches_in_order(&mut connection).await;
    duplicate_labels_last_match(&mut connection).await;
    column_names_casing(&mut connection).await;
    double_execute_fails(&mut connection).await;
    late_bind_fails(&mut connection).await;
    cancel_midway(&mut connection).await;
    engine_errors_pass_through(&mut connection).await;
}

/// Runs one parameterless statement to completion.
pub(crate) async fn run_sql<C: Connection>(connection: &mut C, sql: &str) {
    connection
        .statement(sql)
        .unwrap_or_else(|e| panic!("Failed to prepare `{sql}`: {e}"))
        .execute()
        .await
        .unwrap_or_else(|e| panic!("Failed to execute `{sql}`: {e}"));
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
