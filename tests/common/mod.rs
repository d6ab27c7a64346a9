use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Route the crate's `log` output through the test harness once per binary.
/// `RUST_LOG` overrides the defaults, e.g. `RUST_LOG=sdbm_table=trace`.
pub fn init_test_logger() {
    INIT.call_once(|| {
        let mut builder = Builder::new();
        builder
            .filter_level(LevelFilter::Warn)
            .filter_module("sdbm_table", LevelFilter::Debug)
            .is_test(true)
            .parse_default_env();
        // Another harness may have installed a logger already.
        let _ = builder.try_init();
    });
}
