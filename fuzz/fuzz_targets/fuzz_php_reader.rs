#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

use asset_manager::domain::services::{evaluate_return, ConfigSafetyChecker};

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        let path = Path::new("/vendor/org/pkg/config/module.config.php");
        // Gate and reader must never panic, whatever the verdict
        let _ = ConfigSafetyChecker::new().check_source(path, source);
        let _ = evaluate_return(source, path);
    }
});
