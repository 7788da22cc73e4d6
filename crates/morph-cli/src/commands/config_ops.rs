use std::fs;

use morph_core::settings;

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    let dir = s
        .resources
        .dir()
        .map(|d| d.display().to_string())
        .unwrap_or_else(|| "(built-in only)".to_string());
    println!(
        "OK: resources.dir={dir}, cache.paradigms={}, cache.capacity={}, query.max_completions={}",
        s.cache.paradigms, s.cache.capacity, s.query.max_completions
    );
}
