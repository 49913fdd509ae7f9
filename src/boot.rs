use std::fs;
use std::path::Path;
use std::process;

use log::{error, info, warn};

use crate::config::AppConfig;

/// Run all boot checks. Call this before Rocket launches.
/// Creates missing directories, warns about missing optional pieces, and
/// aborts if the site directory is unusable.
pub fn run(config: &AppConfig) {
    info!("vitrine boot check starting...");

    let mut warnings = 0u32;
    let mut errors = 0u32;

    // ── 1. Directories ─────────────────────────────────
    let required_dirs = [
        config.site_dir.clone(),
        config.site_dir.join("backups"),
        config.notify_config_dir(),
        config.uploads_dir(),
        config.static_dir(),
    ];
    for dir in &required_dirs {
        if !dir.exists() {
            match fs::create_dir_all(dir) {
                Ok(_) => info!("  Created directory: {}", dir.display()),
                Err(e) => {
                    error!("  FAILED to create directory {}: {}", dir.display(), e);
                    errors += 1;
                }
            }
        }
    }

    // ── 2. Site directory writable ─────────────────────
    if config.site_dir.exists() {
        let test_file = config.site_dir.join(".write_test");
        match fs::write(&test_file, "test") {
            Ok(_) => {
                let _ = fs::remove_file(&test_file);
            }
            Err(e) => {
                error!("  Site directory not writable: {}", e);
                errors += 1;
            }
        }
    }

    // ── 3. Uploads directory writable ──────────────────
    let uploads_dir = config.uploads_dir();
    if uploads_dir.exists() {
        let test_file = uploads_dir.join(".write_test");
        match fs::write(&test_file, "test") {
            Ok(_) => {
                let _ = fs::remove_file(&test_file);
            }
            Err(e) => {
                warn!("  Uploads directory not writable: {} (file uploads will fail)", e);
                warnings += 1;
            }
        }
    }

    // ── 4. Placeholder project image ───────────────────
    let placeholder = config.static_dir().join("project-placeholder.svg");
    if !placeholder.exists() {
        match fs::write(
            &placeholder,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"640\" height=\"400\">\
             <rect width=\"100%\" height=\"100%\" fill=\"#e2e4e8\"/>\
             <text x=\"50%\" y=\"50%\" text-anchor=\"middle\" fill=\"#6b6f76\" \
             font-family=\"sans-serif\" font-size=\"24\">Project</text></svg>",
        ) {
            Ok(_) => info!("  Created placeholder image: {}", placeholder.display()),
            Err(e) => {
                warn!("  Could not create placeholder image: {}", e);
                warnings += 1;
            }
        }
    }

    // ── 5. Rocket.toml exists ──────────────────────────
    if !Path::new("Rocket.toml").exists() {
        warn!("  Rocket.toml not found — using default config");
        warnings += 1;
    }

    // ── Summary ────────────────────────────────────────
    if errors > 0 {
        error!(
            "Boot check FAILED: {} error(s), {} warning(s). Aborting.",
            errors, warnings
        );
        process::exit(1);
    }

    if warnings > 0 {
        warn!(
            "Boot check passed with {} warning(s). Some features may not work correctly.",
            warnings
        );
    } else {
        info!("Boot check passed. All systems go.");
    }
}
