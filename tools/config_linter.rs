/// Config Linter — validates leveling config content before it ships.
///
/// Usage: config_linter <leveling.json> [more.json ...]

use progression_engine::schema::config::LevelingConfig;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: config_linter <leveling.json> [more.json ...]");
        process::exit(0);
    }

    let mut total_errors = 0;
    let mut total_warnings = 0;

    for arg in &args[1..] {
        let path = Path::new(arg);
        println!("=== {} ===", path.display());

        let config = match LevelingConfig::load_from_json(path) {
            Ok(config) => config,
            Err(e) => {
                println!("ERROR: {}", e);
                total_errors += 1;
                continue;
            }
        };

        let warnings = lint_config(&config);
        if warnings.is_empty() {
            println!("All checks passed ({} levels, {} stages)",
                config.max_level,
                config.mental_stages.len());
        }
        for warning in &warnings {
            println!("WARNING: {}", warning);
        }
        total_warnings += warnings.len();
    }

    println!("\nSummary: {} errors, {} warnings", total_errors, total_warnings);

    if total_errors == 0 {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

/// Author-facing quality checks beyond the hard validation the engine
/// already enforces at load time.
fn lint_config(config: &LevelingConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    // A threshold curve that dips usually means a typo in the table.
    for window in config.exp_thresholds_to_next.windows(2) {
        if window[1] < window[0] {
            warnings.push(format!(
                "experience curve dips from {} to {} — is that intentional?",
                window[0], window[1]
            ));
        }
    }

    for stage in &config.mental_stages {
        if stage.media.is_empty() {
            warnings.push(format!("stage '{}' has no media path", stage.stage_type));
        }

        if stage.description.is_none() && stage.description_by_level_in_stage.is_none() {
            warnings.push(format!(
                "stage '{}' has neither a description nor per-level descriptions",
                stage.stage_type
            ));
        }

        if let Some(texts) = &stage.description_by_level_in_stage {
            if texts.len() < stage.levels.len() {
                warnings.push(format!(
                    "stage '{}' spans {} levels but has only {} per-level descriptions (last one repeats)",
                    stage.stage_type,
                    stage.levels.len(),
                    texts.len()
                ));
            }
        }
    }

    if config.stat_points_per_level == 0 {
        warnings.push("statPointsPerLevel is 0 — level-ups grant no allocable points".to_string());
    }

    warnings
}
