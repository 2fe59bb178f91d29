use bcr_openssl::config::ConfigWarning;

use super::ci::{github_actions_annotation, in_github_actions, AnnotationLevel};

pub fn print_config_warnings(warnings: &[ConfigWarning], json: bool) {
    if json {
        for w in warnings {
            let output = serde_json::json!({
                "event": "warning",
                "kind": "unknown_config_key",
                "key": w.key,
                "file": w.file.display().to_string(),
                "line": w.line,
                "suggestion": w.suggestion,
            });
            println!("{}", output);
        }
        return;
    }

    let annotate = in_github_actions(|key| std::env::var(key).ok());
    for w in warnings {
        let location = match w.line {
            Some(line) => format!("{}:{}", w.file.display(), line),
            None => w.file.display().to_string(),
        };
        eprintln!("[WARN] Unknown config key '{}' in {}", w.key, location);

        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?", suggestion);
        }

        if annotate {
            println!(
                "{}",
                github_actions_annotation(
                    AnnotationLevel::Warning,
                    &format!("unknown config key '{}'", w.key),
                    Some(&w.file.to_string_lossy()),
                    None,
                )
            );
        }
    }
}
