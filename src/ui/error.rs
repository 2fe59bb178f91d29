use std::path::Path;

use bcr_openssl::BcrError;

use super::ci::{github_actions_annotation, in_github_actions, AnnotationLevel};

/// File most relevant to an error, used for CI annotations
fn error_file(err: &BcrError) -> Option<&Path> {
    match err {
        BcrError::MissingTemplate { path }
        | BcrError::OutputExists { path }
        | BcrError::IntegrityMismatch { path, .. }
        | BcrError::Metadata { path, .. } => Some(path),
        BcrError::Config { file, .. } => Some(file),
        _ => None,
    }
}

/// Render the error chain, outermost context first
pub fn format_error(err: &anyhow::Error) -> String {
    let mut out = format!("[ERROR] {}\n", err);
    for cause in err.chain().skip(1) {
        out.push_str(&format!("  caused by: {}\n", cause));
    }
    out
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let output = serde_json::json!({
            "event": "error",
            "message": format!("{:#}", err),
        });
        println!("{}", output);
        return;
    }

    if in_github_actions(|key| std::env::var(key).ok()) {
        let file = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<BcrError>())
            .and_then(error_file)
            .map(|p| p.to_string_lossy().into_owned());
        println!(
            "{}",
            github_actions_annotation(
                AnnotationLevel::Error,
                &format!("{:#}", err),
                file.as_deref(),
                Some("bcr-openssl"),
            )
        );
    }

    eprint!("{}", format_error(err));
}
