use anyhow::Result;

use bcr_openssl::ReleaseTag;

/// Print the predecessor of `tag`; prints nothing for a first release
pub fn cmd_previous_tag(tag: &str, json: bool) -> Result<()> {
    let tag: ReleaseTag = tag.parse()?;
    let previous = tag.previous();

    if json {
        let output = serde_json::json!({
            "event": "previous_tag",
            "tag": tag.as_str(),
            "previous": previous.as_ref().map(ReleaseTag::as_str),
        });
        println!("{}", output);
    } else if let Some(previous) = previous {
        println!("{}", previous);
    }
    Ok(())
}
