use anyhow::Result;

use super::parse_os;

pub fn cmd_platforms(os: &str, json: bool, verbose: u8) -> Result<()> {
    let os = parse_os(os)?;
    let platforms = os.platforms();

    if json {
        let items: Vec<_> = platforms
            .iter()
            .map(|p| {
                serde_json::json!({
                    "name": p.config_name(),
                    "family": p.family().as_str(),
                    "arch": p.arch(),
                    "toolchain": p.toolchain(),
                })
            })
            .collect();
        let output = serde_json::json!({
            "event": "platforms",
            "os": os.as_str(),
            "platforms": items,
        });
        println!("{}", output);
        return Ok(());
    }

    for platform in platforms {
        if verbose > 0 {
            println!(
                "{:<24} {:<8} {:<8} {}",
                platform.config_name(),
                platform.family().as_str(),
                platform.arch(),
                platform.toolchain()
            );
        } else {
            println!("{}", platform);
        }
    }
    Ok(())
}
