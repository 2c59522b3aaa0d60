use anyhow::{Context, Result};

use crate::proxy::AdbProxy;

pub fn execute(proxy: &AdbProxy, name: &str, output_json: bool) -> Result<()> {
    let value = proxy
        .get_prop(name)
        .with_context(|| format!("Failed to read property {name}"))?;

    if output_json {
        let output = serde_json::json!({
            "name": name,
            "value": value,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{value}");
    }

    Ok(())
}
