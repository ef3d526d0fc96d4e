use anyhow::{Context, Result, bail};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const ENTRYPOINT_TEMPLATE: &str = include_str!("../../../config-templates/querygate.hcl");
const POLICY_TEMPLATE: &str = include_str!("../../../config-templates/policies/default.hcl");

pub fn init(path: PathBuf) -> Result<()> {
    write_templates(&path)?;

    // User feedback
    println!("✔ Initialized querygate config in {}", path.display());
    println!("✔ Created:");
    println!("  - querygate.hcl");
    println!("  - policies/default.hcl");
    println!();
    println!("Next steps:");
    println!("  querygate config check {}", path.display());
    println!("  querygate admit --op search --start now-6h --end now --query \"msg like '%oom%'\"");

    Ok(())
}

pub(crate) fn write_templates(path: &Path) -> Result<()> {
    // Refuse to overwrite an existing non-empty directory
    if path.exists() {
        if path.is_file() {
            bail!("{} exists and is not a directory", path.display());
        }

        let is_empty = fs::read_dir(path)?.next().is_none();
        if !is_empty {
            bail!(
                "config directory '{}' already exists and is not empty",
                path.display()
            );
        }
    }

    let policies_dir = path.join("policies");
    fs::create_dir_all(&policies_dir)?;

    write_file(&path.join("querygate.hcl"), ENTRYPOINT_TEMPLATE)?;
    write_file(&policies_dir.join("default.hcl"), POLICY_TEMPLATE)?;

    Ok(())
}

/// Helper to write a file (simple, deterministic, no magic)
fn write_file(path: &Path, contents: &str) -> Result<()> {
    let mut f =
        fs::File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    f.write_all(contents.trim_start().as_bytes())?;
    Ok(())
}
