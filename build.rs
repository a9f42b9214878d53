//! Build script for playsort.
//!
//! Copies `.env.example` into the application data directory so a fresh
//! install has a configuration template next to where `.env`, the token cache
//! and `rules.json` are read from:
//!
//! - Linux: `~/.local/share/playsort/.env.example`
//! - macOS: `~/Library/Application Support/playsort/.env.example`
//! - Windows: `%LOCALAPPDATA%/playsort/.env.example`

use std::{env, fs, path::PathBuf};

/// A missing template only warns; directory or write failures fail the build.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("playsort");
    fs::create_dir_all(&out_dir)?;

    if template.is_file() {
        fs::copy(&template, out_dir.join(".env.example"))?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            template.display()
        );
    }

    Ok(())
}
