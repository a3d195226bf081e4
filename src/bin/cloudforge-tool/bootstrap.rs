use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use cloudforge::config::parse_config;

use crate::decompress::decompress_files;
use crate::BootstrapArgs;

const CFG_FILE_NAME: &str = "cloudforge.toml";

lazy_static! {
    static ref RES_PATH_REGEX: Regex = Regex::new(r#""res/([^"]*)""#).unwrap();
    static ref OUTPUT_DIR_REGEX: Regex = Regex::new(r#"(?m)^output_dir = ".*"$"#).unwrap();
}

fn get_sample_cfg() -> &'static str {
    include_str!("../../../cloudforge.toml")
}

fn trimmed_prefix(prefix: &Path) -> String {
    prefix.display().to_string().trim_end_matches('/').to_string()
}

/// Points every `res/...` path of the sample config at `prefix`.
fn replace_paths(prefix: &Path, config_data: &str) -> String {
    let prefix = trimmed_prefix(prefix);
    RES_PATH_REGEX
        .replace_all(config_data, |caps: &Captures| format!(r#""{}/{}""#, prefix, &caps[1]))
        .into_owned()
}

fn replace_output_dir(prefix: &Path, config_data: &str) -> String {
    let output_dir = format!(r#"output_dir = "{}/dist""#, trimmed_prefix(prefix));
    OUTPUT_DIR_REGEX.replace(config_data, output_dir.as_str()).into_owned()
}

fn write_cloudforge_cfg(out_dir: &Path) -> Result<PathBuf> {
    let sample_cfg = replace_paths(out_dir, get_sample_cfg());
    let sample_cfg = replace_output_dir(out_dir, &sample_cfg);

    // Refuse to write something the builder could not read back.
    parse_config(&sample_cfg).context("Generated configuration is invalid")?;

    let cfg_path = out_dir.join(CFG_FILE_NAME);
    let file = File::create(&cfg_path).with_context(|| format!("Creating {}", cfg_path.display()))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(sample_cfg.as_bytes())?;
    writer.flush()?;

    Ok(cfg_path)
}

pub fn bootstrap_cmd(args: BootstrapArgs) -> Result<()> {
    let out_path = fs::canonicalize(&args.out_dir)
        .with_context(|| format!("Error converting path to absolute: {}", &args.out_dir))?;

    if !out_path.is_dir() {
        bail!("Output path must be a directory: {}", out_path.display());
    }

    decompress_files(&out_path).context("Error unpacking site resources")?;
    let cfg_path = write_cloudforge_cfg(&out_path)?;

    println!("Site bootstrapped in {}", out_path.display());
    println!("Build it with: cloudforge -c {} build", cfg_path.display());
    Ok(())
}
