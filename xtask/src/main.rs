#![allow(dead_code)]
#![deny(unused_must_use)]

use std::{env, fs, path::PathBuf};

use xshell::cmd;

fn main() -> Result<(), anyhow::Error> {
    let args = env::args().skip(1).collect::<Vec<_>>();
    let args = args.iter().map(|s| &**s).collect::<Vec<_>>();

    match &args[..] {
        ["ci"] => test_ci(),
        ["update"] => update(),
        _ => {
            println!("USAGE cargo xtask [ci|update]");
            Ok(())
        }
    }
}

fn update() -> Result<(), anyhow::Error> {
    let _p = xshell::pushd(root_dir())?;
    cmd!("cargo update").run()?;
    Ok(())
}

fn test_ci() -> Result<(), anyhow::Error> {
    let _e = xshell::pushenv("CI", "true");
    test_device()?;
    build_features()?;
    Ok(())
}

fn test_device() -> Result<(), anyhow::Error> {
    let _p = xshell::pushd(device_dir())?;
    cmd!("cargo test --all").run()?;
    Ok(())
}

/// Builds the driver without default features, once bare and once per optional feature,
/// so the no_std configuration and every logging backend keep compiling.
fn build_features() -> Result<(), anyhow::Error> {
    let _p = xshell::pushd(device_dir())?;
    cmd!("cargo build --no-default-features").run()?;
    for feature in features()? {
        if feature == "default" || feature == "std" {
            continue;
        }
        println!("Building device with feature {}", feature);
        cmd!("cargo build --no-default-features --features {feature}").run()?;
    }
    Ok(())
}

/// Feature names from the `[features]` table of the device manifest, plus optional dependencies.
fn features() -> Result<Vec<String>, anyhow::Error> {
    let mut manifest_path = device_dir();
    manifest_path.push("Cargo.toml");
    let manifest: toml::Value = toml::from_str(&fs::read_to_string(manifest_path)?)?;

    let mut features = Vec::new();
    if let Some(table) = manifest.get("features").and_then(|f| f.as_table()) {
        features.extend(table.keys().cloned());
    }
    if let Some(deps) = manifest.get("dependencies").and_then(|d| d.as_table()) {
        for (name, spec) in deps {
            let optional = spec
                .get("optional")
                .and_then(|o| o.as_bool())
                .unwrap_or(false);
            if optional && !features.contains(name) {
                features.push(name.clone());
            }
        }
    }
    Ok(features)
}

fn device_dir() -> PathBuf {
    let mut device = root_dir();
    device.push("device");
    device
}

fn root_dir() -> PathBuf {
    let mut xtask_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    xtask_dir.pop();
    xtask_dir
}
