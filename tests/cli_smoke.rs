use std::path::PathBuf;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_glyphdrift")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "glyphdrift.exe"
            } else {
                "glyphdrift"
            });
            p
        })
}

#[test]
fn cli_simulate_prints_population_json() {
    let output = std::process::Command::new(exe())
        .args([
            "simulate", "--ticks", "90", "--width", "320", "--height", "240", "--seed", "5",
            "--json",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let paths: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let paths = paths.as_array().unwrap();
    assert_eq!(paths.len(), 30);
    for p in paths {
        assert!(p["age"].as_u64().unwrap() >= 1);
        assert!(p["total_length"].as_f64().unwrap() >= 0.0);
    }
}

#[test]
fn cli_simulate_reads_config_file() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let cfg_path = dir.join("overlay.json");
    std::fs::write(&cfg_path, r#"{ "max_paths": 4, "spawn_interval": 1 }"#).unwrap();

    let cfg_arg = cfg_path.to_string_lossy().to_string();
    let output = std::process::Command::new(exe())
        .args(["simulate", "--ticks", "20", "--seed", "1", "--json", "--config"])
        .arg(cfg_arg.as_str())
        .output()
        .unwrap();

    assert!(output.status.success());
    let paths: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(paths.as_array().unwrap().len(), 4);
}

#[test]
fn cli_rejects_invalid_config() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let cfg_path = dir.join("bad_overlay.json");
    std::fs::write(&cfg_path, r#"{ "spawn_interval": 0 }"#).unwrap();

    let cfg_arg = cfg_path.to_string_lossy().to_string();
    let status = std::process::Command::new(exe())
        .args(["simulate", "--ticks", "1", "--config"])
        .arg(cfg_arg.as_str())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .unwrap();

    assert!(!status.success());
}
