use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{TempDir, tempdir};

/// A command isolated from the caller's Jupyter setup and user config.
fn toc_fix(sandbox: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("jupyter-toc-fix").unwrap();
    cmd.env_remove("JUPYTER_CONFIG_DIR")
        .env_remove("CONDA_PREFIX")
        .env_remove("RUST_LOG")
        .env("HOME", sandbox.path().join("home"))
        .env("JUPYTER_TOC_FIX_CONFIG", sandbox.path().join("no-config.toml"))
        .env("JUPYTER_TOC_FIX_LOG_DIR", sandbox.path().join("logs"))
        .env("JUPYTER_TOC_FIX_JUPYTER", sandbox.path().join("no-such-jupyter"));
    cmd
}

fn read_css(config_dir: &Path) -> String {
    fs::read_to_string(config_dir.join("custom").join("custom.css")).unwrap()
}

#[test]
fn test_cli_help() {
    let dir = tempdir().unwrap();
    toc_fix(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("config-dir"));
}

#[test]
fn test_cli_version() {
    let dir = tempdir().unwrap();
    toc_fix(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[cfg(unix)]
#[test]
fn test_config_dir_home_fallback() {
    let dir = tempdir().unwrap();
    let expected = dir.path().join("home").join(".jupyter");
    toc_fix(&dir)
        .arg("config-dir")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", expected.display())));
}

#[cfg(unix)]
#[test]
fn test_config_dir_env_prefix() {
    let dir = tempdir().unwrap();
    toc_fix(&dir)
        .env("CONDA_PREFIX", "/opt/env")
        .arg("config-dir")
        .assert()
        .success()
        .stdout("/opt/env/etc/jupyter\n");
}

#[cfg(unix)]
#[test]
fn test_config_dir_override_precedence() {
    let dir = tempdir().unwrap();
    toc_fix(&dir)
        .env("CONDA_PREFIX", "/opt/env")
        .env("JUPYTER_CONFIG_DIR", "/srv/jupyter")
        .arg("config-dir")
        .assert()
        .success()
        .stdout("/srv/jupyter\n");

    toc_fix(&dir)
        .env("JUPYTER_CONFIG_DIR", "/srv/jupyter")
        .args(["--config-dir", "/from/flag", "config-dir"])
        .assert()
        .success()
        .stdout("/from/flag\n");
}

#[test]
fn test_config_dir_has_no_side_effects() {
    let dir = tempdir().unwrap();
    let config_dir = dir.path().join("jupyter");
    toc_fix(&dir)
        .env("JUPYTER_CONFIG_DIR", &config_dir)
        .arg("config-dir")
        .assert()
        .success();
    assert!(!config_dir.exists());
}

#[test]
fn test_install_without_jupyter_warns_and_succeeds() {
    let dir = tempdir().unwrap();
    let prefix = dir.path().join("opt").join("env");
    let config_dir = prefix.join("etc").join("jupyter");

    let output = toc_fix(&dir).env("CONDA_PREFIX", &prefix).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches("command not found").count(), 1);
    assert!(stdout.contains("command not found, skipping nbextensions install"));
    assert!(stdout.contains("[3/4] Enabling specific extensions..."));
    assert!(stdout.contains("Setup complete with 7 warnings"));
    assert!(stdout.contains(&format!(
        "CSS fix applied to: {}",
        config_dir.join("custom").join("custom.css").display()
    )));

    let css = read_css(&config_dir);
    assert!(css.trim_end().ends_with("margin-right: auto !important;\n}"));
    assert!(css.contains("#toc-wrapper {"));
}

#[test]
fn test_install_twice_appends_twice_and_keeps_existing_content() {
    let dir = tempdir().unwrap();
    let config_dir = dir.path().join("jupyter");
    let custom = config_dir.join("custom");
    fs::create_dir_all(&custom).unwrap();
    fs::write(custom.join("custom.css"), "/* mine */\n").unwrap();
    fs::write(custom.join("custom.js"), "// untouched\n").unwrap();

    for _ in 0..2 {
        toc_fix(&dir)
            .args(["install", "--config-dir"])
            .arg(&config_dir)
            .assert()
            .success();
    }

    let css = read_css(&config_dir);
    assert!(css.starts_with("/* mine */\n"));
    assert_eq!(css.matches("#toc-wrapper {").count(), 2);
    assert_eq!(css.matches("#notebook-container {").count(), 2);

    let appended = css.strip_prefix("/* mine */\n").unwrap();
    let (first, second) = appended.split_at(appended.len() / 2);
    assert_eq!(first, second);
    assert_eq!(
        fs::read_to_string(custom.join("custom.js")).unwrap(),
        "// untouched\n"
    );
}

#[test]
fn test_install_fails_when_custom_dir_cannot_be_created() {
    let dir = tempdir().unwrap();
    let config_dir = dir.path().join("jupyter");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("custom"), "a file, not a directory").unwrap();

    toc_fix(&dir)
        .arg("--config-dir")
        .arg(&config_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("failed to create"));
}

#[test]
fn test_malformed_user_config_fails() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "[tool\n").unwrap();

    toc_fix(&dir)
        .env("JUPYTER_TOC_FIX_CONFIG", &config_path)
        .arg("config-dir")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config"));
}

#[cfg(unix)]
#[test]
fn test_install_with_stand_in_jupyter() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let calls = dir.path().join("calls.txt");
    let script = dir.path().join("fake-jupyter");
    fs::write(
        &script,
        format!(
            "#!/bin/sh\necho \"$@\" >> '{}'\n[ \"$3\" = init_cell/main ] && exit 1\nexit 0\n",
            calls.display()
        ),
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    let config_dir = dir.path().join("jupyter");
    let output = toc_fix(&dir)
        .env("JUPYTER_TOC_FIX_JUPYTER", &script)
        .env("JUPYTER_CONFIG_DIR", &config_dir)
        .output()
        .unwrap();
    assert!(output.status.success());

    let recorded = fs::read_to_string(&calls).unwrap();
    let lines: Vec<&str> = recorded.lines().collect();
    assert_eq!(
        lines,
        [
            "contrib nbextension install --sys-prefix",
            "nbextensions_configurator enable --sys-prefix",
            "nbextension enable toc2/main --sys-prefix",
            "nbextension enable collapsible_headings/main --sys-prefix",
            "nbextension enable hide_input_all/main --sys-prefix",
            "nbextension enable init_cell/main --sys-prefix",
            "nbextension enable codefolding/main --sys-prefix",
        ]
    );

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("      ✓ nbextensions installed"));
    assert!(stdout.contains("      ✓ toc2/main"));
    assert!(stdout.contains("⚠ Warning: Could not enable init_cell/main"));
    assert!(stdout.contains("returned non-zero exit status 1"));
    assert!(stdout.contains("      ✓ codefolding/main"));
    assert!(stdout.contains("Setup complete with 1 warning"));
    assert_eq!(read_css(&config_dir).matches("#toc-wrapper {").count(), 1);
}

#[cfg(target_os = "linux")]
#[test]
fn test_install_survives_unopenable_log_dir() {
    let dir = tempdir().unwrap();
    let config_dir = dir.path().join("jupyter");

    toc_fix(&dir)
        .env("JUPYTER_TOC_FIX_LOG_DIR", "/proc")
        .env("JUPYTER_CONFIG_DIR", &config_dir)
        .arg("install")
        .assert()
        .success()
        .stdout(predicate::str::contains("CSS fix applied to:"))
        .stderr(predicate::str::contains("warning: logging disabled"));

    assert_eq!(read_css(&config_dir).matches("#toc-wrapper {").count(), 1);
}

#[cfg(unix)]
#[test]
fn test_install_with_non_executable_jupyter_warns_and_succeeds() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let script = dir.path().join("jupyter");
    fs::write(&script, "#!/bin/sh\nexit 0\n").unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o644)).unwrap();

    let config_dir = dir.path().join("jupyter-config");
    let output = toc_fix(&dir)
        .env("JUPYTER_TOC_FIX_JUPYTER", &script)
        .env("JUPYTER_CONFIG_DIR", &config_dir)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches("could not be started").count(), 7);
    assert!(stdout.contains("⚠ Warning: Could not install nbextensions"));
    assert!(stdout.contains("⚠ Warning: Could not enable codefolding/main"));
    assert!(stdout.contains("Setup complete with 7 warnings"));
    assert_eq!(read_css(&config_dir).matches("#toc-wrapper {").count(), 1);
}
