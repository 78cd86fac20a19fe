use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn drawlab_cmd() -> Command {
    Command::cargo_bin("drawlab").expect("binary exists")
}

const STROKE_SCRIPT: &str = r#"[
    {"tool": "Line"},
    {"mouse": {"kind": "start", "x": 100, "y": 100}},
    {"mouse": {"kind": "move", "x": 300, "y": 180}},
    {"mouse": {"kind": "end", "x": 300, "y": 180}},
    {"key_press": {"char": "2"}},
    {"mouse": {"kind": "move", "x": 340, "y": 180}},
    {"key_release": {"char": "2"}},
    {"action": "toggle_edit"},
    {"action": "toggle_edit"}
]"#;

#[test]
fn drawlab_help_prints_usage() {
    drawlab_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("headless replay driver"));
}

#[test]
fn script_argument_is_required() {
    drawlab_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--script"));
}

#[test]
fn replay_writes_png() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("stroke.json");
    let out = temp.path().join("canvas.png");
    std::fs::write(&script, STROKE_SCRIPT).unwrap();

    drawlab_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("--script")
        .arg(&script)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("canvas.png"));

    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"\x89PNG"));
}

#[test]
fn custom_config_sets_viewport() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("empty.json");
    let config = temp.path().join("config.toml");
    let out = temp.path().join("small.png");
    std::fs::write(&script, "[]").unwrap();
    std::fs::write(&config, "[canvas]\nwidth = 320\nheight = 200\n").unwrap();

    drawlab_cmd()
        .args(["--config"])
        .arg(&config)
        .arg("--script")
        .arg(&script)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let mut file = std::fs::File::open(&out).unwrap();
    let image = cairo::ImageSurface::create_from_png(&mut file).unwrap();
    assert_eq!((image.width(), image.height()), (320, 200));
}

#[test]
fn malformed_script_fails_with_context() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("bad.json");
    std::fs::write(&script, "[{\"mouse\": 3}]").unwrap();

    drawlab_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("--script")
        .arg(&script)
        .arg("--out")
        .arg(temp.path().join("never.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse script"));
}

#[test]
fn unknown_tool_in_script_fails() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("tool.json");
    std::fs::write(&script, r#"[{"tool": "Airbrush"}]"#).unwrap();

    drawlab_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("--script")
        .arg(&script)
        .arg("--out")
        .arg(temp.path().join("never.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown tool preset 'Airbrush'"));
}
