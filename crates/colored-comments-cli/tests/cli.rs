//! Smoke tests for the colored-comments binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use rstest::{fixture, rstest};
use serde_json::Value;
use tempfile::TempDir;

const SETTINGS: &str = r##"{
    // tags in priority order
    "continued_matching": true,
    "tags": {
        "Todo": {
            "identifier": "TODO:",
            "color": {"name": "Orange", "foreground": "#FF8800", "background": "#202020"},
            "underline": true,
        },
        "Important": {"identifier": "!", "color": {"name": "Red", "foreground": "#FF0000"}},
    },
}"##;

const MARIANA: &str = r##"{"name": "Mariana", "rules": [{"scope": "comment", "foreground": "#aaa"}]}"##;

const DERIVED: &str =
    "Packages/User/Colored Comments/Colored Comments-Mariana.sublime-color-scheme";

struct Workspace {
    _dir: TempDir,
    root: PathBuf,
}

impl Workspace {
    fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    fn json(&self, relative: &str) -> Value {
        let text = fs::read_to_string(self.path(relative))
            .unwrap_or_else(|err| panic!("reading {relative}: {err}"));
        serde_json::from_str(&text).unwrap_or_else(|err| panic!("parsing {relative}: {err}"))
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("colored-comments")
            .unwrap_or_else(|err| panic!("binary exists: {err}"));
        cmd.current_dir(&self.root)
            .env_remove("COLORED_COMMENTS_LOG_LEVEL")
            .arg("--settings")
            .arg(self.path("settings.json"));
        cmd
    }

    fn host_args(&self, cmd: &mut Command) {
        cmd.arg("--packages")
            .arg(self.path("Packages"))
            .arg("--preferences")
            .arg(self.path("Preferences.json"));
    }
}

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap_or_else(|err| panic!("mkdir: {err}"));
    }
    fs::write(path, contents).unwrap_or_else(|err| panic!("writing {}: {err}", path.display()));
}

#[fixture]
fn workspace() -> Workspace {
    let dir = TempDir::new().unwrap_or_else(|err| panic!("temp dir: {err}"));
    let root = dir.path().to_path_buf();
    write(&root.join("settings.json"), SETTINGS);
    write(
        &root.join("Packages/Color Scheme - Default/Mariana.sublime-color-scheme"),
        MARIANA,
    );
    write(
        &root.join("Preferences.json"),
        r#"{"color_scheme": "Mariana.sublime-color-scheme", "font_size": 11}"#,
    );
    Workspace { _dir: dir, root }
}

#[rstest]
fn classify_prints_tagged_lines(workspace: Workspace) {
    write(
        &workspace.path("main.rs"),
        "// TODO: fix\n// - detail\nlet x = 1; // ! careful\n// plain\n",
    );
    let output = workspace
        .command()
        .arg("classify")
        .arg(workspace.path("main.rs"))
        .output()
        .unwrap_or_else(|err| panic!("runs: {err}"));
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "Todo\t1:3\tTODO: fix\nTodo\t2:3\t- detail\nImportant\t3:14\t! careful\n"
    );
}

#[rstest]
fn classify_verbose_adds_scope_and_flags(workspace: Workspace) {
    write(&workspace.path("notes.py"), "# TODO: again\n");
    let output = workspace
        .command()
        .args(["classify", "--verbose"])
        .arg(workspace.path("notes.py"))
        .output()
        .unwrap_or_else(|err| panic!("runs: {err}"));
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "Todo\t1:2\tTODO: again\tcolored.comments.color.orange\t528\n"
    );
}

#[rstest]
fn generate_then_revert(workspace: Workspace) {
    let mut generate = workspace.command();
    generate.args(["generate", "--yes"]);
    workspace.host_args(&mut generate);
    let output = generate
        .output()
        .unwrap_or_else(|err| panic!("runs: {err}"));
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(&format!("wrote {DERIVED}")));
    assert!(stdout.contains(&format!("switched to {DERIVED}")));

    let derived = workspace.json(
        "Packages/User/Colored Comments/Colored Comments-Mariana.sublime-color-scheme",
    );
    let rules = derived
        .get("rules")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    assert_eq!(rules, 3);

    let preferences = workspace.json("Preferences.json");
    assert_eq!(preferences.get("color_scheme"), Some(&Value::from(DERIVED)));
    assert_eq!(preferences.get("font_size"), Some(&Value::from(11)));

    let settings = workspace.json("settings.json");
    assert_eq!(settings.get("prompt_new_color_scheme"), Some(&Value::Bool(false)));
    assert_eq!(
        settings.get("old_color_scheme"),
        Some(&Value::from("Mariana.sublime-color-scheme"))
    );

    let mut revert = workspace.command();
    revert.arg("revert");
    workspace.host_args(&mut revert);
    let output = revert.output().unwrap_or_else(|err| panic!("runs: {err}"));
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "restored Mariana.sublime-color-scheme\n"
    );
    let preferences = workspace.json("Preferences.json");
    assert_eq!(
        preferences.get("color_scheme"),
        Some(&Value::from("Mariana.sublime-color-scheme"))
    );
    assert_eq!(workspace.json("settings.json").get("old_color_scheme"), None);
}

#[rstest]
fn generate_without_consent_keeps_the_scheme(workspace: Workspace) {
    let mut generate = workspace.command();
    generate.arg("generate");
    workspace.host_args(&mut generate);
    let output = generate
        .output()
        .unwrap_or_else(|err| panic!("runs: {err}"));
    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stdout).contains("switched"));
    assert_eq!(
        workspace.json("Preferences.json").get("color_scheme"),
        Some(&Value::from("Mariana.sublime-color-scheme"))
    );
}

#[rstest]
fn unsupported_scheme_fails(workspace: Workspace) {
    write(
        &workspace.path("Preferences.json"),
        r#"{"color_scheme": "Packages/User/Theme.json"}"#,
    );
    let mut generate = workspace.command();
    generate.arg("generate");
    workspace.host_args(&mut generate);
    generate.assert().failure();
}

#[rstest]
fn rejects_unknown_log_level(workspace: Workspace) {
    workspace
        .command()
        .env("COLORED_COMMENTS_LOG_LEVEL", "loud")
        .args(["classify", "missing.rs"])
        .assert()
        .failure();
}

#[rstest]
fn classify_refreshes_the_derived_scheme_when_offered(workspace: Workspace) {
    write(&workspace.path("main.rs"), "// TODO: fix\n");
    let mut classify = workspace.command();
    classify.arg("classify").arg(workspace.path("main.rs"));
    workspace.host_args(&mut classify);
    let output = classify
        .output()
        .unwrap_or_else(|err| panic!("runs: {err}"));
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Todo\t1:3\tTODO: fix\n");

    assert!(
        workspace
            .path("Packages/User/Colored Comments/Colored Comments-Mariana.sublime-color-scheme")
            .is_file()
    );
    assert_eq!(
        workspace.json("Preferences.json").get("color_scheme"),
        Some(&Value::from("Mariana.sublime-color-scheme"))
    );
    assert_eq!(
        workspace.json("settings.json").get("old_color_scheme"),
        Some(&Value::from("Mariana.sublime-color-scheme"))
    );
}

#[rstest]
fn classify_skips_the_theme_pass_once_declined_for_good(workspace: Workspace) {
    write(
        &workspace.path("settings.json"),
        r##"{"prompt_new_color_scheme": false, "tags": {"Todo": {"identifier": "TODO:", "color": {"name": "Orange", "foreground": "#f80"}}}}"##,
    );
    write(&workspace.path("main.rs"), "// TODO: fix\n");
    let mut classify = workspace.command();
    classify.arg("classify").arg(workspace.path("main.rs"));
    workspace.host_args(&mut classify);
    classify.assert().success();
    assert!(!workspace.path("Packages/User").exists());
}
