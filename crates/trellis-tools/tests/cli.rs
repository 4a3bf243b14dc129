//! End-to-end CLI tests.
//!
//! Everything here runs the binary non-interactively: either pure flag
//! parsing, or full scaffolds where `--template`/`--language` presets answer
//! every prompt up front. Interactive select/input paths are covered by the
//! library tests.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn trellis() -> Command {
    let mut cmd = Command::cargo_bin("trellis").unwrap();
    cmd.env_remove("TRELLIS_TEMPLATE_DIR");
    cmd.env_remove("TRELLIS_WIDGET_DIR");
    cmd
}

/// A template root with one two-variant template.
fn project_templates() -> TempDir {
    let root = TempDir::new().unwrap();
    for tag in ["javascript", "typescript"] {
        let dir = root.path().join(format!("basic-{}", tag));
        fs::create_dir_all(dir.join("src")).unwrap();
        fs::write(dir.join("index.html.art"), "Hello {{PROJECT_NAME}}").unwrap();
        fs::write(
            dir.join("package.json.art"),
            "{\"name\": \"{{PROJECT_NAME}}\"}",
        )
        .unwrap();
        fs::write(dir.join("src/main.js"), "console.log('{{untouched}}')").unwrap();
    }
    root
}

/// A widget root with a single variant-less widget template.
fn widget_templates() -> TempDir {
    let root = TempDir::new().unwrap();
    let dir = root.path().join("widget");
    fs::create_dir_all(dir.join("src")).unwrap();
    fs::write(
        dir.join("src/{{COMPONENT_NAME}}.jsx.art"),
        "export const {{COMPONENT_NAME}} = () => null;\n",
    )
    .unwrap();
    root
}

#[test]
fn test_short_version_flag() {
    trellis()
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_long_version_flag() {
    trellis()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_bare_invocation_prints_usage() {
    trellis()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("generate"));
}

#[test]
fn test_create_without_dir_prints_usage_and_touches_nothing() {
    let cwd = TempDir::new().unwrap();

    trellis()
        .arg("create")
        .current_dir(cwd.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));

    assert_eq!(fs::read_dir(cwd.path()).unwrap().count(), 0);
}

#[test]
fn test_generate_without_dir_prints_usage() {
    let cwd = TempDir::new().unwrap();

    trellis()
        .arg("generate")
        .current_dir(cwd.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));

    assert_eq!(fs::read_dir(cwd.path()).unwrap().count(), 0);
}

#[test]
fn test_create_into_existing_dir_is_a_noop() {
    let cwd = TempDir::new().unwrap();
    let existing = cwd.path().join("proj");
    fs::create_dir(&existing).unwrap();
    fs::write(existing.join("keep.txt"), "precious").unwrap();

    trellis()
        .args(["create", "proj"])
        .current_dir(cwd.path())
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(existing.join("keep.txt")).unwrap(),
        "precious"
    );
    assert_eq!(fs::read_dir(&existing).unwrap().count(), 1);
}

#[test]
fn test_missing_template_root_fails_before_prompting() {
    let cwd = TempDir::new().unwrap();

    trellis()
        .args([
            "create",
            "proj",
            "--template-dir",
            "/definitely/not/a/template/root",
        ])
        .current_dir(cwd.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("template directory not found"));

    assert!(!cwd.path().join("proj").exists());
}

#[test]
fn test_unknown_template_key_fails() {
    let cwd = TempDir::new().unwrap();
    let templates = project_templates();

    trellis()
        .args(["create", "proj", "--template", "nope"])
        .arg("--template-dir")
        .arg(templates.path())
        .current_dir(cwd.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown template"));
}

#[test]
fn test_multi_variant_template_requires_language() {
    let cwd = TempDir::new().unwrap();
    let templates = project_templates();

    trellis()
        .args(["create", "proj", "--template", "basic"])
        .arg("--template-dir")
        .arg(templates.path())
        .current_dir(cwd.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("needs a language"));
}

#[test]
fn test_unknown_language_tag_fails() {
    let cwd = TempDir::new().unwrap();
    let templates = project_templates();

    trellis()
        .args(["create", "proj", "--template", "basic", "--language", "ruby"])
        .arg("--template-dir")
        .arg(templates.path())
        .current_dir(cwd.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown language"));
}

#[test]
fn test_invalid_link_fails() {
    let cwd = TempDir::new().unwrap();
    let templates = project_templates();

    trellis()
        .args(["create", "proj", "--link", "not a link"])
        .arg("--template-dir")
        .arg(templates.path())
        .current_dir(cwd.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid template link"));
}

#[test]
fn test_noninteractive_create_scaffolds_a_project() {
    let cwd = TempDir::new().unwrap();
    let templates = project_templates();

    trellis()
        .args([
            "create",
            "demo",
            "--template",
            "basic",
            "--language",
            "javascript",
            "--skip-git",
            "--skip-install",
        ])
        .arg("--template-dir")
        .arg(templates.path())
        .current_dir(cwd.path())
        .assert()
        .success();

    let project = cwd.path().join("demo");
    assert_eq!(
        fs::read_to_string(project.join("index.html")).unwrap(),
        "Hello demo"
    );
    assert_eq!(
        fs::read_to_string(project.join("package.json")).unwrap(),
        "{\"name\": \"demo\"}"
    );
    // Marker-less files keep their contents, placeholders included.
    assert_eq!(
        fs::read_to_string(project.join("src/main.js")).unwrap(),
        "console.log('{{untouched}}')"
    );
    assert!(!project.join("index.html.art").exists());
    // --skip-git means no repository.
    assert!(!project.join(".git").exists());
}

#[test]
fn test_env_var_points_at_the_template_root() {
    let cwd = TempDir::new().unwrap();
    let templates = project_templates();

    trellis()
        .env("TRELLIS_TEMPLATE_DIR", templates.path())
        .args([
            "create",
            "envdemo",
            "--template",
            "basic",
            "--language",
            "typescript",
            "--skip-git",
            "--skip-install",
        ])
        .current_dir(cwd.path())
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(cwd.path().join("envdemo/index.html")).unwrap(),
        "Hello envdemo"
    );
}

#[test]
fn test_noninteractive_generate_scaffolds_a_component() {
    let cwd = TempDir::new().unwrap();
    let widgets = widget_templates();

    trellis()
        .args(["generate", "MyButton", "--template", "widget"])
        .arg("--template-dir")
        .arg(widgets.path())
        .current_dir(cwd.path())
        .assert()
        .success();

    let component = cwd.path().join("MyButton");
    assert_eq!(
        fs::read_to_string(component.join("src/MyButton.jsx")).unwrap(),
        "export const MyButton = () => null;\n"
    );
    // generate never initializes a repository.
    assert!(!component.join(".git").exists());
}

#[test]
fn test_widget_env_var_points_at_the_widget_root() {
    let cwd = TempDir::new().unwrap();
    let widgets = widget_templates();

    trellis()
        .env("TRELLIS_WIDGET_DIR", widgets.path())
        .args(["generate", "Card", "--template", "widget"])
        .current_dir(cwd.path())
        .assert()
        .success();

    assert!(cwd.path().join("Card/src/Card.jsx").is_file());
}

#[test]
fn test_generate_into_existing_dir_is_a_noop() {
    let cwd = TempDir::new().unwrap();
    let widgets = widget_templates();
    let existing = cwd.path().join("MyButton");
    fs::create_dir(&existing).unwrap();

    trellis()
        .args(["generate", "MyButton", "--template", "widget"])
        .arg("--template-dir")
        .arg(widgets.path())
        .current_dir(cwd.path())
        .assert()
        .success();

    assert_eq!(fs::read_dir(&existing).unwrap().count(), 0);
}
