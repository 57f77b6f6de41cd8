//! Integration tests for patchbay-cli.
//!
//! Tests run the `patchbay` binary against temporary config and diagram
//! directories, covering listing, checking and editing workflows.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper to get the `patchbay` binary with an isolated config directory.
fn patchbay_bin(config_dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_patchbay"));
    cmd.arg("--config-dir").arg(config_dir);
    cmd
}

fn run(config_dir: &Path, args: &[&str]) -> Output {
    patchbay_bin(config_dir)
        .args(args)
        .output()
        .expect("failed to run patchbay")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Export a bundled example into `dir` and return its path.
fn export_example(config_dir: &Path, dir: &Path, name: &str) -> String {
    let path = dir.join(format!("{name}.json"));
    let path = path.to_str().unwrap().to_string();
    let output = run(config_dir, &["examples", name, "--export", &path]);
    assert!(output.status.success(), "export of {name} failed");
    path
}

// ---------------------------------------------------------------------------
// `patchbay catalog`
// ---------------------------------------------------------------------------

#[test]
fn cli_catalog_lists_categories() {
    let config = TempDir::new().unwrap();
    let output = run(config.path(), &["catalog"]);
    assert!(output.status.success());

    let stdout = stdout(&output);
    for header in ["Consoles", "Switchers", "Upscalers", "Adapters", "Displays"] {
        assert!(stdout.contains(header), "catalog should list {header}");
    }
    assert!(stdout.contains("snes"));
    assert!(stdout.contains("svs-gscartsw"));
}

#[test]
fn cli_catalog_filters() {
    let config = TempDir::new().unwrap();

    let output = run(config.path(), &["catalog", "--category", "display"]);
    assert!(output.status.success());
    let listing = stdout(&output);
    assert!(listing.contains("pvm-20m2"));
    assert!(!listing.contains("snes"));

    let output = run(config.path(), &["catalog", "--search", "TRINITRON"]);
    let listing = stdout(&output);
    assert!(listing.contains("trinitron-kv27"));
    assert!(!listing.contains("ossc"));

    let output = run(config.path(), &["catalog", "--category", "toaster"]);
    assert!(!output.status.success());
}

#[test]
fn cli_catalog_detail() {
    let config = TempDir::new().unwrap();
    let output = run(config.path(), &["catalog", "svs"]);
    assert!(output.status.success());

    let detail = stdout(&output);
    assert!(detail.contains("Scalable Video Switch"));
    assert!(detail.contains("Max inputs:  32"));
    assert!(detail.contains("Max outputs: 6"));

    let output = run(config.path(), &["catalog", "vectrex"]);
    assert!(!output.status.success());
}

#[test]
fn cli_catalog_uses_configured_catalog() {
    let config = TempDir::new().unwrap();
    let catalog = config.path().join("catalog.json");
    std::fs::write(
        &catalog,
        r#"[{ "id": 9, "name": "Vectrex", "category": "console",
              "specs": { "outputs": ["composite"] } }]"#,
    )
    .unwrap();
    std::fs::write(
        config.path().join("settings.toml"),
        format!("catalog_path = {:?}\n", catalog.to_str().unwrap()),
    )
    .unwrap();

    let output = run(config.path(), &["catalog"]);
    assert!(output.status.success());
    let listing = stdout(&output);
    assert!(listing.contains("Vectrex"));
    assert!(!listing.contains("snes"));
}

// ---------------------------------------------------------------------------
// `patchbay compat`
// ---------------------------------------------------------------------------

#[test]
fn cli_compat_pairs() {
    let config = TempDir::new().unwrap();

    let output = run(config.path(), &["compat", "rgb", "scart"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains(": compatible"));

    let output = run(config.path(), &["compat", "S-Video", "composite"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("incompatible"));

    let output = run(config.path(), &["compat", "rgb"]);
    assert!(!output.status.success(), "one signal type is not enough");
}

#[test]
fn cli_compat_matrix() {
    let config = TempDir::new().unwrap();
    let output = run(config.path(), &["compat", "--matrix"]);
    assert!(output.status.success());

    let matrix = stdout(&output);
    assert!(matrix.contains("hdmi"));
    assert!(matrix.contains("s-video"));
    assert!(matrix.contains("yes"));
}

// ---------------------------------------------------------------------------
// `patchbay examples`, `check`, `info`
// ---------------------------------------------------------------------------

#[test]
fn cli_examples_list_and_show() {
    let config = TempDir::new().unwrap();
    let output = run(config.path(), &["examples"]);
    assert!(output.status.success());
    let listing = stdout(&output);
    for name in ["simple", "medium", "advanced", "svs"] {
        assert!(listing.contains(name), "examples should list {name}");
    }

    let output = run(config.path(), &["examples", "svs"]);
    assert!(output.status.success());
    let detail = stdout(&output);
    assert!(detail.contains("SVS Setup"));
    assert!(detail.contains("gscartsw SCART Switch"));

    let output = run(config.path(), &["examples", "huge"]);
    assert!(!output.status.success());
}

#[test]
fn cli_check_clean_example() {
    let config = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let path = export_example(config.path(), dir.path(), "advanced");

    let output = run(config.path(), &["check", &path]);
    assert!(output.status.success());
    let report = stdout(&output);
    assert!(report.contains("Advanced Setup"));
    assert!(report.contains("OK: no repairs needed"));
}

#[test]
fn cli_check_repairs_and_writes() {
    let config = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(
        &path,
        r#"{
          "name": "Broken",
          "nodes": [
            { "id": "node_0", "label": "NES", "kind": "console",
              "staticSpec": { "outputs": ["rf", "composite"] }, "selectedOutput": "composite" },
            { "id": "node_1", "label": "TV", "kind": "display",
              "staticSpec": { "inputs": ["rf", "s-video"] } }
          ],
          "edges": [
            { "id": "edge_0", "sourceNodeId": "node_0", "sourcePortIndex": 0,
              "targetNodeId": "node_1", "targetPortIndex": 1, "signalType": "composite" },
            { "id": "edge_1", "sourceNodeId": "node_0", "sourcePortIndex": 0,
              "targetNodeId": "node_9", "targetPortIndex": 0, "signalType": "composite" }
          ]
        }"#,
    )
    .unwrap();
    let fixed = dir.path().join("fixed.json");

    let output = run(
        config.path(),
        &["check", path.to_str().unwrap(), "--write", fixed.to_str().unwrap()],
    );
    assert!(output.status.success());
    let report = stdout(&output);
    assert!(report.contains("dropped edge_0"), "{report}");
    assert!(report.contains("dropped edge_1"), "{report}");

    let output = run(config.path(), &["check", fixed.to_str().unwrap()]);
    assert!(stdout(&output).contains("OK: no repairs needed"));
}

#[test]
fn cli_check_missing_diagram() {
    let config = TempDir::new().unwrap();
    let output = run(config.path(), &["check", "/nonexistent/den.json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}

#[test]
fn cli_info_shows_ports_and_cables() {
    let config = TempDir::new().unwrap();
    let output = run(config.path(), &["info", "simple"]);
    assert!(output.status.success());

    let info = stdout(&output);
    assert!(info.contains("Simple Setup"));
    assert!(info.contains("[output: s-video of rf/composite/s-video/rgb]"));
    assert!(info.contains("node_0:out-0 -> node_1:in-2"));
    assert!(info.contains("<- edge_0"));
}

#[test]
fn cli_info_json() {
    let config = TempDir::new().unwrap();
    let output = run(config.path(), &["info", "medium", "--json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["nodes"].as_array().unwrap().len(), 5);
    assert_eq!(value["edges"][0]["signalType"], "composite");
}

// ---------------------------------------------------------------------------
// `patchbay edit`, `recent`
// ---------------------------------------------------------------------------

#[test]
fn cli_edit_adds_and_connects() {
    let config = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let path = export_example(config.path(), dir.path(), "simple");

    let output = run(
        config.path(),
        &[
            "edit",
            &path,
            "--add",
            "lcd-tv",
            "--add",
            "retrotink-2x",
            "--connect",
            "node_3:out-0=node_2:in-0",
        ],
    );
    assert!(output.status.success(), "{}", stdout(&output));
    let log = stdout(&output);
    assert!(log.contains("added node_2"));
    assert!(log.contains("added node_3"));
    assert!(log.contains("connected edge_1"));

    let output = run(config.path(), &["info", &path, "--json"]);
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["nodes"].as_array().unwrap().len(), 4);
    assert_eq!(value["edges"][1]["signalType"], "hdmi");
}

#[test]
fn cli_edit_rejection_leaves_file_unchanged() {
    let config = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let path = export_example(config.path(), dir.path(), "simple");
    let before = std::fs::read(&path).unwrap();

    let output = run(
        config.path(),
        &[
            "edit",
            &path,
            "--add",
            "ossc",
            "--connect",
            "node_0:out-0=node_1:in-0",
            "--retype",
            "node_0=composite",
        ],
    );
    assert!(!output.status.success());
    let log = stdout(&output);
    assert!(log.contains("added node_2"));
    assert!(log.contains("rejected --connect"));
    assert!(log.contains("rejected --retype node_0=composite"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("2 operation(s) rejected"));

    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn cli_edit_svs_ports() {
    let config = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("svs_small.json");

    let output = run(
        config.path(),
        &[
            "edit",
            "svs",
            "--inputs",
            "node_4=3",
            "--output-type",
            "node_4:1=component",
            "-o",
            out.to_str().unwrap(),
        ],
    );
    assert!(output.status.success(), "{}", stdout(&output));
    let log = stdout(&output);
    assert!(log.contains("node_4 now has 3 inputs"));
    assert!(log.contains("dropped edge_3"));
    assert!(log.contains("node_4 out-1 is now component"));

    // scart (the OSSC input) still accepts component, so only the N64 cable went.
    let output = run(config.path(), &["info", out.to_str().unwrap(), "--json"]);
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["edges"].as_array().unwrap().len(), 6);
}

#[test]
fn cli_edit_example_requires_output() {
    let config = TempDir::new().unwrap();
    let output = run(config.path(), &["edit", "simple", "--add", "ossc"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("use -o"));
}

#[test]
fn cli_edit_bad_argument_syntax() {
    let config = TempDir::new().unwrap();
    let output = run(config.path(), &["edit", "simple", "--connect", "node_0=node_1"]);
    assert!(!output.status.success());
}

#[test]
fn cli_recent_tracks_opened_files() {
    let config = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();

    let output = run(config.path(), &["recent"]);
    assert!(stdout(&output).contains("(none)"));

    let simple = export_example(config.path(), dir.path(), "simple");
    let medium = export_example(config.path(), dir.path(), "medium");
    run(config.path(), &["check", &simple]);
    run(config.path(), &["info", &medium]);

    let output = run(config.path(), &["recent"]);
    assert!(output.status.success());
    let listing = stdout(&output);
    let medium_at = listing.find("medium").unwrap();
    let simple_at = listing.find("simple").unwrap();
    assert!(medium_at < simple_at, "newest first:\n{listing}");
}
