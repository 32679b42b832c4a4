use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Run runparcel with given args.
fn runparcel() -> Command {
    cargo_bin_cmd!("runparcel")
}

const VALUES: &str = "\
REGION: us-central1
IMAGE_REGISTRY: gcr.io/acme
environments:
  staging:
    SERVICE_NAME: api-staging
  production:
    SERVICE_NAME: api
    REGION: europe-west1
";

const TEMPLATE: &str = "\
service: {{SERVICE_NAME}}
region: {{REGION}}
image: {{IMAGE_REGISTRY}}/{{SERVICE_NAME}}
";

/// Helper: lay out the default project structure.
fn setup(dir: &assert_fs::TempDir, values: &str, template: &str) {
    dir.child("values.yaml").write_str(values).unwrap();
    dir.child("cloudrun/run.yaml.tmpl").write_str(template).unwrap();
}

// ─── Happy path ──────────────────────────────────────────────────

#[test]
fn generate_renders_scenario() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(
        &dir,
        "environments:\n  staging:\n    IMAGE_REGISTRY: r\n    SERVICE_NAME: s\nREGION: us-central1\n",
        "region={{REGION}} image={{IMAGE_REGISTRY}}",
    );

    runparcel()
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated: deploy/staging.yaml"));

    dir.child("deploy/staging.yaml")
        .assert("region=us-central1 image=r");
}

#[test]
fn generate_writes_one_file_per_environment_with_overrides() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(&dir, VALUES, TEMPLATE);

    runparcel()
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .success();

    dir.child("deploy/staging.yaml").assert(
        "service: api-staging\nregion: us-central1\nimage: gcr.io/acme/api-staging\n",
    );
    dir.child("deploy/production.yaml")
        .assert("service: api\nregion: europe-west1\nimage: gcr.io/acme/api\n");

    let count = std::fs::read_dir(dir.path().join("deploy")).unwrap().count();
    assert_eq!(count, 2);
}

#[test]
fn generate_honours_custom_paths() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("conf/values.yml").write_str(VALUES).unwrap();
    dir.child("svc.tmpl").write_str("{{SERVICE_NAME}}").unwrap();

    runparcel()
        .current_dir(dir.path())
        .args([
            "generate",
            "-t",
            "svc.tmpl",
            "-v",
            "conf/values.yml",
            "-o",
            "out/manifests",
        ])
        .assert()
        .success();

    dir.child("out/manifests/staging.yaml").assert("api-staging");
    dir.child("deploy").assert(predicate::path::missing());
}

#[test]
fn generate_reads_project_config() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("vals.yaml").write_str(VALUES).unwrap();
    dir.child("tpl/app.tmpl").write_str("{{REGION}}").unwrap();
    dir.child("runparcel.toml")
        .write_str("[generate]\nvalues = \"vals.yaml\"\ntemplate = \"tpl/app.tmpl\"\noutput_dir = \"rendered\"\n")
        .unwrap();

    runparcel()
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .success();

    dir.child("rendered/production.yaml").assert("europe-west1");
}

#[test]
fn generate_with_explicit_tag_injects_image_tag() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(&dir, VALUES, "{{IMAGE_REGISTRY}}/{{SERVICE_NAME}}:{{IMAGE_TAG}}");

    runparcel()
        .current_dir(dir.path())
        .args(["generate", "--tag", "v1.2.3"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Using provided tag: v1.2.3"));

    dir.child("deploy/production.yaml")
        .assert("gcr.io/acme/api:v1.2.3");
}

#[test]
fn generate_quiet_prints_nothing() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(&dir, VALUES, TEMPLATE);

    runparcel()
        .current_dir(dir.path())
        .args(["--quiet", "generate"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// ─── Failures ────────────────────────────────────────────────────

#[test]
fn generate_missing_environments_fails_without_output_dir() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(&dir, "REGION: us-central1\n", TEMPLATE);

    runparcel()
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("'environments' key not found"));

    dir.child("deploy").assert(predicate::path::missing());
}

#[test]
fn generate_error_is_reported_on_one_line() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(&dir, "REGION: us-central1\n", TEMPLATE);

    let output = runparcel()
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .failure()
        .get_output()
        .clone();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.lines().count(), 1, "stderr was: {stderr:?}");
    assert!(stderr.contains("Error: Invalid values file"));
}

#[test]
fn generate_environment_without_body_fails() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(
        &dir,
        "IMAGE_REGISTRY: r\nSERVICE_NAME: s\nenvironments:\n  staging:\n",
        TEMPLATE,
    );

    runparcel()
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("environment staging: expected a map, found a null"));

    dir.child("deploy").assert(predicate::path::missing());
}

#[test]
fn generate_go_style_template_explains_dialect() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(&dir, VALUES, "region={{.REGION}}\n");

    runparcel()
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template syntax error in run.yaml.tmpl"))
        .stderr(predicate::str::contains("not {{.REGION}}"));
}

#[test]
fn generate_zero_git_timeout_is_rejected() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(&dir, VALUES, TEMPLATE);
    dir.child("runparcel.toml")
        .write_str("[tag]\ngit_timeout_secs = 0\n")
        .unwrap();

    runparcel()
        .current_dir(dir.path())
        .args(["generate", "--tag"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("git_timeout_secs must be at least 1"));
}

#[test]
fn generate_missing_service_name_fails() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(
        &dir,
        "IMAGE_REGISTRY: r\nenvironments:\n  staging:\n    REGION: x\n",
        TEMPLATE,
    );

    runparcel()
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "mandatory key 'SERVICE_NAME' not found or is empty for environment 'staging'",
        ));

    dir.child("deploy/staging.yaml")
        .assert(predicate::path::missing());
}

#[test]
fn generate_stops_at_first_failing_environment() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(
        &dir,
        "IMAGE_REGISTRY: r\nenvironments:\n  alpha:\n    SERVICE_NAME: a\n  beta:\n    SERVICE_NAME: \"\"\n  gamma:\n    SERVICE_NAME: g\n",
        "{{SERVICE_NAME}}",
    );

    runparcel()
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Generated: deploy/alpha.yaml"))
        .stderr(predicate::str::contains("'beta'"));

    dir.child("deploy/alpha.yaml").assert("a");
    dir.child("deploy/beta.yaml").assert(predicate::path::missing());
    dir.child("deploy/gamma.yaml").assert(predicate::path::missing());
}

#[test]
fn generate_missing_values_file_fails() {
    let dir = assert_fs::TempDir::new().unwrap();

    runparcel()
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found: values.yaml"));
}

#[test]
fn generate_malformed_values_fails_with_parse_error() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(&dir, "environments: [oops\n", TEMPLATE);

    runparcel()
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse error in values.yaml"));
}

#[test]
fn generate_template_syntax_error_fails() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(&dir, VALUES, "{{#if REGION}}never closed");

    runparcel()
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template syntax error in run.yaml.tmpl"));

    dir.child("deploy").assert(predicate::path::missing());
}

#[test]
fn generate_undefined_template_key_fails() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(&dir, VALUES, "{{CPU_LIMIT}}");

    runparcel()
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template execution failed for environment"));
}

#[test]
fn generate_output_dir_conflict_fails() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(&dir, VALUES, TEMPLATE);
    dir.child("deploy").write_str("not a directory").unwrap();

    runparcel()
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot create output directory"));
}

#[test]
fn generate_rejects_path_like_environment_name() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(
        &dir,
        "IMAGE_REGISTRY: r\nSERVICE_NAME: s\nenvironments:\n  \"../escape\": {}\n",
        TEMPLATE,
    );

    runparcel()
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not usable as a file name"));

    dir.child("escape.yaml").assert(predicate::path::missing());
}

#[test]
fn explicit_missing_config_fails() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(&dir, VALUES, TEMPLATE);

    runparcel()
        .current_dir(dir.path())
        .args(["--config", "nope.toml", "generate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}
