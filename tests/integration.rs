use std::path::Path;
use std::process::{Command, Output};

fn srclink_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_srclink"));
    cmd.current_dir(dir);
    cmd
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "srclink failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn run_git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git").args(args).current_dir(dir).output().unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

fn make_git_repo() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    run_git(dir.path(), &["init", "-q"]);
    run_git(dir.path(), &["config", "user.name", "test-user"]);
    run_git(dir.path(), &["config", "user.email", "test@example.com"]);
    run_git(dir.path(), &["config", "tag.gpgSign", "false"]);
    run_git(dir.path(), &["config", "commit.gpgSign", "false"]);
    run_git(dir.path(), &["commit", "-q", "--allow-empty", "-m", "initial"]);
    dir
}

#[test]
fn url_uses_short_commit_without_tag() {
    let repo = make_git_repo();
    let short = run_git(repo.path(), &["rev-parse", "--short", "HEAD"]);

    let url = stdout_of(&srclink_cmd(repo.path()).arg("url").output().unwrap());
    assert_eq!(
        url.trim_end(),
        format!("https://github.com/espressif/esp-idf/tree/{}/", short.trim())
    );
}

#[test]
fn url_prefers_exact_tag_without_leading_v() {
    let repo = make_git_repo();
    run_git(repo.path(), &["tag", "-a", "v4.2", "-m", "release 4.2"]);

    let url = stdout_of(&srclink_cmd(repo.path()).arg("url").output().unwrap());
    assert_eq!(url.trim_end(), "https://github.com/espressif/esp-idf/tree/4.2/");
}

#[test]
fn commit_and_tag_logged_without_verbose_flag() {
    let repo = make_git_repo();
    run_git(repo.path(), &["tag", "-a", "v4.2", "-m", "release 4.2"]);
    let short = run_git(repo.path(), &["rev-parse", "--short", "HEAD"]);

    let output = srclink_cmd(repo.path()).arg("url").output().unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("git commit id"), "stderr: {stderr}");
    assert!(stderr.contains(short.trim()), "stderr: {stderr}");
    assert!(stderr.contains("git tag"), "stderr: {stderr}");
    assert!(stderr.contains("4.2"), "stderr: {stderr}");
}

#[test]
fn url_ignores_tag_on_older_commit() {
    let repo = make_git_repo();
    run_git(repo.path(), &["tag", "-a", "v4.2", "-m", "release 4.2"]);
    run_git(repo.path(), &["commit", "-q", "--allow-empty", "-m", "after release"]);
    let short = run_git(repo.path(), &["rev-parse", "--short", "HEAD"]);

    let url = stdout_of(&srclink_cmd(repo.path()).arg("url").output().unwrap());
    assert!(url.trim_end().ends_with(&format!("/tree/{}/", short.trim())), "got {url}");
}

#[test]
fn missing_git_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".srclink.toml"), "git = \"srclink-no-such-git\"\n").unwrap();

    let url = stdout_of(&srclink_cmd(dir.path()).arg("url").output().unwrap());
    assert_eq!(url.trim_end(), "https://github.com/espressif/esp-idf/tree//");
}

#[test]
fn explicit_revision_skips_git() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".srclink.toml"),
        "repository = \"https://example.com/org/repo/\"\ngit = \"srclink-no-such-git\"\n",
    )
    .unwrap();

    let url = stdout_of(
        &srclink_cmd(dir.path()).args(["--revision", "v5.1", "url"]).output().unwrap(),
    );
    assert_eq!(url.trim_end(), "https://example.com/org/repo/tree/v5.1/");
}

#[test]
fn render_markdown_fixture() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let output = srclink_cmd(root)
        .args(["--revision", "4.2", "render", "tests/fixtures/docs/guide.md"])
        .output()
        .unwrap();
    let expected = std::fs::read_to_string(root.join("tests/fixtures/docs/guide.md.expected")).unwrap();
    assert_eq!(stdout_of(&output), expected);
}

#[test]
fn render_rst_fixture() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let output = srclink_cmd(root)
        .args(["--revision", "4.2", "render", "tests/fixtures/docs/index.rst"])
        .output()
        .unwrap();
    let expected = std::fs::read_to_string(root.join("tests/fixtures/docs/index.rst.expected")).unwrap();
    assert_eq!(stdout_of(&output), expected);
}

#[test]
fn render_unsupported_extension_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), ":tree:`x`\n").unwrap();

    let output = srclink_cmd(dir.path())
        .args(["--revision", "1.0", "render", "notes.txt"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unsupported Format"));
}

#[test]
fn apply_rewrites_in_place_once() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("docs")).unwrap();
    std::fs::write(dir.path().join("docs/api.md"), "See :component:`nvs_flash`.\n").unwrap();
    std::fs::write(dir.path().join("docs/plain.md"), "Nothing here.\n").unwrap();

    let first = srclink_cmd(dir.path()).args(["--revision", "abc1234", "apply"]).output().unwrap();
    assert!(first.status.success());
    assert!(String::from_utf8_lossy(&first.stderr).contains("Expanded 1 links in 1 files"));

    let content = std::fs::read_to_string(dir.path().join("docs/api.md")).unwrap();
    assert_eq!(
        content,
        "See [nvs_flash](https://github.com/espressif/esp-idf/tree/abc1234/components/nvs_flash).\n"
    );

    let second = srclink_cmd(dir.path()).args(["--revision", "abc1234", "apply"]).output().unwrap();
    assert!(second.status.success());
    assert!(String::from_utf8_lossy(&second.stderr).contains("Expanded 0 links in 0 files"));
}

#[test]
fn apply_writes_nothing_when_a_file_is_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("docs")).unwrap();
    std::fs::write(dir.path().join("docs/a.md"), ":tree:`x`\n").unwrap();
    std::fs::write(dir.path().join("docs/b.md"), b"\xff\xfe :tree:`y`").unwrap();

    let output = srclink_cmd(dir.path()).args(["--revision", "1", "apply"]).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Read Failed"), "stderr: {stderr}");
    assert!(stderr.contains("docs/b.md"), "stderr: {stderr}");

    let untouched = std::fs::read_to_string(dir.path().join("docs/a.md")).unwrap();
    assert_eq!(untouched, ":tree:`x`\n");
}

#[test]
fn apply_leaves_code_samples_alone() {
    let dir = tempfile::tempdir().unwrap();
    let content = "Use :tree:`tools`.\n\n````md\n```\n:tree:`inside`\n```\n````\n";
    std::fs::write(dir.path().join("guide.md"), content).unwrap();

    let output = srclink_cmd(dir.path()).args(["--revision", "1", "apply"]).output().unwrap();
    assert!(output.status.success());

    let rewritten = std::fs::read_to_string(dir.path().join("guide.md")).unwrap();
    assert_eq!(
        rewritten,
        "Use [tools](https://github.com/espressif/esp-idf/tree/1/tools).\n\n````md\n```\n:tree:`inside`\n```\n````\n"
    );
}

#[test]
fn list_json_reports_known_roles_only() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("index.rst"),
        "Intro\n:ref:`skip` then :example:`protocols/mqtt`\n",
    )
    .unwrap();

    let output = srclink_cmd(dir.path())
        .args(["--revision", "4.2", "list", "--json"])
        .output()
        .unwrap();
    let listed: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    let entries = listed.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["role"], "example");
    assert_eq!(entries[0]["line"], 2);
    assert_eq!(entries[0]["source"], "index.rst");
    assert_eq!(
        entries[0]["url"],
        "https://github.com/espressif/esp-idf/tree/4.2/examples/protocols/mqtt"
    );
}

#[test]
fn roles_lists_configured_extras() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".srclink.toml"),
        "[roles]\nheader = \"components/{text}/include\"\n",
    )
    .unwrap();

    let out = stdout_of(&srclink_cmd(dir.path()).args(["--revision", "1.0", "roles"]).output().unwrap());
    let names: Vec<&str> = out.lines().filter_map(|l| l.split_whitespace().next()).collect();
    assert_eq!(names, ["component", "example", "header", "tree"]);
    assert!(out.contains("https://github.com/espressif/esp-idf/tree/1.0/components/{text}/include"));
}

#[test]
fn invalid_role_template_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".srclink.toml"), "[roles]\nbad = \"components/\"\n").unwrap();

    let output = srclink_cmd(dir.path()).args(["--revision", "1.0", "url"]).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid Role Pattern"));
}
