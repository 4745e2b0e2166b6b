use super::*;

#[cfg(unix)]
fn fake_dot(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-dot");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod");
    path
}

// =============================================================================
// PATHS
// =============================================================================

#[test]
fn png_path_keeps_png_extension() {
    assert_eq!(png_path(Path::new("out/arch.png")), PathBuf::from("out/arch.png"));
    assert_eq!(png_path(Path::new("out/arch.PNG")), PathBuf::from("out/arch.PNG"));
}

#[test]
fn png_path_appends_extension_otherwise() {
    assert_eq!(png_path(Path::new("out/arch")), PathBuf::from("out/arch.png"));
    assert_eq!(png_path(Path::new("out/arch.svg")), PathBuf::from("out/arch.svg.png"));
}

#[test]
fn partial_path_is_a_sibling() {
    assert_eq!(partial_path(Path::new("out/arch.png")), PathBuf::from("out/arch.png.partial"));
}

// =============================================================================
// INVOCATION
// =============================================================================

#[test]
fn missing_executable_is_backend_unavailable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("out.png");
    let err = write_png(&dir.path().join("no-such-dot"), "digraph {}", &target).expect_err("missing dot");
    assert!(matches!(err, Error::BackendUnavailable(_)), "{err:?}");
    assert!(!target.exists());
}

#[cfg(unix)]
#[test]
fn successful_render_moves_image_into_place() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dot = fake_dot(dir.path(), "cat > /dev/null\nprintf 'PNG' > \"$3\"");
    let target = dir.path().join("out.png");

    write_png(&dot, "digraph {}", &target).expect("render");

    assert_eq!(std::fs::read(&target).expect("image"), b"PNG");
    assert!(!partial_path(&target).exists());
}

#[cfg(unix)]
#[test]
fn failed_render_reports_stderr_and_leaves_no_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dot = fake_dot(dir.path(), "cat > /dev/null\nprintf 'junk' > \"$3\"\necho 'syntax error in line 1' >&2\nexit 1");
    let target = dir.path().join("out.png");

    let err = write_png(&dot, "digraph {", &target).expect_err("render fails");

    match err {
        Error::RenderFailure(message) => assert!(message.contains("syntax error in line 1"), "{message}"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!target.exists());
    assert!(!partial_path(&target).exists());
}

#[cfg(unix)]
#[test]
fn dot_receives_source_on_stdin() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dot = fake_dot(dir.path(), "cat > \"$3\"");
    let target = dir.path().join("echo.png");

    write_png(&dot, "digraph { a -> b; }\n", &target).expect("render");

    assert_eq!(std::fs::read_to_string(&target).expect("image"), "digraph { a -> b; }\n");
}

#[cfg(unix)]
#[test]
fn large_source_with_noisy_stderr_completes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dot = fake_dot(dir.path(), "head -c 200000 /dev/zero | tr '\\0' w >&2\ncat > \"$3\"");
    let target = dir.path().join("big.png");
    let source = format!("digraph {{\n{}}}\n", "  \"node\";\n".repeat(50_000));

    write_png(&dot, &source, &target).expect("render");

    assert_eq!(std::fs::read(&target).expect("image").len(), source.len());
}
