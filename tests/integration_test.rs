use image::GenericImageView;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Runs `placeholder-icons` with no arguments inside an empty working directory
/// and asserts that both icons land in `assets/icons` with the right sizes.
#[test]
fn test_default_run_creates_both_icons() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let temp_path = temp_dir.path();

    let output = run_in(temp_path, &[]);

    if !output.status.success() {
        eprintln!("Command failed with status: {}", output.status);
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("placeholder-icons command failed");
    }

    let icons_dir = temp_path.join("assets").join("icons");
    assert!(icons_dir.is_dir(), "assets/icons should be created");

    for (filename, size) in [("app_icon.png", 1024), ("splash_icon.png", 512)] {
        let path = icons_dir.join(filename);
        assert!(path.exists(), "{} should exist", path.display());

        let icon = image::open(&path).expect("Generated icon should be a valid PNG");
        assert_eq!(icon.dimensions(), (size, size), "{filename} dimensions");
        assert_eq!(icon.get_pixel(0, 0).0, [103, 58, 183, 255]);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Created assets/icons/app_icon.png (1024x1024)"));
    assert!(stdout.contains("Created assets/icons/splash_icon.png (512x512)"));
    assert!(stdout.contains("flutter pub run flutter_launcher_icons:main"));
    assert!(stdout.contains("flutter pub run flutter_native_splash:create"));
}

/// A second run into an existing directory succeeds and replaces the files
#[test]
fn test_rerun_overwrites_existing_icons() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let temp_path = temp_dir.path();

    assert!(run_in(temp_path, &[]).status.success());

    let app_icon = temp_path.join("assets/icons/app_icon.png");
    std::fs::write(&app_icon, b"not a png").unwrap();

    assert!(run_in(temp_path, &[]).status.success());

    let icon = image::open(&app_icon).expect("Icon should have been rewritten");
    assert_eq!(icon.dimensions(), (1024, 1024));
}

/// Colour flags are validated before anything touches the filesystem
#[test]
fn test_invalid_color_fails_without_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let temp_path = temp_dir.path();

    let output = run_in(temp_path, &["--background", "definitely-not-a-color"]);

    assert!(!output.status.success());
    assert!(!temp_path.join("assets").exists());
}

/// Positional arguments are not part of the interface and are rejected
#[test]
fn test_positional_argument_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let temp_path = temp_dir.path();

    let output = run_in(temp_path, &["extra"]);

    assert!(!output.status.success());
    assert!(!temp_path.join("assets").exists());
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_placeholder-icons"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run placeholder-icons command")
}
