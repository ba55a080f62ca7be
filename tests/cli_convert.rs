//! CLI integration tests for image-to-sprite conversion
//!
//! These tests run the binary end to end against palettes and PNGs written
//! into a temporary directory, then check the sprite file and exit status.

use image::{Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const BW_PALETTE: &str = "# black and white\n0 #000000\n1 #FFFFFF\n";

/// Run the charsprite binary from inside `dir`
fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_charsprite"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute charsprite")
}

fn write_palette(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("palette.txt");
    fs::write(&path, content).expect("Failed to write palette");
    path
}

fn write_png(dir: &Path, name: &str, img: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    img.save(&path).expect("Failed to write PNG");
    path
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// A 2x2 image of four exact palette colors maps to the matching block
#[test]
fn test_convert_exact_colors() {
    let temp = TempDir::new().unwrap();
    write_palette(temp.path(), "R #FF0000\nG #00FF00\nB #0000FF\nK #000000\n");

    let mut img = RgbImage::new(2, 2);
    img.put_pixel(0, 0, Rgb([255, 0, 0]));
    img.put_pixel(1, 0, Rgb([0, 255, 0]));
    img.put_pixel(0, 1, Rgb([0, 0, 255]));
    img.put_pixel(1, 1, Rgb([0, 0, 0]));
    write_png(temp.path(), "quad.png", &img);

    let output = run_in(temp.path(), &["quad.png", "palette.txt", "sprite.txt"]);
    assert!(output.status.success(), "Convert failed: {}", stderr(&output));

    let sprite = fs::read_to_string(temp.path().join("sprite.txt")).unwrap();
    assert_eq!(sprite, "RG\nBK\n");

    let log = stderr(&output);
    assert!(log.contains("Loaded palette with 4 colors"), "stderr: {}", log);
    assert!(log.contains("Processing row 2/2 (100.0%)"), "stderr: {}", log);
    assert!(log.contains("Dimensions: 2x2"), "stderr: {}", log);
}

/// Width-only resize derives height from the aspect ratio
#[test]
fn test_convert_width_only() {
    let temp = TempDir::new().unwrap();
    write_palette(temp.path(), BW_PALETTE);
    write_png(temp.path(), "wide.png", &RgbImage::from_pixel(100, 50, Rgb([10, 10, 10])));

    let output = run_in(temp.path(), &["wide.png", "palette.txt", "out.txt", "--width", "50"]);
    assert!(output.status.success(), "Convert failed: {}", stderr(&output));

    let sprite = fs::read_to_string(temp.path().join("out.txt")).unwrap();
    let rows: Vec<&str> = sprite.lines().collect();
    assert_eq!(rows.len(), 25);
    assert!(rows.iter().all(|r| *r == "0".repeat(50)));
}

/// Height-only resize derives width from the aspect ratio
#[test]
fn test_convert_height_only() {
    let temp = TempDir::new().unwrap();
    write_palette(temp.path(), BW_PALETTE);
    write_png(temp.path(), "wide.png", &RgbImage::from_pixel(100, 50, Rgb([240, 240, 240])));

    let output = run_in(temp.path(), &["wide.png", "palette.txt", "out.txt", "-y", "20"]);
    assert!(output.status.success(), "Convert failed: {}", stderr(&output));

    let sprite = fs::read_to_string(temp.path().join("out.txt")).unwrap();
    let rows: Vec<&str> = sprite.lines().collect();
    assert_eq!(rows.len(), 20);
    assert!(rows.iter().all(|r| *r == "1".repeat(40)));
}

/// Both dimensions with --preserve-aspect honors both and warns
#[test]
fn test_convert_preserve_aspect_with_both_dimensions() {
    let temp = TempDir::new().unwrap();
    write_palette(temp.path(), BW_PALETTE);
    write_png(temp.path(), "img.png", &RgbImage::from_pixel(100, 50, Rgb([0, 0, 0])));

    let output = run_in(
        temp.path(),
        &["img.png", "palette.txt", "out.txt", "-w", "8", "-y", "8", "--preserve-aspect"],
    );
    assert!(output.status.success(), "Convert failed: {}", stderr(&output));
    assert!(stderr(&output).contains("--preserve-aspect ignored"));

    let sprite = fs::read_to_string(temp.path().join("out.txt")).unwrap();
    assert_eq!(sprite.lines().count(), 8);
    assert!(sprite.lines().all(|r| r.len() == 8));
}

/// Malformed palette lines are skipped with a warning
#[test]
fn test_convert_skips_malformed_palette_lines() {
    let temp = TempDir::new().unwrap();
    write_palette(temp.path(), "x #FFF\n0 #000000\n1 #FFFFFF\n");
    write_png(temp.path(), "dot.png", &RgbImage::from_pixel(1, 1, Rgb([250, 250, 250])));

    let output = run_in(temp.path(), &["dot.png", "palette.txt", "out.txt"]);
    assert!(output.status.success(), "Convert failed: {}", stderr(&output));
    assert!(stderr(&output).contains("Invalid hex color on line 1"));
    assert_eq!(fs::read_to_string(temp.path().join("out.txt")).unwrap(), "1\n");
}

/// Config file supplies defaults, CLI flags override them
#[test]
fn test_convert_uses_config_file() {
    let temp = TempDir::new().unwrap();
    write_palette(temp.path(), BW_PALETTE);
    write_png(temp.path(), "img.png", &RgbImage::from_pixel(100, 50, Rgb([0, 0, 0])));
    fs::write(temp.path().join("charsprite.toml"), "[resize]\nwidth = 10\nfilter = \"nearest\"\n")
        .unwrap();

    let output = run_in(temp.path(), &["img.png", "palette.txt", "a.txt"]);
    assert!(output.status.success(), "Convert failed: {}", stderr(&output));
    let sprite = fs::read_to_string(temp.path().join("a.txt")).unwrap();
    assert_eq!(sprite.lines().count(), 5);

    let output = run_in(temp.path(), &["img.png", "palette.txt", "b.txt", "-w", "4"]);
    assert!(output.status.success(), "Convert failed: {}", stderr(&output));
    let sprite = fs::read_to_string(temp.path().join("b.txt")).unwrap();
    assert_eq!(sprite, "0000\n0000\n");
}

/// A single CLI dimension replaces both config dimensions
#[test]
fn test_cli_width_replaces_config_height() {
    let temp = TempDir::new().unwrap();
    write_palette(temp.path(), BW_PALETTE);
    write_png(temp.path(), "img.png", &RgbImage::from_pixel(100, 50, Rgb([0, 0, 0])));
    fs::write(temp.path().join("charsprite.toml"), "[resize]\nheight = 40\n").unwrap();

    let args = ["img.png", "palette.txt", "out.txt", "-w", "50", "--preserve-aspect"];
    let output = run_in(temp.path(), &args);
    assert!(output.status.success(), "Convert failed: {}", stderr(&output));
    assert!(!stderr(&output).contains("--preserve-aspect ignored"));

    let sprite = fs::read_to_string(temp.path().join("out.txt")).unwrap();
    assert_eq!(sprite.lines().count(), 25);
    assert!(sprite.lines().all(|r| r == "0".repeat(50)));
}

/// Config files are discovered from an ancestor of the working directory
#[test]
fn test_config_discovered_from_parent_dir() {
    let temp = TempDir::new().unwrap();
    let work = temp.path().join("art");
    fs::create_dir_all(&work).unwrap();
    write_palette(&work, BW_PALETTE);
    write_png(&work, "img.png", &RgbImage::from_pixel(100, 50, Rgb([0, 0, 0])));
    fs::write(temp.path().join("charsprite.toml"), "[resize]\nwidth = 10\n").unwrap();

    let output = run_in(&work, &["img.png", "palette.txt", "out.txt"]);
    assert!(output.status.success(), "Convert failed: {}", stderr(&output));
    assert_eq!(fs::read_to_string(work.join("out.txt")).unwrap().lines().count(), 5);
}

#[test]
fn test_quiet_suppresses_progress() {
    let temp = TempDir::new().unwrap();
    write_palette(temp.path(), BW_PALETTE);
    write_png(temp.path(), "dot.png", &RgbImage::from_pixel(1, 1, Rgb([0, 0, 0])));

    let output = run_in(temp.path(), &["dot.png", "palette.txt", "out.txt", "--quiet"]);
    assert!(output.status.success(), "Convert failed: {}", stderr(&output));
    assert!(!stderr(&output).contains("Processing row"));
}

#[test]
fn test_missing_palette_fails() {
    let temp = TempDir::new().unwrap();
    write_png(temp.path(), "dot.png", &RgbImage::new(1, 1));

    let output = run_in(temp.path(), &["dot.png", "nope.txt", "out.txt"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error: Palette file 'nope.txt' not found"));
    assert!(!temp.path().join("out.txt").exists());
}

#[test]
fn test_empty_palette_fails() {
    let temp = TempDir::new().unwrap();
    write_palette(temp.path(), "# nothing here\n\n");
    write_png(temp.path(), "dot.png", &RgbImage::new(1, 1));

    let output = run_in(temp.path(), &["dot.png", "palette.txt", "out.txt"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error: Palette is empty"));
}

#[test]
fn test_missing_image_fails() {
    let temp = TempDir::new().unwrap();
    write_palette(temp.path(), BW_PALETTE);

    let output = run_in(temp.path(), &["missing.png", "palette.txt", "out.txt"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error: Image file 'missing.png' not found"));
}

#[test]
fn test_unreadable_image_fails() {
    let temp = TempDir::new().unwrap();
    write_palette(temp.path(), BW_PALETTE);
    fs::write(temp.path().join("broken.png"), b"not an image").unwrap();

    let output = run_in(temp.path(), &["broken.png", "palette.txt", "out.txt"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error: Error processing image"));
}

#[test]
fn test_unwritable_output_fails() {
    let temp = TempDir::new().unwrap();
    write_palette(temp.path(), BW_PALETTE);
    write_png(temp.path(), "dot.png", &RgbImage::new(1, 1));
    fs::create_dir(temp.path().join("taken")).unwrap();

    let output = run_in(temp.path(), &["dot.png", "palette.txt", "taken"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error: Error writing output"));
}

#[test]
fn test_invalid_arguments_exit_code() {
    let temp = TempDir::new().unwrap();
    let output = run_in(temp.path(), &["only-one-arg"]);
    assert_eq!(output.status.code(), Some(2));

    let output = run_in(temp.path(), &["a.png", "p.txt", "o.txt", "--width", "0"]);
    assert_eq!(output.status.code(), Some(2));
}
