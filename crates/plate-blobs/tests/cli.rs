#![cfg(feature = "cli")]

use assert_cmd::Command;
use image::{Rgb, RgbImage};
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

fn write_plate_image(dir: &Path) -> PathBuf {
    let mut img = RgbImage::from_pixel(240, 200, Rgb([35, 35, 35]));
    for y in 50..=150 {
        for x in 100..=140 {
            img.put_pixel(x, y, Rgb([220, 20, 20]));
        }
    }
    let path = dir.join("frame.png");
    img.save(&path).expect("save image");
    path
}

fn cmd() -> Command {
    Command::cargo_bin("plate-blobs").expect("binary")
}

#[test]
fn writes_report_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let image = write_plate_image(dir.path());
    let report = dir.path().join("report.json");

    cmd()
        .arg(&image)
        .arg("--output")
        .arg(&report)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).expect("read report")).expect("json");
    assert_eq!(json["width"], 240);
    assert_eq!(json["height"], 200);
    assert!(json["error"].is_null());
    let detections = json["detections"].as_array().expect("detections");
    assert_eq!(detections.len(), 1);
    let center = &detections[0]["center"];
    assert!((center[0].as_f64().expect("x") - 120.0).abs() < 0.5);
    assert!((center[1].as_f64().expect("y") - 100.0).abs() < 0.5);
}

#[test]
fn prints_report_without_output_flag() {
    let dir = tempfile::tempdir().expect("tempdir");
    let image = write_plate_image(dir.path());

    cmd()
        .arg(&image)
        .arg("--log-level")
        .arg("off")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"detections\""))
        .stdout(predicate::str::contains("\"angle_deg\""));
}

#[test]
fn writes_debug_images() {
    let dir = tempfile::tempdir().expect("tempdir");
    let image = write_plate_image(dir.path());
    let debug = dir.path().join("debug");

    cmd()
        .arg(&image)
        .arg("--debug-dir")
        .arg(&debug)
        .arg("--output")
        .arg(dir.path().join("report.json"))
        .assert()
        .success();

    for name in ["mask.png", "contours.png", "rects.png"] {
        assert!(debug.join(name).is_file(), "missing {name}");
    }
    let mask = image::open(debug.join("mask.png")).expect("mask").to_luma8();
    assert_eq!(mask.dimensions(), (240, 200));
    assert_eq!(mask.get_pixel(120, 100).0, [255]);
    assert_eq!(mask.get_pixel(10, 10).0, [0]);
}

#[test]
fn debug_toggles_from_config_are_respected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let image = write_plate_image(dir.path());
    let config = dir.path().join("params.json");
    fs::write(&config, r#"{ "debug": { "mask": true } }"#).expect("write config");
    let debug = dir.path().join("debug");

    cmd()
        .arg(&image)
        .arg("--config")
        .arg(&config)
        .arg("--debug-dir")
        .arg(&debug)
        .arg("--output")
        .arg(dir.path().join("report.json"))
        .assert()
        .success();

    assert!(debug.join("mask.png").is_file());
    assert!(!debug.join("contours.png").exists());
    assert!(!debug.join("rects.png").exists());
}

#[test]
fn rejects_invalid_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let image = write_plate_image(dir.path());
    let config = dir.path().join("params.json");
    fs::write(&config, r#"{ "morphology": { "kernel_size": 0 } }"#).expect("write config");

    cmd()
        .arg(&image)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("kernel_size"));
}

#[test]
fn fails_on_missing_image() {
    let dir = tempfile::tempdir().expect("tempdir");
    cmd()
        .arg(dir.path().join("nope.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}
