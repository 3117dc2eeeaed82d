use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn fractals() -> Command {
    Command::cargo_bin("fractals").unwrap()
}

fn lines(output: &[u8]) -> Vec<String> {
    String::from_utf8(output.to_vec())
        .unwrap()
        .lines()
        .map(|l| l.to_string())
        .collect()
}

#[test]
fn triangle_with_no_points_prints_corners() {
    fractals()
        .args(&["triangle", "-n", "0", "--corners", "0,0;1,0;0.5,0.866"])
        .assert()
        .success()
        .stdout("0,0\n1,0\n0.5,0.866\n");
}

#[test]
fn triangle_prints_corners_then_points() {
    let output = fractals()
        .args(&["triangle", "-n", "250", "--seed", "4"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let lines = lines(&output.stdout);
    assert_eq!(lines.len(), 253);
    assert_eq!(lines[0], "0,0");
    assert_eq!(lines[1], "1,0");
}

#[test]
fn seeded_runs_repeat() {
    let run = || {
        fractals()
            .args(&["hexagon", "-n", "100", "--seed", "11"])
            .output()
            .unwrap()
            .stdout
    };
    let first = run();
    assert_eq!(lines(&first).len(), 106);
    assert_eq!(first, run());
}

#[test]
fn streamed_hexagon_matches_collected_run() {
    let output = fractals()
        .args(&["hexagon", "-n", "500", "--seed", "3"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let expected: Vec<String> = fractalpoints::sierpinski_hexagon(500, StdRng::seed_from_u64(3))
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect();
    assert_eq!(lines(&output.stdout), expected);
}

#[test]
fn streamed_triangle_matches_collected_run() {
    let output = fractals()
        .args(&["triangle", "-n", "500", "--seed", "9", "--corners", "0,0;2,0;1,3"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let corners = fractalpoints::parse::parse_corners("0,0;2,0;1,3").unwrap();
    let expected: Vec<String> =
        fractalpoints::sierpinski_triangle(500, corners, StdRng::seed_from_u64(9))
            .unwrap()
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect();
    assert_eq!(lines(&output.stdout), expected);
}

#[test]
fn collinear_triangle_fails() {
    fractals()
        .args(&["triangle", "-n", "10", "--corners", "0,0;0.5,0;1,0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("collinear"));
}

#[test]
fn triangle_needs_three_corners() {
    fractals()
        .args(&["triangle", "-n", "10", "--corners", "0,0;1,0;1,1;0,1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("3 corners"));
}

#[test]
fn mandelbrot_writes_members_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("members.csv");
    fractals()
        .args(&["mandelbrot", "--density", "10", "--threads", "1", "-o"])
        .arg(&path)
        .assert()
        .success();
    let members = lines(&fs::read(&path).unwrap());
    assert!(!members.is_empty());
    assert!(members.len() < 25 * 30);
    for member in members {
        let parts: Vec<f64> = member.split(',').map(|v| v.parse().unwrap()).collect();
        assert_eq!(parts.len(), 2);
        assert!(parts[0] >= -2.0 - 1e-9 && parts[0] <= 0.5 + 1e-9);
        assert!(parts[1] >= -1.5 - 1e-9 && parts[1] <= 1.5 + 1e-9);
    }
}

#[test]
fn mandelbrot_rejects_inverted_region() {
    fractals()
        .args(&["mandelbrot", "-l", "1,1", "-r", "-1,-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid region"));
}

#[test]
fn mandelbrot_rejects_zero_iterations() {
    fractals()
        .args(&["mandelbrot", "-i", "0"])
        .assert()
        .failure();
}
