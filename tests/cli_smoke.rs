use std::process::Command;

#[test]
fn help_displays_overview() {
    let binary = env!("CARGO_BIN_EXE_gold-desk");
    let output = Command::new(binary)
        .arg("--help")
        .output()
        .expect("invoke gold-desk --help");

    assert!(output.status.success(), "help command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Simulated gold price desk"),
        "expected overview text in help output"
    );
}

#[test]
fn toto_prints_six_sorted_numbers() {
    let binary = env!("CARGO_BIN_EXE_gold-desk");
    let output = Command::new(binary)
        .args(["toto", "--seed", "49"])
        .output()
        .expect("invoke gold-desk toto");

    assert!(output.status.success(), "toto command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let numbers: Vec<u8> = stdout
        .split_whitespace()
        .map(|n| n.parse().expect("numeric output"))
        .collect();
    assert_eq!(numbers.len(), 6);
    assert!(numbers.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn project_rejects_non_positive_horizon() {
    let binary = env!("CARGO_BIN_EXE_gold-desk");
    let output = Command::new(binary)
        .args(["project", "--principal", "1000", "--years", "0"])
        .output()
        .expect("invoke gold-desk project");

    assert!(!output.status.success(), "zero horizon should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("horizon"), "unexpected stderr: {stderr}");
}

#[test]
fn run_rejects_invalid_initial_purchase() {
    let binary = env!("CARGO_BIN_EXE_gold-desk");
    let output = Command::new(binary)
        .args(["run", "--ticks", "1", "--interval-ms", "1", "--buy", "0"])
        .output()
        .expect("invoke gold-desk run");

    assert!(!output.status.success(), "zero-gram purchase should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid initial purchase"),
        "unexpected stderr: {stderr}"
    );
}
