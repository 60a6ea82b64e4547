use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn saver_cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("saver_cli").unwrap();
    cmd.env("SAVER_TRACKER_CLI_SCRIPT", "1")
        .env("SAVER_TRACKER_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn script_mode_runs_basic_flow() {
    let home = TempDir::new().unwrap();
    let input = "add income Salary 50000\nadd expense Rent 15000\ntax 10\nsummary\nexit\n";

    saver_cli(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Potential Monthly Savings"))
        .stdout(contains("₱30,000.00"));

    let json = std::fs::read_to_string(
        home.path().join("storage").join("local_storage.json"),
    )
    .unwrap();
    assert!(json.contains("Salary"));
    assert!(json.contains("taxRate"));
}

#[test]
fn state_survives_between_runs() {
    let home = TempDir::new().unwrap();
    saver_cli(&home)
        .write_stdin("currency usd\nadd expense Gym 1200 yearly\nexit\n")
        .assert()
        .success();

    saver_cli(&home)
        .write_stdin("list expense\n")
        .assert()
        .success()
        .stdout(contains("Gym"))
        .stdout(contains("$1,200.00"))
        .stdout(contains("$100.00"));
}

#[test]
fn errors_are_reported_and_the_shell_continues() {
    let home = TempDir::new().unwrap();
    saver_cli(&home)
        .write_stdin("add expense \"\" 10\nsumary\nedit income deadbeef Salary 1\nlist\n")
        .assert()
        .success()
        .stdout(contains("item name must not be empty"))
        .stdout(contains("Did you mean `summary`?"))
        .stdout(contains("No income item matches id `deadbeef`"))
        .stdout(contains("No expense items yet"));
}

#[test]
fn help_lists_every_command() {
    let home = TempDir::new().unwrap();
    let output = saver_cli(&home).write_stdin("help\n").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["add", "edit", "delete", "list", "currency", "tax", "summary", "help", "exit"] {
        assert!(stdout.contains(name), "help output missing `{name}`");
    }
}
