use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;
use tempfile::TempDir;

struct Env {
    temp: TempDir,
    db_path: PathBuf,
}

impl Env {
    fn new() -> Self {
        let temp = TempDir::new().expect("temp dir");
        let db_path = temp.path().join("carebook.sqlite3");
        Self { temp, db_path }
    }

    fn output(&self, public_key: Option<&str>, args: &[&str]) -> Output {
        let mut cmd = cargo_bin_cmd!("carebook");
        cmd.env("XDG_CONFIG_HOME", self.temp.path().join("config"))
            .env("XDG_DATA_HOME", self.temp.path().join("data"))
            .env_remove("CAREBOOK_PAYMENT_PUBLIC_KEY")
            .env_remove("RUST_LOG")
            .args(["--db-path", self.db_path.to_str().expect("db path")]);
        if let Some(key) = public_key {
            cmd.env("CAREBOOK_PAYMENT_PUBLIC_KEY", key);
        }
        cmd.args(args).output().expect("run command")
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let mut full = vec!["--json"];
        full.extend_from_slice(args);
        let output = self.output(Some("pk_test_123"), &full);
        assert!(output.status.success(), "command failed: {:?}", output);
        serde_json::from_slice(&output.stdout).expect("parse json")
    }

    fn config_path(&self, contents: &str) -> PathBuf {
        let path = self.temp.path().join("custom.toml");
        fs::write(&path, contents).expect("write config");
        restrict_permissions(&path);
        path
    }
}

fn restrict_permissions(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path).expect("metadata").permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms).expect("chmod");
    }
}

const JANE: [&str; 8] = [
    "--name",
    "Jane Doe",
    "--email",
    "jane@x.com",
    "--phone",
    "1234567890",
    "--date",
    "2024-06-01",
];

fn book_args<'a>(service: &'a str, extra: &[&'a str]) -> Vec<&'a str> {
    let mut args = vec!["book", "--service", service];
    args.extend_from_slice(&JANE);
    args.extend_from_slice(extra);
    args
}

#[test]
fn cli_lists_default_services() {
    let env = Env::new();
    let services = env.run_json(&["services"]);
    let items = services.as_array().expect("array");
    assert_eq!(items.len(), 4);
    assert_eq!(items[0]["id"], "1");
    assert_eq!(items[0]["name"], "General Consultation");
    assert_eq!(items[0]["price"], "50.00");
}

#[test]
fn cli_book_complete_flow() {
    let env = Env::new();

    let booked = env.run_json(&book_args("1", &["--reference", "ref123"]));
    assert_eq!(booked["status"], "booked");
    assert_eq!(booked["payment_reference"], "ref123");
    assert_eq!(booked["service"]["price"], "50.00");
    assert_eq!(booked["patient"]["full_name"], "Jane Doe");
    assert_eq!(booked["date"], "2024-06-01");
    let id = booked["id"].as_str().expect("id").to_string();
    assert!(!id.is_empty());

    let list = env.run_json(&["appointments", "list", "--date", "2024-06-01"]);
    let items = list.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], id.as_str());

    let by_email = env.run_json(&["appointments", "list", "--email", "JANE@x.com"]);
    assert_eq!(by_email.as_array().expect("array").len(), 1);

    env.run_json(&["appointments", "complete", &id]);
    let detail = env.run_json(&["appointments", "show", &id]);
    assert_eq!(detail["status"], "completed");
    assert_eq!(detail["available_actions"].as_array().expect("array").len(), 0);

    let output = env.output(Some("pk_test_123"), &["appointments", "cancel", &id]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn cli_rejects_short_phone_without_booking() {
    let env = Env::new();
    let output = env.output(
        Some("pk_test_123"),
        &[
            "book", "--service", "1", "--date", "2024-06-01", "--name", "Jane Doe", "--email",
            "jane@x.com", "--phone", "123",
        ],
    );
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("Phone number must be at least 10 digits."));

    let list = env.run_json(&["appointments", "list"]);
    assert!(list.as_array().expect("array").is_empty());
}

#[test]
fn cli_abandoned_payment_books_nothing() {
    let env = Env::new();
    let output = env.output(Some("pk_test_123"), &book_args("2", &["--abandon"]));
    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("payment was not completed"));

    let list = env.run_json(&["appointments", "list"]);
    assert!(list.as_array().expect("array").is_empty());
}

#[test]
fn cli_requires_payment_key() {
    let env = Env::new();
    let output = env.output(None, &book_args("1", &[]));
    assert_eq!(output.status.code(), Some(3));

    let list = env.run_json(&["appointments", "list"]);
    assert!(list.as_array().expect("array").is_empty());
}

#[test]
fn cli_unknown_service_is_not_found() {
    let env = Env::new();
    let output = env.output(Some("pk_test_123"), &book_args("99", &[]));
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn cli_uses_configured_catalog() {
    let env = Env::new();
    let config = env.config_path(
        r#"
practice_name = "Riverside Clinic"

[payment]
public_key = "pk_file"
currency = "usd"

[[services]]
id = "coach"
name = "Health Coaching"
price = "49.99"
duration_minutes = 45
"#,
    );
    let config = config.to_str().expect("config path");

    let services = env.run_json(&["--config", config, "services"]);
    let items = services.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "coach");

    let output = env.output(
        None,
        &["--json", "--config", config, "book", "--service", "coach", "--name", "Jane Doe",
          "--email", "jane@x.com", "--phone", "+1 (555) 123-4567", "--date", "2024-06-02"],
    );
    assert!(output.status.success(), "command failed: {:?}", output);
    let booked: Value = serde_json::from_slice(&output.stdout).expect("parse json");
    assert_eq!(booked["service"]["price"], "49.99");
    assert!(booked["payment_reference"].is_string());
}

#[test]
fn cli_shows_practice_name() {
    let env = Env::new();
    let config = env.config_path("practice_name = \"Riverside Clinic\"\n");
    let config = config.to_str().expect("config path");

    let output = env.output(None, &["--config", config, "services"]);
    assert!(output.status.success(), "command failed: {:?}", output);
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(stdout.lines().next(), Some("Riverside Clinic"));
    assert!(stdout.contains("General Consultation"));

    let output = env.output(
        Some("pk_test_123"),
        &["--config", config, "book", "--service", "2", "--name", "Jane Doe", "--email",
          "jane@x.com", "--phone", "1234567890", "--date", "2024-06-03"],
    );
    assert!(output.status.success(), "command failed: {:?}", output);
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("Appointment for Jane Doe booked successfully at Riverside Clinic!"));

    let output = env.output(None, &["services"]);
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(stdout.lines().next(), Some("WellCare Practice"));
}

#[test]
fn cli_show_unknown_appointment_is_not_found() {
    let env = Env::new();
    let output = env.output(
        Some("pk_test_123"),
        &["appointments", "show", "00000000-0000-4000-8000-000000000000"],
    );
    assert_eq!(output.status.code(), Some(2));

    let output = env.output(Some("pk_test_123"), &["appointments", "show", "app1"]);
    assert_eq!(output.status.code(), Some(3));
}
