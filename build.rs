use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");

    let revision = command_stdout("git", &["rev-parse", "--short", "HEAD"])
        .filter(|rev| !rev.is_empty())
        .unwrap_or_else(|| "unknown".into());
    emit("EXPENSE_CORE_BUILD_REVISION", &revision);

    let tree_state = match command_stdout("git", &["status", "--porcelain"]) {
        Some(changes) if changes.is_empty() => "clean",
        Some(_) => "dirty",
        None => "unknown",
    };
    emit("EXPENSE_CORE_BUILD_TREE", tree_state);

    let built_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    emit("EXPENSE_CORE_BUILD_TIMESTAMP", &built_at);

    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".into());
    emit("EXPENSE_CORE_BUILD_PROFILE", &profile);
}

fn emit(key: &str, value: &str) {
    println!("cargo:rustc-env={key}={value}");
}

fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|text| text.trim().to_string())
}
