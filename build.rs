use std::env;
use std::process::Command;

/// Trimmed stdout of `git <args>`, or `None` when git is missing or fails.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|out| out.trim().to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
    println!("cargo:rerun-if-env-changed=SANCTUARY_RELEASE");

    let hash = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_default();
    let committed = git(&["log", "-1", "--format=%cd", "--date=format:%Y-%m-%d %H:%M"])
        .unwrap_or_default();
    let clean = git(&["status", "--porcelain"]).is_some_and(|status| status.is_empty());

    // Packaged builds have no git checkout; SANCTUARY_RELEASE marks them.
    let is_release = match env::var("SANCTUARY_RELEASE") {
        Ok(flag) => flag == "1" || flag.eq_ignore_ascii_case("true"),
        Err(_) => !hash.is_empty() && clean,
    };

    println!("cargo:rustc-env=GIT_HASH={}", hash);
    println!("cargo:rustc-env=GIT_COMMIT_DATE={}", committed);
    println!("cargo:rustc-env=IS_RELEASE={}", is_release);
}
