use std::process::Command;

/// Trimmed stdout of a git command, `None` outside a checkout.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");

    let hash = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_default();
    let date = git(&["log", "-1", "--format=%cd", "--date=short"]).unwrap_or_default();

    // Tarball builds and tagged commits print the bare version.
    let tag = format!("v{}", env!("CARGO_PKG_VERSION"));
    let tagged = git(&["tag", "--points-at", "HEAD"])
        .map_or(false, |tags| tags.lines().any(|t| t == tag));
    let stamp = if hash.is_empty() || tagged {
        String::new()
    } else {
        format!("{} {}", hash, date)
    };

    println!("cargo:rustc-env=BRANCHBOOK_BUILD={}", stamp);
}
