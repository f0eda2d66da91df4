fn main() {
    // Stamp the binary with its build time for the startup log line
    let built_at = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC");
    println!("cargo:rustc-env=BUILD_DATE={}", built_at);
    println!("cargo:rerun-if-changed=build.rs");
}
