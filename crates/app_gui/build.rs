use std::env;

fn main() {
    let version = env::var("BOXLABEL_VERSION")
        .or_else(|_| env::var("CARGO_PKG_VERSION"))
        .unwrap_or_else(|_| "dev".to_string());
    println!("cargo:rerun-if-env-changed=BOXLABEL_VERSION");
    println!("cargo:rustc-env=BOXLABEL_VERSION={version}");
}
