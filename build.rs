use rustc_version::{version_meta, Channel};

// `#[bench]` needs the unstable `test` crate
fn main() {
    let meta = version_meta().expect("failed to query rustc version");
    assert!(meta.semver.major >= 1);

    println!("cargo:rustc-check-cfg=cfg(rustc_nightly)");
    if let Channel::Nightly = meta.channel {
        println!("cargo:rustc-cfg=rustc_nightly");
    }
}
