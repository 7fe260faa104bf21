fn main() {
    println!("cargo:rerun-if-env-changed=HFO_LIB_DIR");

    if std::env::var_os("CARGO_FEATURE_LIBHFO").is_some() {
        if let Some(dir) = std::env::var_os("HFO_LIB_DIR") {
            println!("cargo:rustc-link-search=native={}", dir.to_string_lossy());
        }
    }
}
