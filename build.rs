macro_rules! printinfo {
    ($($tokens: tt)*) => {
        println!("cargo:warning=\r\x1b[36;1m   {}", format!($($tokens)*))
    }
}

fn main() {
    config_piqp();
}

fn config_piqp() {
    // the native PIQP C interface is only linked when
    // the piqp feature is enabled.
    println!("cargo:rerun-if-env-changed=PIQP_LIB_DIR");

    if std::env::var_os("CARGO_FEATURE_PIQP").is_none() {
        return;
    }

    if let Some(dir) = std::env::var_os("PIQP_LIB_DIR") {
        let dir = dir.to_string_lossy();
        printinfo!("PIQP: linking piqpc from {}", dir);
        println!("cargo:rustc-link-search=native={}", dir);
    }
    println!("cargo:rustc-link-lib=piqpc");
}
