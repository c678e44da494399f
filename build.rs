use std::{env, fs, path::PathBuf};

use session_config_compiler::generate_from_path;

const SESSION_CONFIG: &str = "config/session.toml";

fn main() {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(SESSION_CONFIG);
    println!("cargo:rerun-if-changed={SESSION_CONFIG}");
    println!("cargo:rerun-if-changed=build.rs");

    let source = match generate_from_path(&config_path) {
        Ok(source) => source,
        Err(e) => panic!("{}: {e}", config_path.display()),
    };

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let out_file = out_dir.join("session_config.rs");
    if let Err(e) = fs::write(&out_file, source) {
        panic!("cannot write {}: {e}", out_file.display());
    }
}
