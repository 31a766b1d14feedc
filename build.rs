use std::env;

fn main() {
    let repository =
        env::var("STARGUARD_REPOSITORY").unwrap_or_else(|_| "dqzboy/Docker-Proxy".to_string());
    let label = env::var("STARGUARD_LABEL").unwrap_or_else(|_| "no respect".to_string());
    println!("cargo:rustc-env=STARGUARD_REPOSITORY={repository}");
    println!("cargo:rustc-env=STARGUARD_LABEL={label}");
    println!("cargo:rerun-if-env-changed=STARGUARD_REPOSITORY");
    println!("cargo:rerun-if-env-changed=STARGUARD_LABEL");
}
