use vergen::Emitter;
use vergen_git2::Git2Builder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // crates.io tarballs carry no git metadata; the version string falls back to "unknown".
    let git2_result = Git2Builder::default().describe(true, true, None).build();

    let emitted = match git2_result {
        Ok(git2) => Emitter::default()
            .fail_on_error()
            .add_instructions(&git2)
            .and_then(|emitter| emitter.emit())
            .is_ok(),
        Err(_) => false,
    };

    if !emitted {
        println!("cargo:rustc-env=VERGEN_GIT_DESCRIBE=unknown");
    }

    Ok(())
}
