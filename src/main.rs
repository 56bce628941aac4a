//! Host-side helper: `cargo run` builds the wasm package into `static/pkg`
//! and serves `static/` locally so the background can be previewed.

use std::process::{self, Command, Stdio};

const PORT: &str = "8000";

fn main() {
    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack finished with errors");
            process::exit(1);
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH; serving whatever is already in static/pkg");
        }
    }

    println!("Serving static/ at http://127.0.0.1:{PORT} (Ctrl-C to stop)");
    let status = Command::new("python3")
        .args(["-m", "http.server", PORT, "--directory", "static"])
        .stdout(Stdio::null())
        .status();

    match status {
        Ok(st) if st.success() => {}
        Ok(st) => eprintln!("http server exited with {st}"),
        Err(err) => {
            eprintln!("failed to start http server: {err}");
            process::exit(1);
        }
    }
}
