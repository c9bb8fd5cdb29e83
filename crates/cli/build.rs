use std::{env, fs, path::PathBuf};

use clap_complete::shells::{Bash, Fish, PowerShell, Zsh};

fn command() -> clap::Command {
    clap::Command::new("folio")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Folio Contributors")
        .about("Render any web article as a clean, safe reader fragment")
        .arg(clap::arg!(<INPUT> "URL to fetch, local HTML file, or '-' for stdin"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (html, page, text, markdown, json)")
                .default_value("html")
                .value_parser(["html", "page", "text", "markdown", "json"]),
        )
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests"))
        .arg(clap::arg!(--"max-bytes" <BYTES> "Largest accepted response body in bytes").default_value("5242880"))
        .arg(
            clap::arg!(--"base-url" <URL> "Base URL for resolving links in files and stdin")
                .default_value("https://localhost/"),
        )
        .arg(
            clap::arg!(--"char-threshold" <NUM> "Minimum article length for readability extraction")
                .default_value("250"),
        )
        .arg(clap::arg!(-v --verbose "Enable debug logging"))
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = command();
    clap_complete::generate_to(Bash, &mut cmd, "folio", &completions_dir).unwrap();
    clap_complete::generate_to(Zsh, &mut cmd, "folio", &completions_dir).unwrap();
    clap_complete::generate_to(Fish, &mut cmd, "folio", &completions_dir).unwrap();
    clap_complete::generate_to(PowerShell, &mut cmd, "folio", &completions_dir).unwrap();
}
