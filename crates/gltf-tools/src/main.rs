//! gltf-inspect - validate a glTF/GLB asset and summarize its contents.
//!
//! Exits with a non-zero status when the asset fails to decode, printing the
//! decoder's diagnostic.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gltf_core::EntityKind;
use gltf_io::{open, writer, DecodeOptions, Document};

#[derive(Parser)]
#[command(name = "gltf-inspect")]
#[command(about = "Validate a glTF or GLB file and print a summary")]
#[command(version)]
struct Cli {
    /// Input .gltf or .glb file
    input: PathBuf,

    /// Keep unknown enum codes instead of rejecting them
    #[arg(long)]
    lenient: bool,

    /// Accept a required extension (repeatable)
    #[arg(long = "allow-extension", value_name = "NAME")]
    allow_extensions: Vec<String>,

    /// Print the decoded document as normalized JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Do not print warnings
    #[arg(short, long)]
    quiet: bool,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> DecodeOptions {
        DecodeOptions::new()
            .strict_enum_validation(!self.lenient)
            .allow_extensions(self.allow_extensions.iter().cloned())
    }

    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

fn summary(document: &Document) -> String {
    let root = document.root();
    let mut out = String::new();
    let asset = &root.asset;
    let _ = writeln!(out, "glTF {}", asset.version);
    if let Some(generator) = &asset.generator {
        let _ = writeln!(out, "generator: {}", generator);
    }
    for kind in EntityKind::INDEXED {
        let count = root.count(kind);
        if count > 0 {
            let _ = writeln!(out, "{:>14}: {}", kind.property(), count);
        }
    }
    let bytes: usize = document.buffers().iter().map(Vec::len).sum();
    let _ = writeln!(out, "buffer bytes: {}", bytes);
    if let Some(scene) = root.default_scene() {
        let name = scene.name.as_deref().unwrap_or("<unnamed>");
        let _ = writeln!(out, "default scene: {} ({} root nodes)", name, scene.nodes.len());
    }
    if !root.extensions_used.is_empty() {
        let _ = writeln!(out, "extensions used: {}", root.extensions_used.join(", "));
    }
    if !root.extensions_required.is_empty() {
        let _ = writeln!(out, "extensions required: {}", root.extensions_required.join(", "));
    }
    out
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    let document = open(&cli.input, cli.options())
        .with_context(|| format!("failed to decode {}", cli.input.display()))?;
    log::debug!("decoded {} with {} warnings", cli.input.display(), document.warnings().len());

    if cli.json {
        println!("{}", writer::to_json_pretty(document.root())?);
    } else {
        print!("{}", summary(&document));
    }
    if !cli.quiet {
        for warning in document.warnings() {
            eprintln!("warning: {}", warning);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_flags_map_to_options() {
        let cli = Cli::parse_from([
            "gltf-inspect",
            "scene.glb",
            "--lenient",
            "--allow-extension",
            "KHR_draco_mesh_compression",
            "--allow-extension",
            "EXT_meshopt_compression",
            "-vv",
        ]);
        let options = cli.options();
        assert!(!options.is_strict());
        assert_eq!(options.allowed_extensions().len(), 2);
        assert_eq!(cli.log_level(), "trace");
    }

    #[test]
    fn test_summary_lists_non_empty_arrays() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("box.gltf");
        fs::write(
            &path,
            r#"{
                "asset": {"version": "2.0", "generator": "hand"},
                "scenes": [{"name": "main", "nodes": [0]}],
                "nodes": [{}]
            }"#,
        )
        .unwrap();
        let document = open(&path, DecodeOptions::default()).unwrap();
        let text = summary(&document);
        assert!(text.starts_with("glTF 2.0\ngenerator: hand\n"), "{}", text);
        assert!(text.contains("nodes: 1"));
        assert!(!text.contains("meshes"));
        assert!(text.contains("default scene: main (1 root nodes)"));
    }
}
