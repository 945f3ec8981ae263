//! Print the merged descriptor of catalog interfaces as JSON.
//!
//! The catalog comes from `--catalog`, then `FILTERWIRE_CATALOG`, then the
//! catalog shipped with the crate. Interface ids are merged in the order given
//! on the command line, exactly as `DescriptorRegistry::get_descriptor` would
//! merge them for a caller.

use anyhow::{Context, Result};
use filterwire::runtime::{init_tracing, resolve_catalog_path};
use filterwire::{DescriptorRegistry, InterfaceId, InterfaceIndex};
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;
    init_tracing()?;

    let catalog_path = resolve_catalog_path(cli.catalog.as_deref())?;
    let index = InterfaceIndex::load(&catalog_path)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.list {
        for id in index.ids() {
            writeln!(out, "{id}")?;
        }
        return Ok(());
    }

    let interfaces = index
        .resolve(&cli.interfaces)
        .with_context(|| format!("resolving interfaces in {}", catalog_path.display()))?;
    let registry = DescriptorRegistry::new();
    let descriptor = registry.get_descriptor(&interfaces)?;

    if cli.compact {
        serde_json::to_writer(&mut out, descriptor.as_ref())?;
    } else {
        serde_json::to_writer_pretty(&mut out, descriptor.as_ref())?;
    }
    writeln!(out)?;
    Ok(())
}

struct Cli {
    catalog: Option<PathBuf>,
    compact: bool,
    list: bool,
    interfaces: Vec<InterfaceId>,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut cli = Cli {
            catalog: None,
            compact: false,
            list: false,
            interfaces: Vec::new(),
        };

        while let Some(arg) = args.next() {
            let arg = arg
                .into_string()
                .map_err(|_| anyhow::anyhow!("Invalid UTF-8 in argument"))?;
            match arg.as_str() {
                "--catalog" | "-c" => {
                    let Some(path) = args.next() else {
                        usage(2);
                    };
                    cli.catalog = Some(PathBuf::from(path));
                }
                "--compact" => cli.compact = true,
                "--list" | "-l" => cli.list = true,
                "--help" | "-h" => usage(0),
                flag if flag.starts_with('-') => usage(2),
                id => cli.interfaces.push(InterfaceId::new(id)),
            }
        }

        if !cli.list && cli.interfaces.is_empty() {
            usage(2);
        }
        Ok(cli)
    }
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: filter-describe [--catalog PATH] [--compact] [--list] INTERFACE_ID...\n\nOptions:\n  --catalog, -c PATH  Interface catalog (default: $FILTERWIRE_CATALOG or the shipped catalog).\n  --compact           Print the descriptor on one line.\n  --list, -l          List the catalog's interface ids and exit.\n\nExamples:\n  filter-describe listener.paragraph listener.macro\n  FILTERWIRE_LOG=debug filter-describe --list"
    );
    std::process::exit(code);
}
