use anyhow::Result;
use comfy_table::Table;

use crosswalk_cli::compile::compile_all;
use crosswalk_cli::types::CompileResult;
use crosswalk_model::NamespaceRegistry;

use crate::cli::CompileArgs;
use crate::summary::apply_table_style;

pub fn run_compile(args: &CompileArgs) -> Result<CompileResult> {
    compile_all(&args.mappings, args.output_dir.as_deref(), args.dry_run)
}

pub fn run_namespaces() -> Result<()> {
    let registry = NamespaceRegistry::builtin();
    let mut namespaces: Vec<_> = registry.iter().collect();
    namespaces.sort_by(|a, b| a.prefix().cmp(b.prefix()));
    let mut table = Table::new();
    table.set_header(vec!["Prefix", "URI"]);
    apply_table_style(&mut table);
    for namespace in namespaces {
        table.add_row(vec![namespace.prefix(), namespace.uri()]);
    }
    println!("{table}");
    Ok(())
}
