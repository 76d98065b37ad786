use crate::{
    cli::ConvertArgs,
    core::{
        pipeline::{read_vcf, ReadOptions},
        table::Table,
    },
    io::{panel_reader::load_panel, table_writer::TableWriter},
    utils::util::{format_number_with_commas, Result},
};
use rayon::{prelude::*, ThreadPoolBuilder};
use std::path::{Path, PathBuf};

const OUTPUT_EXTENSION: &str = "tsv";

/// Normalizes one VCF and keeps only panel genes when a panel is given.
pub fn convert_vcf(path: &Path, options: &ReadOptions, panel: Option<&[String]>) -> Result<Table> {
    let table = read_vcf(path, options)?;
    match panel {
        Some(genes) => table.filter_by_genes(genes),
        None => Ok(table),
    }
}

/// `<dir>/<vcf stem>.tsv` for every input.
pub fn output_paths(vcf_paths: &[PathBuf], dir: &Path) -> Vec<PathBuf> {
    vcf_paths
        .iter()
        .map(|path| {
            let stem = path
                .file_stem()
                .map_or_else(|| "variants".into(), |s| s.to_string_lossy());
            dir.join(format!("{stem}.{OUTPUT_EXTENSION}"))
        })
        .collect()
}

fn write_table(table: &Table, output: Option<&str>) -> Result<()> {
    let mut writer = TableWriter::new(output)?;
    writer.write_table(table)?;
    writer.finish()
}

pub fn convert(args: ConvertArgs) -> Result<()> {
    let vcf_paths = args
        .process_vcf_paths()
        .map_err(|e| crate::vcfframe_error!("{e}"))?;
    let options = args
        .decode_args
        .read_options()
        .map_err(|e| crate::vcfframe_error!("{e}"))?;
    let panel = args.panel.as_deref().map(load_panel).transpose()?;

    if let [vcf_path] = vcf_paths.as_slice() {
        let table = convert_vcf(vcf_path, &options, panel.as_deref())?;
        log::info!(
            "{}: {} variants",
            table.sample_name(),
            format_number_with_commas(table.len())
        );
        return write_table(&table, args.output.as_deref());
    }

    let Some(output_dir) = args.output.as_deref().map(Path::new) else {
        return Err(crate::vcfframe_error!(
            "Converting {} VCF files requires an output directory (-o)",
            vcf_paths.len()
        ));
    };
    if !output_dir.is_dir() {
        std::fs::create_dir_all(output_dir)?;
    }
    let outputs = output_paths(&vcf_paths, output_dir);

    log::debug!(
        "Initializing convert thread pool with {} threads...",
        args.num_threads
    );
    let pool = ThreadPoolBuilder::new()
        .num_threads(args.num_threads)
        .thread_name(|i| format!("vcfframe-convert-{}", i))
        .build()
        .map_err(|e| crate::vcfframe_error!("Failed to initialize convert thread pool: {}", e))?;

    pool.install(|| {
        vcf_paths
            .par_iter()
            .zip(outputs.par_iter())
            .try_for_each(|(vcf_path, output)| {
                let table = convert_vcf(vcf_path, &options, panel.as_deref())?;
                log::info!(
                    "{}: {} variants -> {}",
                    table.sample_name(),
                    format_number_with_commas(table.len()),
                    output.display()
                );
                write_table(&table, Some(output.to_string_lossy().as_ref()))
            })
    })
}
