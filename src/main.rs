use clap::Parser;
use std::{
    fs,
    path::{Path, PathBuf},
    process,
};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use cnh_tariff::{run, Exports, Result, TariffError, AGRI_FILE_NAME, BO_FILE_NAME};

/// Converts the newest CNH tariff file of a directory into the BO and Agri
/// price import files.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the CNH `.txt` tariff files
    directory: PathBuf,

    /// Where the two import files are written
    #[arg(long, short = 'o', default_value = ".")]
    out_dir: PathBuf,
}

fn main() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = convert(&cli) {
        error!("{e}");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn convert(cli: &Cli) -> Result<()> {
    fs::create_dir_all(&cli.out_dir)?;
    if fs::canonicalize(&cli.out_dir)? == fs::canonicalize(&cli.directory)? {
        return Err(TariffError::OutputIsInput {
            dir: cli.directory.clone(),
        });
    }

    let exports = run(&cli.directory)?;
    write_exports(&cli.out_dir, &exports)?;

    info!(
        source = %exports.source.display(),
        rows = exports.rows,
        out_dir = %cli.out_dir.display(),
        "conversion complete"
    );

    Ok(())
}

/// Writes both files, or neither: any failed write removes what was written.
fn write_exports(out_dir: &Path, exports: &Exports) -> Result<()> {
    let bo_path = out_dir.join(BO_FILE_NAME);
    let agri_path = out_dir.join(AGRI_FILE_NAME);

    let written = fs::write(&bo_path, &exports.bo)
        .and_then(|()| fs::write(&agri_path, &exports.agri));
    if let Err(e) = written {
        let _ = fs::remove_file(&bo_path);
        let _ = fs::remove_file(&agri_path);
        return Err(e.into());
    }

    info!(path = %bo_path.display(), "written");
    info!(path = %agri_path.display(), "written");
    Ok(())
}
