use std::fs::{self, File};
use std::path::{Path, PathBuf};

use culturedash_parser::frames::{conservation_frame, funds_frame, institute_frame, tourism_frame};
use polars::io::parquet::write::{ParquetCompression, ParquetWriter, StatisticsOptions};
use polars::prelude::DataFrame;
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::snapshot::{Dataset, Snapshot};

/// Canonical-column frames of every dataset, in [`Dataset::ALL`] order.
pub fn snapshot_frames(snapshot: &Snapshot) -> Result<Vec<(Dataset, DataFrame)>> {
    Ok(vec![
        (Dataset::Funds, funds_frame(&snapshot.funds)?),
        (Dataset::Tourism, tourism_frame(&snapshot.tourism)?),
        (Dataset::Conservation, conservation_frame(&snapshot.conservation)?),
        (Dataset::Institutes, institute_frame(&snapshot.institutes)?),
    ])
}

/// Writes `<dataset>.parquet` for every dataset into `out_dir`.
pub fn export_parquet(snapshot: &Snapshot, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let io_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source| PipelineError::Io { path, source }
    };

    fs::create_dir_all(out_dir).map_err(io_error(out_dir))?;

    let mut written = Vec::with_capacity(Dataset::ALL.len());
    for (dataset, mut frame) in snapshot_frames(snapshot)? {
        let path = out_dir.join(format!("{dataset}.parquet"));
        let file = File::create(&path).map_err(io_error(&path))?;
        ParquetWriter::new(file)
            .with_compression(ParquetCompression::Zstd(None))
            .with_statistics(StatisticsOptions::default())
            .finish(&mut frame)?;
        info!(%dataset, path = %path.display(), rows = frame.height(), "exported parquet");
        written.push(path);
    }
    Ok(written)
}
