use anyhow::Result;
use csv::{Writer, WriterBuilder};
use electionodds_utils::sweep::Chart;
use log::debug;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Writes the points of one chart as a tab separated table, one row per point.
pub struct ChartWriter {
    writer: Writer<File>,
}

impl ChartWriter {
    pub fn new(file_path: &Path) -> Result<Self> {
        let file = File::create(file_path)
            .map_err(|e| anyhow::anyhow!("Could not create output file: {} ({})", file_path.display(), e))?;
        let writer = WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .from_writer(file);
        Ok(Self { writer })
    }

    pub fn write_header(&mut self) -> Result<()> {
        self.writer.write_record([
            "label",
            "role",
            "fraction_in_favor",
            "winning_probability",
        ])?;
        Ok(())
    }

    pub fn write_chart(&mut self, chart: &Chart) -> Result<usize> {
        let mut n_rows = 0;
        for curve in &chart.curves {
            let role = curve.role.to_string();
            for (fraction_in_favor, p) in curve.points() {
                let fraction_in_favor = fraction_in_favor.to_string();
                let p = p.to_string();
                self.writer.write_record([
                    curve.label.as_str(),
                    role.as_str(),
                    fraction_in_favor.as_str(),
                    p.as_str(),
                ])?;
                n_rows += 1;
            }
        }
        Ok(n_rows)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

pub fn chart_path(outdir: &Path, chart: &Chart) -> PathBuf {
    outdir.join(format!("{}.tsv", chart.axis))
}

/// Writes `<axis>.tsv` for every chart and returns the paths written.
pub fn write_chart_tables(outdir: &Path, charts: &[Chart]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::with_capacity(charts.len());
    for chart in charts {
        let path = chart_path(outdir, chart);
        let mut writer = ChartWriter::new(&path)?;
        writer.write_header()?;
        let n_rows = writer.write_chart(chart)?;
        writer.flush()?;
        debug!("Wrote {} rows to {}", n_rows, path.display());
        paths.push(path);
    }
    Ok(paths)
}

pub fn write_charts_json(file_path: &Path, charts: &[Chart]) -> Result<()> {
    let file = File::create(file_path)
        .map_err(|e| anyhow::anyhow!("Could not create output file: {} ({})", file_path.display(), e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), charts)?;
    Ok(())
}
