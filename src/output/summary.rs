use std::fmt::Write;

use comfy_table::Cell;
use indicatif::HumanBytes;

use crate::providers::gitlab::DownloadedArtifact;

use super::styling::{bright, dim};
use super::tables::{create_table, cyan_header, size_cell};

/// Prints the table of downloaded archives to stdout.
pub fn print_summary(downloads: &[DownloadedArtifact]) {
    println!("{}", render_summary(downloads));
}

fn render_summary(downloads: &[DownloadedArtifact]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{} {}", bright("📦"), bright("Artifacts").underlined());

    if downloads.is_empty() {
        let _ = writeln!(output, "  {}", dim("No matching jobs with artifacts"));
        return output;
    }

    let mut table = create_table();
    table.set_header(cyan_header(&["Branch", "Stage", "Job", "Name", "File", "Size"]));

    for download in downloads {
        table.add_row(vec![
            Cell::new(&download.branch),
            Cell::new(&download.stage),
            Cell::new(download.job_id),
            Cell::new(&download.job_name),
            Cell::new(download.path.display()),
            size_cell(download.bytes),
        ]);
    }

    let total: u64 = downloads.iter().map(|d| d.bytes).sum();
    let _ = writeln!(output, "{table}");
    let _ = write!(
        output,
        "  {}",
        dim(format!("{} files, {}", downloads.len(), HumanBytes(total)))
    );

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn download(branch: &str, job_id: u64, bytes: u64) -> DownloadedArtifact {
        DownloadedArtifact {
            branch: branch.to_string(),
            job_id,
            job_name: "rspec".to_string(),
            stage: "test".to_string(),
            path: PathBuf::from(format!("{branch}-{job_id}.zip")),
            bytes,
        }
    }

    #[test]
    fn test_render_summary_lists_every_file() {
        let rendered = render_summary(&[download("main", 11, 2048), download("dev", 12, 0)]);
        assert!(rendered.contains("main-11.zip"));
        assert!(rendered.contains("dev-12.zip"));
        assert!(rendered.contains("2 files"));
    }

    #[test]
    fn test_render_summary_empty() {
        let rendered = render_summary(&[]);
        assert!(rendered.contains("No matching jobs"));
    }
}
