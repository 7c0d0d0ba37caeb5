// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Persists generated pages and data files into the site source tree.
///
/// Pages are written as `posts/{slug}.html` with YAML front matter, and the
/// listing data lands in `_data/issues.json` and `_data/github_issues.json`
/// where the site builder exposes them as `site.data.*`.
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    error::{self, Error},
    page::{PageDescriptor, SiteData},
};

/// Directory holding site data files.
pub const DATA_DIR: &str = "_data";
/// Data file with the full post collection.
pub const ISSUES_DATA_FILE: &str = "issues.json";
/// Data file with the aggregate summary.
pub const SUMMARY_DATA_FILE: &str = "github_issues.json";

/// Outcome of a site write.
#[derive(Debug, Clone, Serialize, Deserialize,)]
pub struct WriteReport
{
    /// Number of page files written.
    pub pages_written: usize,
    /// Data files written, collection first.
    pub data_files:    Vec<PathBuf,>,
}

/// Writes every page and both data files below `output_root`.
///
/// Existing files are overwritten. When two posts share a slug the later one
/// replaces the earlier page and a warning is logged.
///
/// # Errors
///
/// Returns [`Error::PageIo`](Error::PageIo) when a directory or file cannot
/// be written and [`Error::Serialize`](Error::Serialize) when front matter or
/// data cannot be encoded.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use chrono::Utc;
/// use issuepress::{Layout, materialize, write_site};
///
/// # fn example() -> Result<(), issuepress::Error> {
/// let data = materialize(Vec::new(), Layout::Post, Utc::now(), "octocat/blog",);
/// let report = write_site(&data, Path::new("site",),)?;
/// println!("wrote {} pages", report.pages_written);
/// # Ok(())
/// # }
/// ```
pub fn write_site(data: &SiteData, output_root: &Path,) -> Result<WriteReport, Error,>
{
    let pb = ProgressBar::new(data.pages.len() as u64,);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}",)
            .expect("valid template",),
    );

    let mut seen = HashSet::with_capacity(data.pages.len(),);
    for page in &data.pages {
        if !seen.insert(page.name.as_str(),) {
            warn!(
                "Slug collision: issue #{} overwrites {}",
                page.front_matter.github_number,
                page.relative_path()
            );
        }

        pb.set_message(page.front_matter.title.clone(),);
        let path = output_root.join(&page.dir,).join(&page.name,);
        write_file(&path, &render_page(page,)?,)?;
        debug!("Wrote {}", path.display());
        pb.inc(1,);
    }
    pb.finish_and_clear();

    let data_dir = output_root.join(DATA_DIR,);
    let issues_path = data_dir.join(ISSUES_DATA_FILE,);
    let summary_path = data_dir.join(SUMMARY_DATA_FILE,);
    write_file(&issues_path, &serde_json::to_string_pretty(&data.issues,)?,)?;
    write_file(&summary_path, &serde_json::to_string_pretty(&data.github_issues,)?,)?;

    info!("Wrote {} pages and data files to {}", data.pages.len(), output_root.display());

    Ok(WriteReport {
        pages_written: data.pages.len(),
        data_files:    vec![issues_path, summary_path],
    },)
}

/// Renders a page as `---`-delimited YAML front matter followed by the raw
/// body.
pub fn render_page(page: &PageDescriptor,) -> Result<String, Error,>
{
    let front_matter = serde_yaml::to_string(&page.front_matter,)?;
    Ok(format!("---\n{front_matter}---\n{}", page.content),)
}

fn write_file(path: &Path, contents: &str,) -> Result<(), Error,>
{
    if let Some(parent,) = path.parent() {
        fs::create_dir_all(parent,).map_err(|source| error::page_io_error(parent, source,),)?;
    }
    fs::write(path, contents,).map_err(|source| error::page_io_error(path, source,),)
}
