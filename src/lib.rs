//! Publishes the open issues of a GitHub repository as static blog posts.
//!
//! A generation run fetches the issue listing, turns every issue (pull
//! requests excluded) into a [`Post`] with a URL-safe slug, a category, an
//! excerpt and content flags, and materializes one page per post plus an
//! aggregate summary for listing templates. Fetch failures degrade to an
//! empty run instead of failing the site build.

mod classify;
mod config;
mod error;
mod excerpt;
mod fetch;
mod generator;
mod issue;
mod page;
mod post;
mod site;
mod slug;

pub use classify::{LabelFlag, PRIORITY_CATEGORIES, UNCATEGORIZED, category};
pub use config::{
    DEFAULT_API_BASE, GithubSection, GithubSettings, SiteConfig, TOKEN_ENV_VARS, load_dotenv,
    load_site_config, parse_site_config,
};
pub use error::{Error, io_error, page_io_error};
pub use excerpt::{EXCERPT_MAX_CHARS, extract_excerpt};
pub use fetch::{PAGE_SIZE, fetch_issues, interpret_response};
pub use generator::{generate_from_issues, run_generation};
pub use issue::{IssueAuthor, IssueLabel, RawIssue};
pub use page::{
    IssuesSummary, Layout, POSTS_DIR, PageDescriptor, PageFrontMatter, SiteData, materialize,
};
pub use post::{Post, clean_title, transform_issues};
pub use site::{DATA_DIR, ISSUES_DATA_FILE, SUMMARY_DATA_FILE, WriteReport, render_page, write_site};
pub use slug::SlugStrategy;
