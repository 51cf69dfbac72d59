//! Built-in changelog templates
//!
//! Rendering is deliberately fixed-format: a template is picked by name and
//! turns a finished [Timeline] into text. Unknown names fail with
//! [ChangelogError::TemplateNotFound] before any history is read.

use std::fmt::{self, Write};

use crate::domain::{Commit, ReleaseEntry, RemoteInfo, Timeline};
use crate::error::{ChangelogError, Result};
use crate::options::ResolvedOptions;

/// Marker placed before the subject of breaking commits
pub const BREAKING_MARKER: &str = "**Breaking change:**";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Compact,
    KeepAChangelog,
    Json,
}

impl Template {
    pub const NAMES: [&'static str; 3] = ["compact", "keepachangelog", "json"];

    /// Look up a built-in template by name
    pub fn named(name: &str) -> Result<Self> {
        match name {
            "compact" => Ok(Template::Compact),
            "keepachangelog" => Ok(Template::KeepAChangelog),
            "json" => Ok(Template::Json),
            other => Err(ChangelogError::TemplateNotFound(format!(
                "'{}' (available: {})",
                other,
                Template::NAMES.join(", ")
            ))),
        }
    }

    pub fn render(&self, timeline: &Timeline, options: &ResolvedOptions, remote: &RemoteInfo) -> Result<String> {
        let links = Links {
            remote,
            issue_url: options.issue_url.as_deref(),
        };

        match self {
            Template::Compact => {
                let mut out = String::new();
                write_compact(&mut out, timeline, &links)?;
                Ok(out)
            }
            Template::KeepAChangelog => {
                let mut out = String::new();
                write_keepachangelog(&mut out, timeline, &links)?;
                Ok(out)
            }
            Template::Json => {
                let mut json =
                    serde_json::to_string_pretty(timeline).map_err(std::io::Error::from)?;
                json.push('\n');
                Ok(json)
            }
        }
    }
}

/// URL lookups with the `--issue-url` override applied
struct Links<'a> {
    remote: &'a RemoteInfo,
    issue_url: Option<&'a str>,
}

impl Links<'_> {
    fn issue(&self, id: &str) -> Option<String> {
        match self.issue_url {
            Some(template) => Some(template.replace("{id}", id)),
            None => self.remote.issue_url(id),
        }
    }

    /// `[`label`](url)`, or plain `` `label` `` without a URL
    fn code_link(label: &str, url: Option<String>) -> String {
        match url {
            Some(url) => format!("[`{}`]({})", label, url),
            None => format!("`{}`", label),
        }
    }

    fn commit_line(&self, commit: &Commit) -> String {
        let mut line = String::from("- ");
        if commit.breaking {
            line.push_str(BREAKING_MARKER);
            line.push(' ');
        }
        line.push_str(&commit.subject);

        if let Some(merge) = &commit.merge {
            let label = format!("#{}", merge.id);
            line.push(' ');
            line.push_str(&Self::code_link(&label, self.remote.merge_url(&merge.id)));
        }

        let mut ids: Vec<&str> = Vec::new();
        for id in commit.issue_ids.iter().chain(&commit.fixes) {
            let is_merge_id = commit.merge.as_ref().is_some_and(|m| &m.id == id);
            if !ids.contains(&id.as_str()) && !is_merge_id {
                ids.push(id);
            }
        }
        for id in ids {
            line.push(' ');
            line.push_str(&Self::code_link(&format!("#{}", id), self.issue(id)));
        }

        line.push(' ');
        line.push_str(&Self::code_link(
            commit.short_hash(),
            self.remote.commit_url(&commit.hash),
        ));
        line
    }
}

fn nice_date(release: &ReleaseEntry) -> String {
    release.date.format("%-d %B %Y").to_string()
}

fn write_compact(out: &mut String, timeline: &Timeline, links: &Links<'_>) -> fmt::Result {
    out.push_str("### Changelog\n\n");
    out.push_str(
        "All notable changes to this project will be documented in this file. \
         Dates are displayed in UTC.\n",
    );

    for release in &timeline.releases {
        out.push('\n');
        let level = if release.major { "###" } else { "####" };
        match &release.compare_url {
            Some(url) => writeln!(out, "{} [{}]({})", level, release.title, url)?,
            None => writeln!(out, "{} {}", level, release.title)?,
        }
        out.push('\n');

        if !release.is_unreleased {
            writeln!(out, "> {}\n", nice_date(release))?;
        }

        if let Some(summary) = &release.summary {
            writeln!(out, "{}\n", summary)?;
        }

        for commit in &release.commits {
            writeln!(out, "{}", links.commit_line(commit))?;
        }
    }

    Ok(())
}

fn write_keepachangelog(out: &mut String, timeline: &Timeline, links: &Links<'_>) -> fmt::Result {
    out.push_str("# Changelog\n\n");
    out.push_str("All notable changes to this project will be documented in this file.\n\n");
    out.push_str(
        "The format is based on [Keep a Changelog](https://keepachangelog.com/en/1.0.0/).\n",
    );

    for release in &timeline.releases {
        out.push('\n');
        if release.is_unreleased {
            writeln!(out, "## [{}]\n", release.title)?;
        } else {
            writeln!(out, "## [{}] - {}\n", release.title, release.date.format("%Y-%m-%d"))?;
        }

        if let Some(summary) = &release.summary {
            writeln!(out, "{}\n", summary)?;
        }

        let (breaking, other): (Vec<&Commit>, Vec<&Commit>) =
            release.commits.iter().partition(|c| c.breaking);

        if !breaking.is_empty() {
            out.push_str("### Breaking changes\n\n");
            for commit in &breaking {
                writeln!(out, "{}", links.commit_line(commit))?;
            }
            out.push('\n');
        }

        if !other.is_empty() {
            out.push_str("### Commits\n\n");
            for commit in &other {
                writeln!(out, "{}", links.commit_line(commit))?;
            }
        }
    }

    let references: Vec<(&str, &str)> = timeline
        .releases
        .iter()
        .filter_map(|r| r.compare_url.as_deref().map(|url| (r.title.as_str(), url)))
        .collect();
    if !references.is_empty() {
        out.push('\n');
        for (title, url) in references {
            writeln!(out, "[{}]: {}", title, url)?;
        }
    }

    Ok(())
}
