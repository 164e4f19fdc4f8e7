//! Markdown and JSON rendering.
//!
//! This module turns combined results, analyses, provider listings and
//! project contexts into the text returned to callers.

use crate::models::{AnalysisResult, ProjectContext, Provider, ProviderResponse};
use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

/// Render the combined answer document.
pub fn render_answer(query: &str, responses: &[ProviderResponse]) -> String {
    let mut output = String::new();

    output.push_str("# VibeMaster Answer\n\n");
    output.push_str(&format!("**Query:** {}\n\n", query));
    output.push_str(&generate_sources_section(responses));

    for response in responses {
        output.push_str(&generate_response_section(response));
    }

    output
}

/// List the providers that contributed.
fn generate_sources_section(responses: &[ProviderResponse]) -> String {
    let mut section = String::new();

    section.push_str("## Sources\n\n");
    if responses.is_empty() {
        section.push_str("- none\n");
    }
    for response in responses {
        section.push_str(&format!(
            "- {} (confidence {:.2})\n",
            response.source, response.confidence
        ));
    }
    section.push('\n');

    section
}

/// One section per provider response.
fn generate_response_section(response: &ProviderResponse) -> String {
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", response.source));
    match &response.payload {
        Value::String(text) => {
            section.push_str(text);
            section.push('\n');
        }
        other => {
            let pretty =
                serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string());
            section.push_str("```json\n");
            section.push_str(&pretty);
            section.push_str("\n```\n");
        }
    }
    section.push('\n');

    section
}

/// Render the installed/available provider listing.
pub fn render_provider_listing(installed: &[&Provider], available: &[&Provider]) -> String {
    let mut output = String::new();

    output.push_str(&format!("# Installed MCPs ({})\n", installed.len()));
    for p in installed {
        output.push_str(&format!("- {}: {}\n", p.name, p.capabilities.join(", ")));
    }

    output.push_str(&format!("\n# Available MCPs ({})\n", available.len()));
    for p in available {
        let status = if p.installed { "✓" } else { "(not installed)" };
        output.push_str(&format!(
            "- {}: {} {}\n",
            p.name,
            p.capabilities.join(", "),
            status
        ));
    }

    output
}

/// Render an analysis for terminal output.
pub fn render_analysis(result: &AnalysisResult) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} {}\n\n",
        result.primary_category.emoji(),
        result.summary
    ));
    output.push_str("| Category | Confidence | Reasoning |\n");
    output.push_str("|:---|:---:|:---|\n");
    for score in &result.scores {
        output.push_str(&format!(
            "| {} | {:.2} | {} |\n",
            score.category, score.confidence, score.reasoning
        ));
    }

    output
}

/// Render a project context for terminal output.
pub fn render_project(project: &ProjectContext) -> String {
    let mut output = String::new();

    output.push_str(&format!("# Project: {}\n\n", project.root_path.display()));
    output.push_str(&format!(
        "- **Languages:** {}\n",
        join_or_none(&project.stack.languages)
    ));
    output.push_str(&format!(
        "- **Frameworks:** {}\n",
        join_or_none(&project.stack.frameworks)
    ));
    output.push_str(&format!(
        "- **Package Manager:** {}\n",
        project.stack.package_manager
    ));
    if let Some(git) = &project.git_repo {
        output.push_str(&format!(
            "- **GitHub:** {}/{} ({})\n",
            git.owner, git.repo, git.branch
        ));
    }

    output
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

/// Serialize any result as pretty JSON.
pub fn generate_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Into::into)
}
