//! GitHub-flavored markdown renderer.
//!
//! Layout: title, about section, index, one section per public function,
//! then the pre-footer and footer. Display choices come from [`Config`].

use crate::config::{ArgumentsDisplay, Config, ExampleDisplay, Placement, ShellcheckDisplay};
use crate::model::*;
use crate::render::Renderer;
use crate::toc;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

pub struct MarkdownRenderer;

const SHELLCHECK_WIKI: &str = "https://www.shellcheck.net/wiki/";

// `Jane Doe (@jdoe)`
static RE_GITHUB_HANDLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(@([A-Za-z0-9-]+)\)").unwrap());

impl Renderer for MarkdownRenderer {
    fn render(&self, doc: &Document, config: &Config) -> String {
        let file = doc.file();
        let mut output = String::new();

        output.push_str(&render_title(file, config));
        output.push_str(&render_about(file, config));

        if config.show_toc {
            let index = toc::render_index(doc);
            if !index.is_empty() {
                output.push_str("## Index\n\n");
                output.push_str(&index);
                output.push('\n');
            }
        }

        let model = doc.model();
        for (block, view) in doc.blocks().iter().zip(&model) {
            if !view.is_renderable() {
                continue;
            }
            output.push_str(&render_function(block, config));
            output.push('\n');
        }

        output.push_str(&render_footer(file, config));
        output
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

// -- File level ---------------------------------------------------------------

fn render_title(file: &DocBlock, config: &Config) -> String {
    let name = file.file_name.as_deref().unwrap_or("script");
    let name = Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string());

    let mut title = match file.version {
        Some(ref version) if config.version_placement == Placement::Filename => {
            format!("# {} (v{})\n\n", name, version)
        }
        _ => format!("# {}\n\n", name),
    };
    if let Some(ref brief) = file.brief {
        title.push_str(brief);
        title.push_str("\n\n");
    }
    title
}

fn render_about(file: &DocBlock, config: &Config) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(ref interpreter) = file.interpreter {
        lines.push(format!("**Interpreter:** {}\n", interpreter));
    }
    if let Some(ref project) = file.project {
        lines.push(format!("**Project:** {}\n", project));
    }
    if let Some(ref version) = file.version {
        if config.version_placement == Placement::About {
            lines.push(format!("**Version:** {}\n", version));
        }
    }
    if let Some(ref since) = file.since {
        lines.push(format!("**Since:** {}\n", since));
    }
    if let Some(ref license) = file.license {
        if config.license_placement == Placement::About {
            lines.push(format!("**License:** {}\n", license));
        }
    }
    if let Some(ref copyright) = file.copyright {
        if config.copyright_placement == Placement::About {
            lines.push(format!("**Copyright:** {}\n", copyright));
        }
    }
    if let Some(ref description) = file.description {
        lines.push(format!("**Description:** {}\n", description));
    }
    if let Some(ref author) = file.author {
        lines.push(format!(
            "**Authors:** {}\n",
            render_authors(author, config.linkify_usernames)
        ));
    }
    if let Some(ref contact) = file.author_contact {
        lines.push(format!("**Contact:** {}\n", contact));
    }

    if lines.is_empty() {
        return String::new();
    }
    format!("## About\n\n{}\n---\n\n", lines.join("\n"))
}

/// Comma-separated authors; `(@handle)` becomes a GitHub profile link.
fn render_authors(authors: &str, linkify: bool) -> String {
    authors
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(|author| {
            if linkify {
                RE_GITHUB_HANDLE
                    .replace_all(author, "([@$1](https://github.com/$1))")
                    .into_owned()
            } else {
                author.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_footer(file: &DocBlock, config: &Config) -> String {
    let mut output = String::new();
    let placed = |value: &Option<String>, placement: Placement, wanted: Placement| {
        value.is_some() && placement == wanted
    };

    let license_pre = placed(&file.license, config.license_placement, Placement::PreFooter);
    let copyright_pre = placed(&file.copyright, config.copyright_placement, Placement::PreFooter);
    if license_pre || copyright_pre {
        output.push_str("---\n\n");
        if let (true, Some(license)) = (license_pre, file.license.as_deref()) {
            output.push_str(&format!("**License:** {}\n\n", license));
        }
        if let (true, Some(copyright)) = (copyright_pre, file.copyright.as_deref()) {
            output.push_str(&format!("**Copyright:** {}\n\n", copyright));
        }
    }

    let version_footer = placed(&file.version, config.version_placement, Placement::Footer);
    let license_footer = placed(&file.license, config.license_placement, Placement::Footer);
    let copyright_footer = placed(&file.copyright, config.copyright_placement, Placement::Footer);
    let has_footer_text = !config.footer_text.is_empty();
    if has_footer_text || version_footer || license_footer || copyright_footer {
        output.push_str("---\n\n");
        if let (true, Some(version)) = (version_footer, file.version.as_deref()) {
            output.push_str(&format!("**Version:** {}\n\n", version));
        }
        if let (true, Some(copyright)) = (copyright_footer, file.copyright.as_deref()) {
            output.push_str(&format!("**Copyright:** {}\n\n", copyright));
        }
        if let (true, Some(license)) = (license_footer, file.license.as_deref()) {
            output.push_str(&format!("**License:** {}\n\n", license));
        }
        if has_footer_text {
            output.push_str(&config.footer_text);
            output.push('\n');
        }
    }
    output
}

// -- Function level -----------------------------------------------------------

/// Render a single function's documentation block.
fn render_function(block: &DocBlock, config: &Config) -> String {
    let mut lines: Vec<String> = Vec::new();
    let name = block.function_name.as_deref().unwrap_or_default();

    if let Some(ref section) = block.section {
        lines.push(format!("## {}\n", section.name));
        if !section.description.is_empty() {
            lines.push(section.description.clone());
            lines.push(String::new());
        }
    }

    lines.push(format!("### {}\n", name));

    if block.deprecation.is_deprecated {
        lines.push(render_deprecation(&block.deprecation));
        lines.push(String::new());
    }
    if let Some(ref alias) = block.alias {
        lines.push(format!("_Alias:_ `{}`\n", alias));
    }
    if let Some(brief) = block.display_brief() {
        lines.push(brief.to_string());
        lines.push(String::new());
    }
    if let Some(description) = block.display_description() {
        lines.push(description.to_string());
        lines.push(String::new());
    }

    if config.show_alerts {
        for alert in &block.alerts {
            lines.push(format!("> [!{}]", alert.kind.as_str()));
            for line in alert.content.lines() {
                lines.push(format!("> {}", line));
            }
            lines.push(String::new());
        }
    }

    render_examples(&mut lines, block, config);
    render_arguments(&mut lines, block, config);

    if block.no_args {
        lines.push("_Function has no arguments._".to_string());
        lines.push(String::new());
    }

    if !block.options.is_empty() {
        lines.push("#### Options\n".to_string());
        for opt in &block.options {
            let term = opt.term().replace('<', "\\<").replace('>', "\\>");
            lines.push(format!("* **{}**\n", term));
            if !opt.description.is_empty() {
                lines.push(format!("  {}\n", opt.description));
            }
        }
    }

    if !block.env_vars.is_empty() {
        lines.push("#### Environment variables\n".to_string());
        for var in &block.env_vars {
            lines.push(format!("* **{}**: {}", var.name, var.description));
        }
        lines.push(String::new());
    }

    if !block.set_vars.is_empty() {
        lines.push("#### Variables set\n".to_string());
        for var in &block.set_vars {
            lines.push(render_set(var));
        }
        lines.push(String::new());
    }

    if block.return_desc.is_some() || !block.returns.is_empty() {
        lines.push("#### Return Values\n".to_string());
        if let Some(ref desc) = block.return_desc {
            lines.push(desc.clone());
            lines.push(String::new());
        }
        for ret in &block.returns {
            lines.push(format!("* **{}**: {}", ret.value, ret.description));
        }
        if !block.returns.is_empty() {
            lines.push(String::new());
        }
    }

    if !block.exit_codes.is_empty() {
        lines.push("#### Exit codes\n".to_string());
        for code in &block.exit_codes {
            lines.push(format!("* **{}**: {}", code.code, code.description));
        }
        lines.push(String::new());
    }

    if let Some(ref stdin) = block.stdin_doc {
        render_stream(&mut lines, stdin, "Input on stdin");
    }
    if let Some(ref stdout) = block.stdout_doc {
        render_stream(&mut lines, stdout, "Output on stdout");
    }
    if let Some(ref stderr) = block.stderr_doc {
        render_stream(&mut lines, stderr, "Output on stderr");
    }

    render_dependencies(&mut lines, block, config);

    if !block.see_also.is_empty() {
        lines.push("#### See also\n".to_string());
        for see in &block.see_also {
            let link = match see.url {
                Some(ref url) => format!("[{}]({})", see.name, url),
                None => toc::render_link(&see.name),
            };
            lines.push(format!("* {}", link));
        }
        lines.push(String::new());
    }

    if config.show_shellcheck {
        render_shellcheck(&mut lines, block, config.shellcheck_display);
    }

    lines.join("\n")
}

fn render_deprecation(dep: &Deprecation) -> String {
    let mut banner = String::from("> **Deprecated**");
    if let Some(ref version) = dep.version {
        banner.push_str(&format!(" since {}", version));
    }
    banner.push('.');
    if let Some(ref replacement) = dep.replacement {
        banner.push_str(&format!(" Use `{}` instead.", replacement));
    }
    if let Some(ref eol) = dep.eol {
        banner.push_str(&format!(" Removal planned for {}.", eol));
    }
    banner
}

fn render_examples(lines: &mut Vec<String>, block: &DocBlock, config: &Config) {
    let examples = block.examples();
    if examples.is_empty() {
        return;
    }
    let fence = if config.highlight_code {
        format!("```{}", config.highlight_language)
    } else {
        "```".to_string()
    };

    if examples.len() == 1 {
        lines.push("#### Example\n".to_string());
        lines.push(fence);
        lines.push(unindent(examples[0]));
        lines.push("```".to_string());
        lines.push(String::new());
        return;
    }

    lines.push("#### Examples\n".to_string());
    for (i, example) in examples.iter().enumerate() {
        match config.example_display {
            ExampleDisplay::Tabs => {
                let open = if i == 0 { " open" } else { "" };
                lines.push(format!("<details{}>", open));
                lines.push(format!("<summary>Example {}</summary>\n", i + 1));
                lines.push(fence.clone());
                lines.push(unindent(example));
                lines.push("```\n".to_string());
                lines.push("</details>".to_string());
            }
            ExampleDisplay::Sequential => {
                lines.push(fence.clone());
                lines.push(unindent(example));
                lines.push("```".to_string());
            }
        }
        lines.push(String::new());
    }
}

fn render_arguments(lines: &mut Vec<String>, block: &DocBlock, config: &Config) {
    let table = config.arguments_display == ArgumentsDisplay::Table;

    if !block.arguments.is_empty() {
        lines.push("#### Arguments\n".to_string());
        if table {
            lines.push("| Argument | Type | Description |".to_string());
            lines.push("|----------|------|-------------|".to_string());
            for arg in &block.arguments {
                lines.push(format!(
                    "| `{}` | {} | {} |",
                    arg.name,
                    arg.arg_type.as_deref().unwrap_or(""),
                    escape_cell(&arg.description)
                ));
            }
        } else {
            for arg in &block.arguments {
                lines.push(render_arg(arg));
            }
        }
        lines.push(String::new());
    }

    if !block.params.is_empty() {
        lines.push("#### Parameters\n".to_string());
        if table {
            lines.push("| Parameter | Description |".to_string());
            lines.push("|-----------|-------------|".to_string());
            for param in &block.params {
                lines.push(format!(
                    "| `{}` | {} |",
                    param.name,
                    escape_cell(&param.description)
                ));
            }
        } else {
            for param in &block.params {
                lines.push(format!("* `{}`: {}", param.name, param.description));
            }
        }
        lines.push(String::new());
    }
}

/// Render a stdin/stdout/stderr section.
fn render_stream(lines: &mut Vec<String>, text: &str, title: &str) {
    lines.push(format!("#### {}\n", title));
    lines.push(format!("* {}", text.replace('\n', "\n  ")));
    lines.push(String::new());
}

fn render_dependencies(lines: &mut Vec<String>, block: &DocBlock, config: &Config) {
    if !block.has_dependencies() {
        return;
    }
    let table = config.arguments_display == ArgumentsDisplay::Table;
    lines.push("#### Dependencies\n".to_string());

    let groups: [(&str, &str, &[String]); 4] = [
        ("Required Dependencies", "Name", &block.requires),
        ("Used By", "Function", &block.used_by),
        ("External Calls", "Command/Function", &block.calls),
        ("Provides", "Service/Feature", &block.provides),
    ];
    for (title, column, items) in groups {
        if items.is_empty() {
            continue;
        }
        lines.push(format!("##### {}\n", title));
        if table {
            lines.push(format!("| {} |", column));
            lines.push(format!("|{}|", "-".repeat(column.len() + 2)));
            lines.extend(items.iter().map(|item| format!("| `{}` |", item)));
        } else {
            lines.extend(items.iter().map(|item| format!("* `{}`", item)));
        }
        lines.push(String::new());
    }

    if !block.dependencies.is_empty() || !block.internal_calls.is_empty() {
        lines.push("##### Other Dependencies\n".to_string());
        let tagged = block
            .dependencies
            .iter()
            .map(|d| (d, "Dependency"))
            .chain(block.internal_calls.iter().map(|c| (c, "Internal Call")));
        if table {
            lines.push("| Name | Type |".to_string());
            lines.push("|------|------|".to_string());
            lines.extend(tagged.map(|(name, kind)| format!("| `{}` | {} |", name, kind)));
        } else {
            lines.extend(tagged.map(|(name, kind)| format!("* {}: `{}`", kind, name)));
        }
        lines.push(String::new());
    }
}

fn render_shellcheck(lines: &mut Vec<String>, block: &DocBlock, display: ShellcheckDisplay) {
    // First occurrence of each code wins.
    let mut seen: Vec<&str> = Vec::new();
    let mut entries: Vec<(&str, Option<&str>)> = Vec::new();
    for directive in &block.shellcheck {
        let Some(code) = directive.code.as_deref() else {
            continue;
        };
        if seen.contains(&code) {
            continue;
        }
        seen.push(code);
        entries.push((code, directive.reason.as_deref()));
    }
    if entries.is_empty() {
        return;
    }

    lines.push("#### Shellcheck Exceptions\n".to_string());
    let has_reason = entries.iter().any(|(_, reason)| reason.is_some());
    match display {
        ShellcheckDisplay::Table => {
            if has_reason {
                lines.push("| Code | Reason |".to_string());
                lines.push("|------|--------|".to_string());
            } else {
                lines.push("| Code |".to_string());
                lines.push("|------|".to_string());
            }
            for (code, reason) in &entries {
                let code = shellcheck_link(code);
                if has_reason {
                    lines.push(format!("| {} | {} |", code, reason.unwrap_or("")));
                } else {
                    lines.push(format!("| {} |", code));
                }
            }
        }
        ShellcheckDisplay::Sequential => {
            for (code, reason) in &entries {
                let mut line = if code.starts_with("SC") {
                    shellcheck_link(code)
                } else {
                    format!("[{}]", code)
                };
                if let Some(reason) = reason {
                    line.push_str(&format!(" ({})", reason));
                }
                lines.push(line + "  ");
            }
        }
        ShellcheckDisplay::List => {
            for (code, reason) in &entries {
                let mut line = format!("* {}", shellcheck_link(code));
                if let Some(reason) = reason {
                    line.push_str(&format!(" - {}", reason));
                }
                lines.push(line);
            }
        }
    }
    lines.push(String::new());
}

/// `SC` codes link to the ShellCheck wiki; other names stay plain.
fn shellcheck_link(code: &str) -> String {
    if code.starts_with("SC") {
        format!("[{}]({}{})", code, SHELLCHECK_WIKI, code)
    } else {
        code.to_string()
    }
}

// -- Entry formatting ---------------------------------------------------------

/// `**$1** (string): desc`, or `**$1**: desc` without a type.
fn render_arg(arg: &Argument) -> String {
    match arg.arg_type {
        Some(ref arg_type) => format!("* **{}** ({}): {}", arg.name, arg_type, arg.description),
        None => format!("* **{}**: {}", arg.name, arg.description),
    }
}

/// `**var** (type): desc`
fn render_set(var: &GlobalVar) -> String {
    match (var.var_type.is_empty(), var.description.is_empty()) {
        (true, true) => format!("* **{}**", var.name),
        (true, false) => format!("* **{}**: {}", var.name, var.description),
        (false, _) => format!("* **{}** ({}): {}", var.name, var.var_type, var.description),
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Remove common leading indentation from a multi-line string.
///
/// Leading and trailing blank lines are dropped.
fn unindent(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let Some(start) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return String::new();
    };
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map_or(lines.len(), |i| i + 1);
    let body = &lines[start..end];

    let min_indent = body
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches(' ').len())
        .min()
        .unwrap_or(0);

    body.iter()
        .map(|l| if l.trim().is_empty() { "" } else { &l[min_indent..] })
        .collect::<Vec<_>>()
        .join("\n")
}
