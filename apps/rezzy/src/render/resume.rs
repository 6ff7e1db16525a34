//! Resume Document Composer.
//!
//! Section order is fixed: preamble, objective, areas of expertise, skills,
//! experience, education, certifications, footer. Every builder degrades to
//! zero lines when its source data is missing.

use crate::models::resume::{filled, Certificate, Education, EscapedResume, Skill, Work};
use crate::render::markup::{bare, format_command, format_new_command};
use crate::render::section::{render_banner_comment, render_itemized_list, render_section};
use crate::render::{contact_line, contact_links, date_range, LINE_BREAK, LINE_SEP};

const GEOMETRY: &str = "left=0.4 in,top=0.4in,right=0.4 in,bottom=0.4in";

/// Columns in the areas-of-expertise table.
const EXPERTISE_COLUMNS: usize = 3;

pub fn compose_resume(doc: &EscapedResume) -> Vec<String> {
    let mut lines = Vec::new();
    lines.extend(build_preamble(doc));
    lines.extend(build_objective(doc));
    lines.extend(build_areas_of_expertise(doc));
    lines.extend(build_skills(doc));
    lines.extend(build_experience(doc));
    lines.extend(build_education(doc));
    lines.extend(build_certifications(doc));
    lines.extend(build_footer());
    lines
}

fn build_preamble(doc: &EscapedResume) -> Vec<String> {
    let basics = doc.basics.clone().unwrap_or_default();
    let itab_body = format!(
        "{}{}",
        format_command("hspace", ["0em"], None),
        format_command("rlap", ["#1"], None)
    );

    let mut lines = vec![
        format_command("documentclass", ["resume"], None),
        format_command("usepackage", ["geometry"], Some(GEOMETRY)),
        format_command("usepackage", ["tabularx"], None),
        format_new_command("itab", 1, &itab_body, Some("1")),
    ];

    if let Some(name) = filled(&basics.name) {
        lines.push(format_command("name", [name], None));
    }

    let address = contact_line(&basics, LINE_SEP);
    if !address.is_empty() {
        lines.push(format_command("address", [address.as_str()], None));
    }

    let links = contact_links(&basics).join(LINE_SEP);
    if !links.is_empty() {
        lines.push(format_command("address", [links.as_str()], None));
    }

    lines.push(format_command("begin", ["document"], None));
    lines
}

fn build_objective(doc: &EscapedResume) -> Vec<String> {
    let lines = doc
        .basics
        .as_ref()
        .and_then(|b| filled(&b.summary))
        .map(|summary| vec![format!("{{{summary}}}")])
        .unwrap_or_default();
    render_section("OBJECTIVE", lines)
}

fn build_areas_of_expertise(doc: &EscapedResume) -> Vec<String> {
    let names: Vec<&str> = doc
        .interests
        .iter()
        .flatten()
        .filter_map(|interest| filled(&interest.name))
        .collect();
    if names.is_empty() {
        return Vec::new();
    }

    let cells = names.iter().enumerate().map(|(i, name)| {
        if (i + 1) % EXPERTISE_COLUMNS == 0 {
            format!("{name} {LINE_BREAK}")
        } else {
            format!("{name} &")
        }
    });

    render_section("Areas of Expertise", wrap_table("XXX", cells))
}

fn build_skills(doc: &EscapedResume) -> Vec<String> {
    let rows: Vec<String> = doc.skills.iter().flatten().filter_map(skill_row).collect();
    if rows.is_empty() {
        return Vec::new();
    }
    render_section("Skills", wrap_table("lX", rows))
}

/// `\textbf{name} & kw1, kw2 \\`, only for skills with a name and keywords.
fn skill_row(skill: &Skill) -> Option<String> {
    let name = filled(&skill.name)?;
    let keywords = skill.keywords.as_ref().filter(|k| !k.is_empty())?;
    Some(format!(
        "{} & {} {LINE_BREAK}",
        format_command("textbf", [name], None),
        keywords.join(", ")
    ))
}

/// Wraps table rows in a full-width `table`/`tabularx` pair.
fn wrap_table(columns: &str, rows: impl IntoIterator<Item = String>) -> Vec<String> {
    let textwidth = bare("textwidth");
    let mut lines = vec![
        format_command("begin", ["table"], Some("h")),
        bare("centering"),
        format_command("begin", ["tabularx", textwidth.as_str(), columns], None),
    ];
    lines.extend(rows);
    lines.push(format_command("end", ["tabularx"], None));
    lines.push(format_command("end", ["table"], None));
    lines
}

fn build_experience(doc: &EscapedResume) -> Vec<String> {
    let lines = doc.work.iter().flatten().flat_map(build_work).collect();
    render_section("EXPERIENCE", lines)
}

fn build_work(work: &Work) -> Vec<String> {
    let (Some(company), Some(position)) = (filled(&work.name), filled(&work.position)) else {
        return Vec::new();
    };

    let mut lines =
        render_banner_comment(Some(format!("Experience: {company} - {position}").as_str()));

    let mut title = format_command("textbf", [position], None);
    let dates = date_range(&work.start_date, &work.end_date);
    if !dates.is_empty() {
        title.push(' ');
        title.push_str(&format_command("hfill", [dates.as_str()], None));
    }
    lines.push(format!("{title} {LINE_BREAK}"));

    let mut employer = format_command("textit", [company], None);
    if let Some(location) = filled(&work.location) {
        employer.push_str(&format!(
            " {} {}",
            bare("hfill"),
            format_command("textit", [location], None)
        ));
    }
    lines.push(format!("{employer} {LINE_BREAK}"));

    if let Some(summary) = filled(&work.summary) {
        lines.push(format!("{{{summary}}}"));
    }

    lines.extend(render_itemized_list(work.highlights.as_deref().unwrap_or_default()));
    lines
}

fn build_education(doc: &EscapedResume) -> Vec<String> {
    let lines = doc.education.iter().flatten().map(education_line).collect();
    render_section("Education", lines)
}

fn education_line(ed: &Education) -> String {
    let heading = bold_heading(filled(&ed.area), filled(&ed.institution));
    let dates = date_range(&ed.start_date, &ed.end_date);
    let date = format_command("hfill", [dates.as_str()], None);
    format!("{heading} {date} {LINE_BREAK}")
}

fn build_certifications(doc: &EscapedResume) -> Vec<String> {
    let lines = doc
        .certificates
        .iter()
        .flatten()
        .map(certificate_line)
        .collect();
    render_section("Certifications", lines)
}

fn certificate_line(cert: &Certificate) -> String {
    let heading = bold_heading(filled(&cert.name), filled(&cert.issuer));
    match filled(&cert.date) {
        Some(date) => format!("{heading} {} {{{date}}} {LINE_BREAK}", bare("hfill")),
        None => format!("{heading} {LINE_BREAK}"),
    }
}

/// `\textbf{title}, detail`, dropping whichever half is missing.
fn bold_heading(title: Option<&str>, detail: Option<&str>) -> String {
    let title = title.map(|t| format_command("textbf", [t], None));
    match (title, detail) {
        (Some(title), Some(detail)) => format!("{title}, {detail}"),
        (Some(title), None) => title,
        (None, Some(detail)) => detail.to_string(),
        (None, None) => String::new(),
    }
}

fn build_footer() -> Vec<String> {
    vec![format_command("end", ["document"], None)]
}
