//! Cover Letter Composer: preamble, centered contact header, dated body, footer.
//!
//! Greeting and body are escaped here. Company address fields are left
//! unescaped so placeholders such as `[COMPANY ADDRESS]` survive. Square
//! brackets are braced everywhere in the body so a `[` after `\\` is never
//! read as the line break's optional length.

use chrono::NaiveDate;

use crate::models::cover_letter::CoverLetterPayload;
use crate::models::resume::{filled, EscapedResume};
use crate::render::escape::EscapeSet;
use crate::render::markup::format_command;
use crate::render::{contact_line, contact_links, join_nonempty, DIAMOND_SEP, LINE_BREAK, LINE_SEP};

const LETTER_DATE_FORMAT: &str = "%B %-d, %Y";

/// Composes the letter dated today (local time).
pub fn compose_cover_letter(resume: &EscapedResume, letter: &CoverLetterPayload) -> Vec<String> {
    compose_cover_letter_on(resume, letter, chrono::Local::now().date_naive())
}

/// Composes the letter with an explicit date. Deterministic.
pub fn compose_cover_letter_on(
    resume: &EscapedResume,
    letter: &CoverLetterPayload,
    date: NaiveDate,
) -> Vec<String> {
    let mut lines = build_preamble();
    lines.extend(build_header(resume));
    lines.extend(build_body(letter, date));
    lines.push(format_command("end", ["document"], None));
    lines
}

fn build_preamble() -> Vec<String> {
    vec![
        format_command("documentclass", ["article"], Some("12pt,letterpaper")),
        format_command(
            "usepackage",
            ["geometry"],
            Some("left=0.75in,right=0.75in,top=0.75in,bottom=0.75in"),
        ),
        format_command("usepackage", ["enumitem"], None),
        format_command("usepackage", ["xcolor"], None),
        format_command("usepackage", ["setspace"], None),
        format_command(
            "usepackage",
            ["hyperref"],
            Some("colorlinks=true, linkcolor=blue, urlcolor=blue"),
        ),
        format_command("definecolor", ["blackcolor", "RGB", "0,0,0"], None),
        format_command("setlength", ["\\parskip", "1em"], None),
        format_command("pagenumbering", ["gobble"], None),
        format_command("setlength", ["\\parindent", "0pt"], None),
        format_command(
            "setlist",
            ["leftmargin=2em, itemsep=0.5em, parsep=0pt"],
            Some("itemize"),
        ),
        format_command("begin", ["document"], None),
    ]
}

fn build_header(resume: &EscapedResume) -> Vec<String> {
    let basics = resume.basics.clone().unwrap_or_default();
    let mut lines = vec![format_command("begin", ["center"], None)];

    if let Some(name) = filled(&basics.name) {
        lines.push(format!(
            "{{\\LARGE\\bfseries\\color{{blackcolor}} {}}} {LINE_BREAK}[-0.2em]",
            name.to_uppercase()
        ));
    }
    lines.push(vspace(".75em"));

    let contact = contact_line(&basics, DIAMOND_SEP);
    if !contact.is_empty() {
        lines.push(format!("{contact} {LINE_BREAK}"));
    }
    lines.push(vspace(".5em"));

    let links = contact_links(&basics).join(DIAMOND_SEP);
    if !links.is_empty() {
        lines.push(links);
    }

    lines.push("\\noindent\\rule{\\textwidth}{.75pt}".to_string());
    lines.push(format_command("end", ["center"], None));
    lines
}

fn build_body(letter: &CoverLetterPayload, date: NaiveDate) -> Vec<String> {
    let mut lines = vec![
        vspace("0.5em"),
        letter_font(&date.format(LETTER_DATE_FORMAT).to_string()),
    ];

    let address = company_address(letter);
    if !address.is_empty() {
        lines.push(vspace("1em"));
        lines.push(letter_font(&address));
    }

    let set = EscapeSet::latex();
    let prose = |text: &str| neutralize_brackets(&set.escape_str(text));
    let salutation = join_nonempty([prose(&letter.greeting), prose(&letter.letter_body)], LINE_SEP);
    lines.push(vspace("1em"));
    lines.push(letter_font(&salutation));
    lines
}

/// `street \\ city, state zip`, dropping every empty component.
fn company_address(letter: &CoverLetterPayload) -> String {
    let city_state = join_nonempty(
        [
            neutralize_brackets(&letter.company_city),
            neutralize_brackets(&letter.company_state),
        ],
        ", ",
    );
    let locality = join_nonempty([city_state, neutralize_brackets(&letter.company_zip_code)], " ");
    join_nonempty(
        [neutralize_brackets(&letter.company_street_address), locality],
        LINE_SEP,
    )
}

/// Braces `[` and `]` so they print literally instead of opening an option group.
pub fn neutralize_brackets(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '[' | ']' => {
                out.push('{');
                out.push(c);
                out.push('}');
            }
            _ => out.push(c),
        }
    }
    out
}

fn letter_font(text: &str) -> String {
    format!("{{\\fontsize{{12}}{{14}}\\selectfont {text}}}")
}

fn vspace(amount: &str) -> String {
    format_command("vspace", [amount], None)
}
