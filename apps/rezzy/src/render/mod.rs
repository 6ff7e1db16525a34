// LaTeX rendering core.
// Pure and synchronous: resume data in, ordered markup lines out. No I/O here.

pub mod cover_letter;
pub mod escape;
pub mod markup;
pub mod resume;
pub mod section;

pub use cover_letter::compose_cover_letter;
pub use resume::compose_resume;

use crate::models::resume::{filled, Basics};
use crate::render::markup::format_command;

/// LaTeX forced line break.
pub const LINE_BREAK: &str = "\\\\";
/// Line break used to join inline parts.
pub const LINE_SEP: &str = " \\\\ ";
/// Diamond bullet used to join inline parts in the cover letter header.
pub const DIAMOND_SEP: &str = " $\\diamond$ ";

/// Joins the non-empty parts with `sep`.
pub fn join_nonempty<S: AsRef<str>>(parts: impl IntoIterator<Item = S>, sep: &str) -> String {
    parts
        .into_iter()
        .filter(|p| !p.as_ref().is_empty())
        .map(|p| p.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Joins the present, non-empty optional parts with `sep`.
pub fn join_filled<'a>(parts: impl IntoIterator<Item = &'a Option<String>>, sep: &str) -> String {
    join_nonempty(parts.into_iter().filter_map(filled), sep)
}

/// `start - end`, or whichever of the two exists.
pub fn date_range(start: &Option<String>, end: &Option<String>) -> String {
    join_filled([start, end], " - ")
}

/// `phone <sep> city, region`, keeping only the parts that exist.
pub fn contact_line(basics: &Basics, sep: &str) -> String {
    let location = basics.location.clone().unwrap_or_default();
    let place = join_filled([&location.city, &location.region], ", ");
    join_nonempty([filled(&basics.phone).unwrap_or_default(), place.as_str()], sep)
}

/// Email link, then the personal url unless a profile already links it, then
/// one link per profile that has a url.
pub fn contact_links(basics: &Basics) -> Vec<String> {
    let profile_urls: Vec<&str> = basics
        .profiles
        .iter()
        .flatten()
        .filter_map(|p| filled(&p.url))
        .collect();

    let mut links = Vec::with_capacity(profile_urls.len() + 2);
    if let Some(email) = filled(&basics.email) {
        let target = format!("mailto:{email}");
        links.push(format_command("href", [target.as_str(), email], None));
    }
    if let Some(url) = filled(&basics.url).filter(|url| !profile_urls.contains(url)) {
        links.push(format_command("href", [url, url], None));
    }
    links.extend(
        profile_urls
            .iter()
            .map(|url| format_command("href", [*url, *url], None)),
    );
    links
}
