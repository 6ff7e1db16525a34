// Input collaborators: resume JSON from a file or URL, PDF resumes on disk.

pub mod document;
pub mod resume;

pub use resume::fetch_resume;
