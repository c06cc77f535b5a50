/// A topic the feed can be scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub label: &'static str,
    /// Server-side section id; `None` is the unfiltered overview.
    pub id: Option<&'static str>,
}

pub const SECTIONS: &[Section] = &[
    Section {
        label: "Overview",
        id: None,
    },
    Section {
        label: "News",
        id: Some("news"),
    },
    Section {
        label: "Opinion",
        id: Some("commentisfree"),
    },
    Section {
        label: "Sport",
        id: Some("sport"),
    },
    Section {
        label: "Culture",
        id: Some("culture"),
    },
    Section {
        label: "Lifestyle",
        id: Some("lifeandstyle"),
    },
];

/// Looks up a section by label or id, ignoring case.
pub fn find_section(name: &str) -> Option<&'static Section> {
    let name = name.trim();
    SECTIONS.iter().find(|section| {
        section.label.eq_ignore_ascii_case(name)
            || section.id.is_some_and(|id| id.eq_ignore_ascii_case(name))
    })
}

/// Display title for a filter; unknown ids are shown verbatim.
pub fn section_title(id: Option<&str>) -> String {
    SECTIONS
        .iter()
        .find(|section| section.id == id)
        .map(|section| section.label.to_string())
        .unwrap_or_else(|| id.unwrap_or_default().to_string())
}
